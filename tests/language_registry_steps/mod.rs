//! Step definitions for language registry scenarios.

pub mod given;
pub mod when;
pub mod world;
