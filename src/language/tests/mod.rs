//! Unit tests for Draft language discovery.
