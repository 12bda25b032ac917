//! Unit tests for secret provisioning.
