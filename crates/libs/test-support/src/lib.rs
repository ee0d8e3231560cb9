//! Shared harness for the device conformance suites.

pub mod harness;

pub use harness::{device_gate_enabled, device_harness, Harness, DEVICE_GATE_ENV};
