//! Integration tests for the SafeLink API and redirect gate.

mod gate_test;
mod helpers;
mod link_test;
