//! E2E test scenarios.
//!
//! Each module corresponds to one behaviour of the verification session.

mod check_isolation;
mod fixture_failure;
mod idempotence;
mod verify_flow;
