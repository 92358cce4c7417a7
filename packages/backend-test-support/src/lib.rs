//! Test support for the gatekeeper workspace: one-time logging setup and
//! assertions for the Problem Details error contract.

pub mod logging;
pub mod problem_details;
