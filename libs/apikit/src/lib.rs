//! Small HTTP toolkit shared by the catalog crates: RFC 9457 problem bodies
//! and process shutdown signalling.

pub mod problem;
pub mod shutdown;

pub use problem::{Problem, ProblemResponse, ValidationError, APPLICATION_PROBLEM_JSON};
pub use shutdown::wait_for_shutdown;
