//! Review service access and response interpretation.

pub mod classifier;
pub mod client;
pub mod interpreter;
pub mod status;

pub use classifier::{Classified, check_response};
pub use client::{PracticumClient, ReviewSource};
pub use interpreter::parse_status;
pub use status::{ReviewStatus, StatusRecord};
