pub mod comment;
pub mod metrics;
pub mod network;
pub mod shared;
pub mod triage;
