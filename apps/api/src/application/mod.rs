pub mod analysis;
pub mod comments;
pub mod metrics;
pub mod suggest_reply;
pub mod triage;
