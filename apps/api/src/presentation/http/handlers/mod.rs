pub mod comments;
pub mod easy_reply;
pub mod health;
pub mod networks;
pub mod stats;
