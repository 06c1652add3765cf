pub mod openai_client;
pub mod traits;
