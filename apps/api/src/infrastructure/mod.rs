pub mod database;
pub mod llm;
pub mod networks;
pub mod repositories;
