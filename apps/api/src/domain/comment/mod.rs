pub mod analysis;
pub mod entity;
pub mod repository;
