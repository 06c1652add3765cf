pub mod capability;
pub mod registry;
