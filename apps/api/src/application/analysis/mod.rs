pub mod dto;
pub mod prompt;
pub mod scorer;
pub mod use_case;
