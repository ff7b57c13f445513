//! CLI library for testing purposes

pub mod check;
pub mod config_cmd;
pub mod validation;
