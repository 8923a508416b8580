//! Terminal and JSON presentation for the CLI

pub mod error;
pub mod json;
