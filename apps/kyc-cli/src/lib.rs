//! KYC platform command-line front end

pub mod commands;
pub mod logging;

pub use commands::{parse_binding, Source};
