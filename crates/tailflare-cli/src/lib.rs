//! # tailflare-cli
//!
//! Command-line front end for [`tailflare`].
//!
//! ## Features
//!
//! - **Flags or environment**: every setting has a flag and an env var
//! - **Config file**: optional TOML file for the same settings
//! - **Dry runs**: `-n` computes and prints the plan without touching DNS
//! - **Structured logs**: text on a terminal, JSON otherwise

pub mod cli;
pub mod config;
pub mod output;
pub mod telemetry;

pub use cli::run;
