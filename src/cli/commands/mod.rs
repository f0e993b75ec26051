//! Implementations of the individual CLI subcommands.

pub mod add;
pub mod config;
pub mod delete;
pub mod get;
pub mod list;
pub mod update;
pub mod whereis;
