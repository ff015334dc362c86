//! CLI subcommands

pub mod containers;
pub mod show;
pub mod validate;
