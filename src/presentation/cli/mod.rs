//! CLI module

mod commands;
mod output;

pub use commands::{Cli, Commands};
pub use output::{AssetRow, render_table};
