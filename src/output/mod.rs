// Output formatting: the text report and its JSON twin.

pub mod json;
pub mod terminal;

use clap::ValueEnum;

/// How the grouping is written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// `[*]` / `[+]` text blocks
    #[default]
    Text,
    /// A single JSON document
    Json,
}
