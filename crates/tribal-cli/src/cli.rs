use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tribal_search::DEFAULT_SUGGESTION_LIMIT;

#[derive(Parser)]
#[command(
    name = "tribal",
    about = "Tribal Tune instrument catalog: browse, search, and suggest",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML catalog configuration; `TRIBAL_*` variables override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// JSON manifest of instruments to load into the in-memory catalog
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// List instruments, optionally one category only
    List(ListArgs),
    /// Search titles and show results grouped by category
    Search(SearchArgs),
    /// Show the suggestions for a partial title
    Suggest(SuggestArgs),
    /// List the categories present in the catalog
    Categories,
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long)]
    pub category: Option<String>,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Substring of the title; omitted or empty shows everything
    pub term: Option<String>,
}

#[derive(Args)]
pub struct SuggestArgs {
    pub term: String,
    #[arg(short = 'n', long, default_value_t = DEFAULT_SUGGESTION_LIMIT)]
    pub limit: usize,
}
