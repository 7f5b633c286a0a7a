use clap::{Parser, ValueEnum};
use docmap::ParserType;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docmap")]
#[command(about = "Builds a documentation map from a crawl snapshot")]
#[command(version)]
pub struct Args {
    /// JSON crawl snapshot: { "root_url": ..., "pages": [{ "url", "title", "html", "links" }] }
    pub snapshot: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Only map pages belonging to this section (repeatable)
    #[arg(short, long = "section")]
    pub sections: Vec<String>,

    /// Extraction chain to use for the root page
    #[arg(short, long, value_enum, default_value_t = ParserArg::Auto)]
    pub parser: ParserArg,

    /// Write the map here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParserArg {
    Auto,
    Html,
    Text,
}

/// Convert from CLI argument parser choice to the configured parser
pub fn convert_parser(arg: ParserArg) -> Option<ParserType> {
    match arg {
        ParserArg::Auto => None,
        ParserArg::Html => Some(ParserType::Html),
        ParserArg::Text => Some(ParserType::Text),
    }
}
