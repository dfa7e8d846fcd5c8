use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "asapan-convert")]
#[command(about = "Convert Cisco ASA objects and access-lists to Palo Alto format")]
pub struct Cli {
    /// ASA configuration file to read.
    pub input: PathBuf,
    /// Output file path.
    #[arg(short, long)]
    pub output: PathBuf,
    /// Output format (defaults to set commands).
    #[arg(long, value_enum, conflicts_with = "xml")]
    pub format: Option<Format>,
    /// Shorthand for `--format xml` (Panorama import).
    #[arg(long)]
    pub xml: bool,
    /// Panorama device group for XML output.
    #[arg(long = "device-group", visible_alias = "dg")]
    pub device_group: Option<String>,
    /// Do not add tags and descriptions to output rules.
    #[arg(long)]
    pub no_tags: bool,
    /// Tag applied to converted rules.
    #[arg(long)]
    pub tag_name: Option<String>,
    /// What to do with access-list lines that cannot be parsed.
    #[arg(long, value_enum)]
    pub on_malformed: Option<OnMalformed>,
    /// Optional TOML settings file; command-line flags take precedence.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Summary line format.
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    pub summary: SummaryFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum Format {
    Set,
    Xml,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
pub enum OnMalformed {
    Abort,
    Skip,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SummaryFormat {
    Text,
    Json,
}
