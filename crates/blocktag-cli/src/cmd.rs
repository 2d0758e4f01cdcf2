use crate::parse::run_parse_command;
use crate::tag::run_tag_command;
use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

///////// Args /////////

/// Output format of parsed blocks.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum Format {
    /// Pretty printed json array.
    #[default]
    Json,

    /// Rust debug output.
    Debug,

    /// Blocks rendered back into markup, one per line.
    Source,
}

#[derive(Clone, Debug, Args)]
pub struct ParseArgs {
    #[arg(help = "File path to parse content, '-' to read stdin")]
    pub file: String,

    #[arg(
        short = 'c',
        long = "config",
        help = "Path to the toml config file defining tag styles"
    )]
    pub config: Option<String>,

    #[arg(
        short = 's',
        long = "single",
        help = "Tag name to treat as self-closing, can be repeated. Applied after the config file"
    )]
    pub single: Vec<String>,

    #[arg(short = 'n', long = "name", help = "Only print blocks with this tag name")]
    pub name: Option<String>,

    #[arg(
        short = 'f',
        long = "format",
        help = "Output format",
        value_enum,
        default_value_t = Format::Json
    )]
    pub format: Format,
}

#[derive(Clone, Debug, Args)]
pub struct TagArgs {
    #[arg(help = "Tag header to parse, without brackets. e.g. 'name uid=1 flag'")]
    pub header: String,
}

///////// Subcommand /////////

#[derive(Clone, Debug, Parser)]
#[command(name = "blocktag", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    #[command(about = "extract tag blocks from file")]
    Parse(ParseArgs),

    #[command(about = "parse a single tag header")]
    Tag(TagArgs),
}

/// Main entry of all subcommands.
pub async fn run_command_with_args(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Parse(parse_args) => run_parse_command(parse_args).await,
        Command::Tag(tag_args) => run_tag_command(tag_args),
    }
}
