use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CliCommands {
    /// Decode a single frame given as hex (e.g., "010312 01a0 0033 ...")
    Decode {
        /// Hex encoded frame; whitespace between digits is ignored
        #[arg(num_args = 1.., required = true)]
        hex: Vec<String>,
    },
    /// Decode the frame of a scanning service response body ({"data": "<hex>"})
    Response {
        /// File holding the JSON response body, reads stdin if omitted or "-"
        file: Option<PathBuf>,
    },
    /// Read one hex frame per line from stdin and print every decoded frame
    Stream,
    /// Show the word layout used for decoding
    Layout,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

const fn about_text() -> &'static str {
    "titan bms frame decoder command line tool"
}

#[derive(Parser, Debug)]
#[command(version, about=about_text(), long_about = None)]
pub struct CliArgs {
    #[command(flatten)]
    pub verbose: Verbosity<InfoLevel>,

    #[command(subcommand)]
    pub command: CliCommands,

    /// Output format of decoded frames
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// YAML file with display settings (placeholder, show_raw, show_words)
    #[arg(long, short)]
    pub config: Option<PathBuf>,
}
