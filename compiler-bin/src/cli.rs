use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::level_filters::LevelFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(about, version(VERSION))]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
    #[arg(long, global(true), help("Print results as JSON"))]
    pub json: bool,
    #[arg(
        long,
        global(true),
        value_name("LevelFilter"),
        help("Log level for type inference"),
        default_value("off")
    )]
    pub check_log: LevelFilter,
    #[arg(
        long,
        global(true),
        value_name("LevelFilter"),
        help("Log level for the query services"),
        default_value("warn")
    )]
    pub analyzer_log: LevelFilter,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Type check a program.
    Check(Program),
    /// Rename the entity under the cursor.
    Rename {
        #[command(flatten)]
        program: Program,
        #[command(flatten)]
        cursor: Cursor,
        #[arg(help("The new name"))]
        new_name: String,
    },
    /// List uses of deprecated or experimental declarations.
    Hints {
        #[command(flatten)]
        program: Program,
        #[arg(help("Files to scan, every file when omitted"))]
        files: Vec<String>,
    },
    /// List every occurrence of the entity under the cursor.
    References {
        #[command(flatten)]
        program: Program,
        #[command(flatten)]
        cursor: Cursor,
    },
    /// Find the declaration of the entity under the cursor.
    Definition {
        #[command(flatten)]
        program: Program,
        #[command(flatten)]
        cursor: Cursor,
    },
    /// Show the type of the node under the cursor.
    Hover {
        #[command(flatten)]
        program: Program,
        #[command(flatten)]
        cursor: Cursor,
    },
}

#[derive(Debug, Args)]
pub struct Program {
    #[arg(help("A JSON-serialised, name-resolved program"))]
    pub program: PathBuf,
}

#[derive(Debug, Args)]
pub struct Cursor {
    #[arg(help("The file path, as registered in the program"))]
    pub file: String,
    #[arg(help("1-based line"))]
    pub line: u32,
    #[arg(help("1-based column"))]
    pub column: u32,
}
