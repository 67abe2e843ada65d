mod catalog;
mod commands;
mod config;
mod logging;
mod route;
mod source;
mod tui;
mod workspace;

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};

use crate::catalog::model::Difficulty;
use crate::commands::list::{ListArgs, OutputFormat};
use crate::logging::{LogConfig, LogTarget};
use crate::route::Location;
use crate::workspace::Workspace;

#[derive(Parser)]
#[command(
    name = "qdeck",
    about = "Browse a local deck of coding interview questions in the terminal"
)]
struct Cli {
    /// Directory holding index.json and <id>.json (skips discovery)
    #[arg(long, global = true, value_name = "DIR")]
    data: Option<PathBuf>,
    /// Raise log verbosity (repeatable)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Write logs here instead of the configured file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive question list
    Browse {
        /// Start with this tag selected
        #[arg(long)]
        tag: Option<String>,
    },
    /// Open one question in the interactive detail view
    Show {
        /// Question id
        id: Option<String>,
    },
    /// Open a shared location such as `index?tag=Array` or `question?id=1`
    Open {
        location: Location,
    },
    /// Print the filtered question list
    #[command(group(ArgGroup::new("list_format").args(["ids", "json"]).multiple(false)))]
    List {
        #[arg(long)]
        tag: Option<String>,
        /// Easy, Medium or Hard
        #[arg(long, value_parser = parse_difficulty)]
        difficulty: Option<Difficulty>,
        /// Case-insensitive title substring
        #[arg(long)]
        search: Option<String>,
        /// Print only ids, one per line
        #[arg(long)]
        ids: bool,
        /// Print the matching summaries as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every tag with its question count
    Tags,
    /// Split a full question dump into <id>.json records and index.json
    Split {
        /// JSON array, or `const questionsData = [...]`
        input: PathBuf,
        /// Output directory
        #[arg(long, default_value = "data")]
        out: PathBuf,
    },
    /// Report missing or suspicious question content
    Audit,
}

impl Command {
    fn is_interactive(&self) -> bool {
        matches!(self, Self::Browse { .. } | Self::Show { .. } | Self::Open { .. })
    }
}

fn parse_difficulty(raw: &str) -> Result<Difficulty, String> {
    Difficulty::ALL
        .into_iter()
        .find(|d| d.label().eq_ignore_ascii_case(raw.trim()))
        .ok_or_else(|| format!("unknown difficulty {raw:?} (expected Easy, Medium or Hard)"))
}

fn log_config(cli: &Cli, ws: Option<&Workspace>) -> LogConfig {
    let configured = ws.map(|ws| ws.config.log_level).unwrap_or_default();
    let target = if cli.command.is_interactive() {
        let path = cli
            .log_file
            .clone()
            .or_else(|| ws.and_then(|ws| ws.config.log_file.clone()))
            .map(|p| match ws {
                Some(ws) if p.is_relative() => ws.root.join(p),
                _ => p,
            })
            .or_else(|| ws.map(Workspace::default_log_path))
            .unwrap_or_else(|| PathBuf::from("qdeck.log"));
        LogTarget::File(path)
    } else {
        match &cli.log_file {
            Some(path) => LogTarget::File(path.clone()),
            None => LogTarget::Stderr,
        }
    };
    LogConfig {
        level: configured.raised(cli.verbose),
        target,
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // split prepares a data directory, so it must run before one exists.
    if let Command::Split { input, out } = &cli.command {
        logging::init(&log_config(&cli, None))?;
        return commands::split::run(input, out);
    }

    let ws = workspace::resolve(cli.data.as_deref())?;
    logging::init(&log_config(&cli, Some(&ws)))?;
    dispatch(cli.command, &ws)
}

fn dispatch(command: Command, ws: &Workspace) -> Result<()> {
    match command {
        Command::Browse { tag } => commands::browse::run(ws, commands::browse::list_location(tag)),
        Command::Show { id } => commands::browse::run(ws, commands::browse::detail_location(id)),
        Command::Open { location } => commands::browse::run(ws, location),
        Command::List {
            tag,
            difficulty,
            search,
            ids,
            json,
        } => {
            let format = if json {
                OutputFormat::Json
            } else if ids {
                OutputFormat::Ids
            } else {
                OutputFormat::Rows
            };
            commands::list::run(
                ws,
                &ListArgs {
                    tag,
                    difficulty,
                    search,
                    format,
                },
            )
        }
        Command::Tags => commands::tags::run(ws),
        Command::Audit => commands::audit::run(ws),
        Command::Split { input, out } => commands::split::run(&input, &out),
    }
}
