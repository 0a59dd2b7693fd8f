use anyhow::Result;
use clap::{Arg, Command};
use std::env;
use std::path::PathBuf;

/// Well-known locations the tool operates on. The state file and
/// servicemenu directory honor environment overrides
/// (`MDCOLLECT_STATE_FILE`, `MDCOLLECT_MENU_DIR`) so tests and unusual
/// setups can relocate them; the defaults are the contract.
pub struct Config {
    /// Persisted collection state (JSON).
    pub state_path: PathBuf,
    /// Directory receiving the generated `.desktop` menu files.
    pub menu_dir: PathBuf,
    /// User home, used as the directory picker's starting point.
    pub home: PathBuf,
    /// Path the menu entries invoke; this binary.
    pub exec_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("/"));
        let state_path = env::var_os("MDCOLLECT_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| env::temp_dir().join("mdcollect_data.json"));
        let menu_dir = env::var_os("MDCOLLECT_MENU_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".local/share/kio/servicemenus"));
        let exec_path = env::current_exe().unwrap_or_else(|_| PathBuf::from("mdcollect"));
        Self {
            state_path,
            menu_dir,
            home,
            exec_path,
        }
    }
}

/// One invocation's requested operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Classify and append the given paths or `file://` URIs.
    Store(Vec<String>),
    /// Render the collection and send it to the clipboard.
    Copy,
    /// Write the rendered document into the given directory, then clear.
    Drop(PathBuf),
    /// Ask the user for a target directory, then behave as `Drop`.
    DropDialog,
    /// Show the derived metrics.
    Metrics,
    /// Remove one item by exact path.
    Remove(String),
    /// Empty the collection.
    Clear,
    /// (Re)generate the service-menu descriptors.
    Init,
}

pub fn parse_args() -> Result<(Action, Config)> {
    let matches = build_command().get_matches();
    let action = action_from_matches(&matches);
    Ok((action, Config::from_env()))
}

fn build_command() -> Command {
    Command::new("mdcollect")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Collects files into a persistent Markdown collection")
        .subcommand_required(true)
        .subcommand(
            Command::new("store")
                .about("Add files or directories to the collection")
                .arg(
                    Arg::new("paths")
                        .value_name("PATHS")
                        .help("Files, directories or file:// URIs to add")
                        .num_args(1..)
                        .required(true),
                ),
        )
        .subcommand(Command::new("copy").about("Copy the rendered collection to the clipboard"))
        .subcommand(
            Command::new("drop")
                .about("Write the rendered collection into a directory, then clear it")
                .arg(
                    Arg::new("dir")
                        .value_name("DIR")
                        .help("Target directory for temp_collection.md")
                        .required(true),
                ),
        )
        .subcommand(
            Command::new("drop-dialog")
                .about("Pick a target directory in a dialog, then drop the collection"),
        )
        .subcommand(Command::new("metrics").about("Show collection metrics"))
        .subcommand(
            Command::new("remove")
                .about("Remove one stored item by exact path")
                .arg(
                    Arg::new("path")
                        .value_name("PATH")
                        .help("Path of the item to remove (spaces allowed, quotes stripped)")
                        .num_args(1..)
                        .required(true),
                ),
        )
        .subcommand(Command::new("clear").about("Empty the collection"))
        .subcommand(Command::new("init").about("(Re)generate the file manager menu entries"))
}

fn action_from_matches(matches: &clap::ArgMatches) -> Action {
    match matches.subcommand() {
        Some(("store", sub)) => Action::Store(
            sub.get_many::<String>("paths")
                .expect("required")
                .cloned()
                .collect(),
        ),
        Some(("copy", _)) => Action::Copy,
        Some(("drop", sub)) => Action::Drop(PathBuf::from(
            sub.get_one::<String>("dir").expect("required"),
        )),
        Some(("drop-dialog", _)) => Action::DropDialog,
        Some(("metrics", _)) => Action::Metrics,
        Some(("remove", sub)) => {
            // Menu Exec lines may split a quoted path into several words;
            // rejoin them and strip one layer of surrounding quotes.
            let joined = sub
                .get_many::<String>("path")
                .expect("required")
                .cloned()
                .collect::<Vec<_>>()
                .join(" ");
            Action::Remove(strip_quotes(&joined).to_string())
        }
        Some(("clear", _)) => Action::Clear,
        Some(("init", _)) => Action::Init,
        _ => unreachable!("subcommand_required"),
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
