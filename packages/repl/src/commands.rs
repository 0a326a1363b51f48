//! Command parsing and execution.
//!
//! Commands:
//! - `u` / `d` / `l` / `r` - navigate: up, down, previous/next child
//! - `s <pattern>` - search leaves matching a dotted pattern
//! - `m <path> <depth>` - subtree metadata listing
//! - `n` - dump leaf path list to `nodelist.txt`
//! - `i` - dump UUID list to `uuidlist.txt`
//! - `j` - dump the tree as JSON to `tree.json`
//! - `w` - write the tree back to its file
//! - `h` - show help
//!
//! Anything else exits the shell.

use std::fs::File;
use std::io::BufWriter;

use nu_ansi_term::Color;

use vsstree_search::{
    search, subtree_metadata, write_json, write_leaf_list, write_uuid_list, SearchOptions,
};

use crate::session::Session;
use crate::ReplError;

const NODE_LIST_FILE: &str = "nodelist.txt";
const UUID_LIST_FILE: &str = "uuidlist.txt";
const JSON_FILE: &str = "tree.json";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Up,
    Down,
    Left,
    Right,
    Search { pattern: String },
    Metadata { path: String, depth: usize },
    NodeList,
    UuidList,
    JsonDump,
    WriteBack,
    Help,
    /// Empty line; do nothing.
    Nothing,
    /// Anything unrecognized ends the session.
    Quit,
}

/// Result of executing a command.
pub enum CommandResult {
    /// Text to display, if any.
    Ok(Option<String>),
    /// Command-level failure; the session continues.
    Error(String),
    /// End the session.
    Exit,
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Command {
        let mut words = input.split_whitespace();
        let head = match words.next() {
            Some(head) => head,
            None => return Command::Nothing,
        };
        match head {
            "u" => Command::Up,
            "d" => Command::Down,
            "l" => Command::Left,
            "r" => Command::Right,
            "s" => match words.next() {
                Some(pattern) => Command::Search {
                    pattern: pattern.to_string(),
                },
                None => Command::Quit,
            },
            "m" => {
                let path = words.next();
                let depth = words.next().and_then(|d| d.parse().ok());
                match (path, depth) {
                    (Some(path), Some(depth)) => Command::Metadata {
                        path: path.to_string(),
                        depth,
                    },
                    _ => Command::Quit,
                }
            }
            "n" => Command::NodeList,
            "i" => Command::UuidList,
            "j" => Command::JsonDump,
            "w" => Command::WriteBack,
            "h" => Command::Help,
            _ => Command::Quit,
        }
    }
}

/// Execute a parsed command against the session.
pub fn execute(command: Command, session: &mut Session) -> Result<CommandResult, ReplError> {
    match command {
        Command::Up => {
            session.up();
            Ok(CommandResult::Ok(Some(session.show_current())))
        }
        Command::Down => {
            session.down();
            Ok(CommandResult::Ok(Some(session.show_current())))
        }
        Command::Left => {
            session.left();
            Ok(CommandResult::Ok(Some(session.show_current())))
        }
        Command::Right => {
            session.right();
            Ok(CommandResult::Ok(Some(session.show_current())))
        }
        Command::Search { pattern } => Ok(CommandResult::Ok(Some(run_search(session, &pattern)))),
        Command::Metadata { path, depth } => Ok(run_metadata(session, &path, depth)),
        Command::NodeList => {
            let file = File::create(NODE_LIST_FILE)?;
            let count = write_leaf_list(session.tree(), &mut BufWriter::new(file))?;
            Ok(CommandResult::Ok(Some(format!(
                "Leaf node list with {} nodes written to {}",
                count, NODE_LIST_FILE
            ))))
        }
        Command::UuidList => {
            let file = File::create(UUID_LIST_FILE)?;
            let count = write_uuid_list(session.tree(), &mut BufWriter::new(file))?;
            Ok(CommandResult::Ok(Some(format!(
                "UUID list with {} nodes written to {}",
                count, UUID_LIST_FILE
            ))))
        }
        Command::JsonDump => {
            let file = File::create(JSON_FILE)?;
            write_json(session.tree(), &mut BufWriter::new(file))?;
            Ok(CommandResult::Ok(Some(format!(
                "Tree written to {}",
                JSON_FILE
            ))))
        }
        Command::WriteBack => {
            session.write_back()?;
            Ok(CommandResult::Ok(Some("Tree written back".to_string())))
        }
        Command::Help => Ok(CommandResult::Ok(Some(HELP.to_string()))),
        Command::Nothing => Ok(CommandResult::Ok(None)),
        Command::Quit => Ok(CommandResult::Exit),
    }
}

fn run_search(session: &Session, pattern: &str) -> String {
    let tree = session.tree();
    let result = search(
        tree,
        tree.root(),
        pattern,
        &SearchOptions {
            any_depth: true,
            leaf_only: true,
            ..SearchOptions::default()
        },
    );
    let mut out = format!("Number of elements found = {}\n", result.matches.len());
    for m in &result.matches {
        out.push_str(&format!(
            "type = {}, datatype = {}, path = {}\n",
            tree.kind(m.node),
            tree.datatype(m.node).unwrap_or("-"),
            Color::Green.paint(&m.path),
        ));
    }
    out
}

fn run_metadata(session: &Session, path: &str, depth: usize) -> CommandResult {
    match subtree_metadata(session.tree(), path, depth) {
        Ok(nodes) => {
            let mut out = format!("Number of elements found = {}\n", nodes.len());
            for node in &nodes {
                out.push_str(&format!(
                    "type = {}, validation = {}, path = {}\n",
                    node.kind,
                    node.validation.as_u8(),
                    Color::Green.paint(&node.path),
                ));
            }
            CommandResult::Ok(Some(out))
        }
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

pub const HELP: &str = "\
u/d/l/r         navigate: up / down / previous child / next child
s <pattern>     search leaves matching a dotted pattern ('*' wildcards)
m <path> <n>    list subtree metadata n levels deep
n               write leaf path list to nodelist.txt
i               write UUID list to uuidlist.txt
j               write the tree as JSON to tree.json
w               write the tree back to its file
h               this help
anything else   quit";
