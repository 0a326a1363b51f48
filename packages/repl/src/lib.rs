//! vsstree-repl: Interactive Browser for Binary VSS Trees
//!
//! Loads a binary tree file and runs a line-oriented shell over it:
//! cursor navigation through the tree, pattern search, subtree
//! metadata listings, and list/JSON dumps. See [`commands`] for the
//! command set.

use std::path::Path;

use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use thiserror::Error;

pub mod commands;
pub mod session;

use commands::{Command, CommandResult};
use session::Session;

/// Errors that end the shell.
#[derive(Debug, Error)]
pub enum ReplError {
    #[error("tree error: {0}")]
    Tree(#[from] vsstree_tree::TreeError),

    #[error("search error: {0}")]
    Search(#[from] vsstree_search::SearchError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load `file` and run the interactive loop until the user quits.
pub fn run(file: &Path) -> Result<(), ReplError> {
    let mut session = Session::open(file)?;

    println!("{}", session.show_current());
    println!("{}", commands::HELP);

    let mut editor = Reedline::create();
    loop {
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic(session.current_path()),
            DefaultPromptSegment::Empty,
        );
        let line = match editor.read_line(&prompt)? {
            Signal::Success(line) => line,
            Signal::CtrlC | Signal::CtrlD => break,
        };

        match commands::execute(Command::parse(&line), &mut session)? {
            CommandResult::Ok(Some(output)) => println!("{}", output),
            CommandResult::Ok(None) => {}
            CommandResult::Error(message) => eprintln!("{}", message),
            CommandResult::Exit => break,
        }
    }
    Ok(())
}
