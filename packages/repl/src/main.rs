use std::path::PathBuf;

use clap::Parser;

/// vsstree - interactive browser for binary VSS trees
#[derive(Parser, Debug)]
#[command(name = "vsstree")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Binary tree file to load
    file: PathBuf,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = vsstree_repl::run(&args.file) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
