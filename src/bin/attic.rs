//! Thin command-line front end over `attic::repo::Repository`.  Each
//! subcommand maps to one repository operation; operation failures are
//! printed as `Error: …` lines and the process still exits normally.

use attic::cas::{Hash, Store};
use attic::repo::{Error, LsMode, Repository};
use chrono::{Local, TimeZone};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::exit;

const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(name = "attic", about = "A tiny content-addressed version-control store")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an empty repository in the current directory
    Init,
    /// Stage files or directory trees for the next commit
    Add { paths: Vec<String> },
    /// Snapshot the staged index into a new commit on main
    Commit {
        #[arg(short = 'm')]
        message: String,
    },
    /// Show the commit history, tip first
    Log,
    /// Hash a file as a blob, writing it to the store if a flag is given
    #[command(name = "hash_object")]
    HashObject {
        path: PathBuf,
        /// Any value but "0" enables the write
        write: Option<String>,
    },
    /// Print an object's payload
    #[command(name = "cat_file")]
    CatFile { hash: String },
    /// Write the staged index as a tree object
    #[command(name = "write_tree")]
    WriteTree,
    /// List a tree object's entries
    #[command(name = "ls_tree")]
    LsTree {
        #[arg(long)]
        name_only: bool,
        hash: String,
    },
    /// List staged paths
    #[command(name = "ls_files")]
    LsFiles {
        #[arg(short = 's', long = "stage")]
        stage: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            err.print().ok();
            exit(code);
        }
    };
    run(cli.command);
}

fn run(command: Command) {
    let repo = Repository::open(Path::new("."));
    match command {
        Command::Init => match Repository::init(Path::new(".")) {
            Ok(_) => println!("Initialized attic repository."),
            Err(Error::AlreadyInitialized) => println!("Repository already initialized."),
            Err(e) => println!("Error: {}", e),
        },

        Command::Add { paths } => {
            if paths.is_empty() {
                println!("Error: No paths specified for adding");
                return;
            }
            match repo.add(&paths) {
                Ok(failures) => {
                    for failure in failures {
                        println!("Error: {}", failure);
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        Command::Commit { message } => match repo.commit(&message) {
            Ok(hash) => println!("Created commit {}", hash),
            Err(e) => println!("Error: {}", e),
        },

        Command::Log => match repo.history() {
            Ok(history) => {
                for item in history {
                    match item {
                        Ok((hash, commit)) => print_log_entry(&hash, &commit),
                        Err(e) => {
                            println!("Error: {}", e);
                            break;
                        }
                    }
                }
            }
            Err(e) => println!("Error: {}", e),
        },

        Command::HashObject { path, write } => {
            if !path.exists() {
                println!("Error: File not found.");
                return;
            }
            let write = matches!(write.as_deref(), Some(flag) if flag != "0");
            match repo.hash_object(&path, write) {
                Ok(hash) => println!("{}", hash),
                Err(e) => println!("Error: {}", e),
            }
        }

        Command::CatFile { hash } => match parse_hash(&hash).and_then(|h| Ok(repo.store().get(&h)?)) {
            Ok((_, payload)) => {
                io::stdout().write_all(&payload).ok();
            }
            Err(e) => println!("Error: {}", e),
        },

        Command::WriteTree => match repo.write_tree() {
            Ok(hash) => println!("{}", hash),
            Err(e) => println!("Error: {}", e),
        },

        Command::LsTree { name_only, hash } => {
            match parse_hash(&hash).and_then(|h| repo.ls_tree(&h)) {
                Ok(entries) => {
                    for entry in entries {
                        if name_only {
                            println!("{}", entry.name);
                        } else {
                            println!("{}", entry.render());
                        }
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
        }

        Command::LsFiles { stage } => {
            if !repo.index_path().exists() {
                println!("Error: Index file not found. Have you added any files?");
                return;
            }
            let mode = if stage { LsMode::Stage } else { LsMode::Paths };
            match repo.index() {
                Ok(index) => {
                    for line in index.ls(mode) {
                        println!("{}", line);
                    }
                }
                Err(e) => println!("Error: {}", e),
            }
        }
    }
}

fn parse_hash(hex: &str) -> Result<Hash, Error> {
    Ok(Hash::from_hex(hex)?)
}

fn print_log_entry(hash: &Hash, commit: &attic::repo::Commit) {
    println!("{}commit {}{}", YELLOW, hash, RESET);
    println!("{}Author: {}{}", CYAN, commit.author_name(), RESET);
    let date = commit
        .timestamp()
        .and_then(|ts| Local.timestamp_opt(ts, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_default();
    println!("Date: {}", date);
    println!("\n      {}\n", commit.message);
}
