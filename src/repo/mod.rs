//! `repo` -- a Git-like repository layer over `cas`: a staging index that
//! batches changes, a tree builder that snapshots either the index or a
//! working directory, and a linear commit graph behind a single `main`
//! reference with `HEAD` indirection.
//!
//! # Examples
//!
//! ```no_run
//! use attic::repo::Repository;
//! use std::path::Path;
//!
//! let repo = Repository::init(Path::new(".")).unwrap();
//! repo.add(&["src".to_string()]).unwrap();
//! repo.commit("snapshot src").unwrap();
//! for entry in repo.history().unwrap() {
//!     let (hash, commit) = entry.unwrap();
//!     println!("{} {}", hash, commit.message);
//! }
//! ```

mod commit;
mod index;
mod refs;
mod repo;
mod tree;

pub use self::commit::Commit;
pub use self::index::{Entry, Index, LsMode};
pub use self::refs::{resolve_head, update_main, HEAD_FILE, MAIN_REF};
pub use self::repo::{History, Repository};
pub use self::tree::{
    parse_tree, write_tree_from_index, write_tree_from_workdir, TreeEntry, DIR_MODE, FILE_MODE,
};

mod error;
pub use self::error::*;

/// The store's own control directory; never staged, never walked.
pub const CONTROL_DIR: &str = ".attic";

/// Nested version-control directories are excluded from walks too.
pub(crate) const GIT_DIR: &str = ".git";
