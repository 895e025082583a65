//! `attic` is a tiny content-addressed version-control store: file contents,
//! directory snapshots, and commit history are kept as compressed,
//! hash-identified objects under a `.attic` control directory, with a staging
//! index batching changes between commits.
//!
//! The object codec and store are in `cas`; the staging index, tree builder,
//! and commit graph are in `repo`.  The `attic` binary is a thin front end
//! over `repo::Repository`.
//!
//! # Examples
//!
//! ```no_run
//! use attic::repo::Repository;
//! use std::path::Path;
//!
//! let repo = Repository::init(Path::new(".")).unwrap();
//! repo.add(&["README.md".to_string()]).unwrap();
//! let hash = repo.commit("initial import").unwrap();
//! println!("{}", hash);
//! ```

pub mod cas;
pub mod repo;
