use crate::cas;
use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
pub enum Error {
    /// The repository's control directory already exists.
    #[fail(display = "repository already initialized")]
    AlreadyInitialized,

    /// The staging ledger is absent or has no entries.
    #[fail(display = "index is empty")]
    EmptyIndex,

    /// Committing with nothing staged.
    #[fail(display = "nothing to commit")]
    NothingToCommit,

    /// `HEAD` or the reference it names does not exist yet.
    #[fail(display = "no commits yet")]
    NoCommits,

    /// A link in the commit chain points at a missing object.
    #[fail(display = "commit object {} not found", _0)]
    CommitNotFound(String),

    /// A commit object's metadata does not parse.
    #[fail(display = "malformed commit object: {}", _0)]
    MalformedCommit(String),

    /// `ls_tree` was pointed at an object of another kind.
    #[fail(display = "object {} is not a tree", _0)]
    NotATree(String),

    /// A single `add` target that does not exist; reported per path,
    /// never fatal to the rest of the batch.
    #[fail(display = "'{}' does not exist", _0)]
    MissingPath(String),

    #[fail(display = "{}", _0)]
    Cas(#[cause] cas::Error),

    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl From<cas::Error> for Error {
    fn from(err: cas::Error) -> Error {
        Error::Cas(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
