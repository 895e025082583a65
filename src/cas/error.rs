use failure::Fail;
use std::io;

#[derive(Debug, Fail)]
pub enum Error {
    /// No object is stored under the given hash.
    #[fail(display = "object {} not found", _0)]
    NotFound(String),

    /// The framed bytes do not parse as `"{kind} {length}\0{payload}"`.
    #[fail(display = "malformed object: {}", _0)]
    MalformedObject(String),

    /// The stored file is not a valid zlib stream (corrupt or truncated).
    #[fail(display = "failed to decompress object data")]
    Decompression,

    /// The given string is not a 40-character hex object hash.
    #[fail(display = "invalid object hash {:?}", _0)]
    BadHash(String),

    #[fail(display = "{}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::Io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
