use super::error::{Error, Result};
use super::hash::Hash;
use std::fmt;
use std::str;

/// The kinds of object the store holds.
#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord, Hash)]
pub enum Kind {
    /// Raw file content.
    Blob,
    /// A directory snapshot: an ordered entry listing.
    Tree,
    /// A tree snapshot linked to an optional parent commit.
    Commit,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Blob => "blob",
            Kind::Tree => "tree",
            Kind::Commit => "commit",
        }
    }

    pub fn from_name(name: &str) -> Result<Kind> {
        match name {
            "blob" => Ok(Kind::Blob),
            "tree" => Ok(Kind::Tree),
            "commit" => Ok(Kind::Commit),
            _ => Err(Error::MalformedObject(format!(
                "unknown object kind {:?}",
                name
            ))),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An object as it exists outside the store: a kind and a payload.  Framing,
/// hashing, and parsing all operate on the canonical wire form
/// `"{kind} {length}\0{payload}"`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Object {
    pub kind: Kind,
    pub payload: Vec<u8>,
}

impl Object {
    pub fn new(kind: Kind, payload: Vec<u8>) -> Object {
        Object { kind, payload }
    }

    /// Produce the framed wire form.  The length field is recomputed from
    /// the payload on every call, never cached.
    pub fn frame(&self) -> Vec<u8> {
        let mut framed = format!("{} {}\0", self.kind, self.payload.len()).into_bytes();
        framed.extend_from_slice(&self.payload);
        framed
    }

    /// The hash of the framed form; this is the object's identity.
    pub fn hash(&self) -> Hash {
        Hash::for_bytes(&self.frame())
    }

    /// Parse framed wire bytes back into an object.  The header must read
    /// `"<word> <digits>"` up to the first NUL byte, and the declared length
    /// must match the payload.
    pub fn parse(framed: &[u8]) -> Result<Object> {
        let nul = framed
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::MalformedObject("no NUL byte after header".to_string()))?;
        let header = str::from_utf8(&framed[..nul])
            .map_err(|_| Error::MalformedObject("header is not utf-8".to_string()))?;
        let mut words = header.splitn(2, ' ');
        let kind = Kind::from_name(words.next().unwrap_or(""))?;
        let length: usize = words
            .next()
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| Error::MalformedObject(format!("bad header {:?}", header)))?;
        let payload = framed[nul + 1..].to_vec();
        if payload.len() != length {
            return Err(Error::MalformedObject(format!(
                "declared length {} but payload is {} bytes",
                length,
                payload.len()
            )));
        }
        Ok(Object { kind, payload })
    }
}
