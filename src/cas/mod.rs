//! `cas` -- a content-addressible store for framed, compressed objects.
//!
//! Every object is a `(kind, payload)` pair framed as
//! `"{kind} {length}\0{payload}"`; the SHA-1 digest of the framed bytes is
//! the object's sole identity and storage key, so storing the same payload
//! twice yields the same hash and no additional space.  Objects are
//! write-once: there is no update or delete.
//!
//! The API is in the `Store` trait; `DiskStore` is the on-disk
//! implementation, keeping zlib-compressed objects under a two-level
//! fan-out directory.
//!
//! # Examples
//!
//! ```
//! use attic::cas::{DiskStore, Kind, Store};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let storage = DiskStore::new(dir.path());
//!
//! let hash = storage.put(Kind::Blob, b"hello").unwrap();
//! let (kind, payload) = storage.get(&hash).unwrap();
//! assert_eq!(kind, Kind::Blob);
//! assert_eq!(payload, b"hello");
//! ```

mod codec;
mod hash;
mod object;
mod store;
mod traits;

pub use self::codec::{compress, decompress};
pub use self::hash::Hash;
pub use self::object::{Kind, Object};
pub use self::store::DiskStore;
pub use self::traits::Store;

mod error;
pub use self::error::*;

// MemStore is for test use only
#[cfg(test)]
mod mem;
#[cfg(test)]
pub use self::mem::MemStore;
