use super::error::Result;
use super::hash::Hash;
use super::object::Kind;

/// Content Addressible Storage
///
/// When a payload is stored, it is framed with its kind and length, hashed,
/// and kept under that hash.  It can later be retrieved by the hash.
pub trait Store {
    /// Store a payload of the given kind, returning its hash.
    ///
    /// Storing the same kind and payload twice results in the same Hash
    /// (and no additional use of space).
    fn put(&self, kind: Kind, payload: &[u8]) -> Result<Hash>;

    /// Retrieve an object's kind and payload by hash.
    fn get(&self, hash: &Hash) -> Result<(Kind, Vec<u8>)>;
}
