use super::error::{Error, Result};
use crypto::digest::Digest;
use crypto::sha1::Sha1;
use rustc_serialize::hex::{FromHex, ToHex};
use std::fmt;

/// Type Hash represents the key under which content is stored: the SHA-1
/// digest of an object's framed bytes, 20 bytes, rendered as 40 hex
/// characters.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Hash(Vec<u8>);

impl Hash {
    /// Create a new hash, given its 40-character hex representation.
    pub fn from_hex(hex: &str) -> Result<Hash> {
        if hex.len() != 40 {
            return Err(Error::BadHash(hex.to_string()));
        }
        match hex.from_hex() {
            Ok(bytes) => Ok(Hash(bytes)),
            Err(_) => Err(Error::BadHash(hex.to_string())),
        }
    }

    /// Create a new hash for the given content.
    pub fn for_bytes(bytes: &[u8]) -> Hash {
        let mut sha = Sha1::new();
        sha.input(bytes);
        let mut hash = Hash(vec![0; sha.output_bytes()]);
        sha.result(&mut hash.0);
        hash
    }

    /// Get the hex representation of this hash.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::Hash;

    #[test]
    fn test_to_hex() {
        let hash = Hash(vec![0u8; 20]);
        assert_eq!(hash.to_hex(), "0".repeat(40));
    }

    #[test]
    fn test_from_hex() {
        let hex = "a9993e364706816aba3e25717850c26c9cd0d89d";
        let hash = Hash::from_hex(hex).unwrap();
        assert_eq!(hash.to_hex(), hex);
    }

    #[test]
    fn test_from_hex_rejects_short() {
        assert!(Hash::from_hex("0011223344").is_err());
    }

    #[test]
    fn test_from_hex_rejects_nonhex() {
        assert!(Hash::from_hex(&"z".repeat(40)).is_err());
    }

    #[test]
    fn hash_bytes() {
        let hash = Hash::for_bytes(b"abc");
        assert_eq!(hash.to_hex(), "a9993e364706816aba3e25717850c26c9cd0d89d");
    }

    #[test]
    fn hash_bytes_is_deterministic() {
        assert_eq!(Hash::for_bytes(b"same"), Hash::for_bytes(b"same"));
        assert_ne!(Hash::for_bytes(b"same"), Hash::for_bytes(b"other"));
    }
}
