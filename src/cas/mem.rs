use super::error::{Error, Result};
use super::hash::Hash;
use super::object::{Kind, Object};
use super::traits::Store;
use std::cell::RefCell;
use std::collections::HashMap;

/// MemStore is an in-memory object store, implementing the same `Store`
/// contract as `DiskStore` without touching the filesystem.  Test use only.
#[derive(Debug)]
pub struct MemStore {
    map: RefCell<HashMap<Hash, Object>>,
}

impl MemStore {
    pub fn new() -> MemStore {
        MemStore {
            map: RefCell::new(HashMap::new()),
        }
    }
}

impl Store for MemStore {
    fn put(&self, kind: Kind, payload: &[u8]) -> Result<Hash> {
        let object = Object::new(kind, payload.to_vec());
        let hash = object.hash();
        self.map.borrow_mut().insert(hash.clone(), object);
        Ok(hash)
    }

    fn get(&self, hash: &Hash) -> Result<(Kind, Vec<u8>)> {
        match self.map.borrow().get(hash) {
            Some(object) => Ok((object.kind, object.payload.clone())),
            None => Err(Error::NotFound(hash.to_hex())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MemStore;
    use crate::cas::{Hash, Kind, Store};

    #[test]
    fn put_get() {
        let storage = MemStore::new();

        let hash1 = storage.put(Kind::Blob, b"one").unwrap();
        let hash2 = storage.put(Kind::Blob, b"two").unwrap();
        let badhash = Hash::from_hex("a9993e364706816aba3e25717850c26c9cd0d89d").unwrap();

        assert_eq!(storage.get(&hash1).unwrap().1, b"one");
        assert_eq!(storage.get(&hash2).unwrap().1, b"two");
        assert!(storage.get(&badhash).is_err());
    }

    #[test]
    fn put_twice() {
        let storage = MemStore::new();

        let hash1 = storage.put(Kind::Blob, b"xyz").unwrap();
        let hash2 = storage.put(Kind::Blob, b"xyz").unwrap();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn matches_disk_store_hashes() {
        let storage = MemStore::new();
        let hash = storage.put(Kind::Blob, b"hi").unwrap();
        assert_eq!(hash.to_hex(), "32f95c0d1244a78b2be1bab8de17906fabb2c4a8");
    }
}
