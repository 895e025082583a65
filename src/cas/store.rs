use super::codec;
use super::error::{Error, Result};
use super::hash::Hash;
use super::object::{Kind, Object};
use super::traits::Store;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// DiskStore keeps compressed, framed objects on disk, one file per object,
/// under a two-level fan-out: `{root}/{hash[0:2]}/{hash[2:]}`.  The fan-out
/// subdirectory is created on demand, and a write for an already-present
/// hash is skipped (content addressing makes it a no-op).
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at the given objects directory.  The directory
    /// need not exist yet; it is created on the first write.
    pub fn new<P: Into<PathBuf>>(root: P) -> DiskStore {
        DiskStore { root: root.into() }
    }

    fn object_path(&self, hash: &Hash) -> PathBuf {
        let hex = hash.to_hex();
        self.root.join(&hex[..2]).join(&hex[2..])
    }
}

impl Store for DiskStore {
    fn put(&self, kind: Kind, payload: &[u8]) -> Result<Hash> {
        let framed = Object::new(kind, payload.to_vec()).frame();
        let hash = Hash::for_bytes(&framed);
        let path = self.object_path(&hash);
        if path.exists() {
            // identical bytes are already present
            return Ok(hash);
        }
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let compressed = codec::compress(&framed)?;
        let mut tmp = NamedTempFile::new_in(&self.root)?;
        tmp.write_all(&compressed)?;
        tmp.persist(&path).map_err(|e| Error::Io(e.error))?;
        debug!("stored {} object {}", kind, hash);
        Ok(hash)
    }

    fn get(&self, hash: &Hash) -> Result<(Kind, Vec<u8>)> {
        let path = self.object_path(hash);
        if !path.exists() {
            return Err(Error::NotFound(hash.to_hex()));
        }
        let compressed = fs::read(&path)?;
        let framed = codec::decompress(&compressed)?;
        let object = Object::parse(&framed)?;
        Ok((object.kind, object.payload))
    }
}
