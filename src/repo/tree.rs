use super::error::{Error, Result};
use super::index::Index;
use super::{CONTROL_DIR, GIT_DIR};
use crate::cas::{Hash, Kind, Store};
use std::fs;
use std::path::Path;

/// Permission string for file entries.
pub const FILE_MODE: &str = "100644";
/// Permission string for subdirectory entries.
pub const DIR_MODE: &str = "040000";

/// One line of a tree object's payload: `mode kind hash name`, where `name`
/// is a single path segment relative to the tree's own directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    pub mode: String,
    pub kind: Kind,
    pub hash: Hash,
    pub name: String,
}

impl TreeEntry {
    /// Parse one listing line; short or unparsable lines yield None.
    pub fn parse(line: &str) -> Option<TreeEntry> {
        let mut fields = line.trim().splitn(4, ' ');
        let mode = fields.next()?.to_string();
        let kind = Kind::from_name(fields.next()?).ok()?;
        let hash = Hash::from_hex(fields.next()?).ok()?;
        let name = fields.next()?.to_string();
        if name.is_empty() {
            return None;
        }
        Some(TreeEntry {
            mode,
            kind,
            hash,
            name,
        })
    }

    pub fn render(&self) -> String {
        format!("{} {} {} {}", self.mode, self.kind, self.hash, self.name)
    }
}

/// Parse a tree object's payload into entries, skipping malformed lines
/// the same way the index loader does.
pub fn parse_tree(payload: &[u8]) -> Vec<TreeEntry> {
    String::from_utf8_lossy(payload)
        .lines()
        .filter_map(TreeEntry::parse)
        .collect()
}

/// Build a tree object from the staged index.  Entries are written verbatim
/// as one flat listing in sorted path order; directory nesting is not
/// reconstructed.  Fails with `EmptyIndex` when nothing is staged.
pub fn write_tree_from_index<S: Store>(store: &S, index: &Index) -> Result<Hash> {
    if index.is_empty() {
        return Err(Error::EmptyIndex);
    }
    let mut listing = String::new();
    for entry in index.entries() {
        listing.push_str(&entry.render());
        listing.push('\n');
    }
    Ok(store.put(Kind::Tree, listing.as_bytes())?)
}

/// Build a tree object by scanning a working directory subtree: file
/// children become blobs, subdirectory children recurse into nested tree
/// objects.  The control directory and nested `.git` directories are
/// excluded at every level.  Entry order is the directory listing order.
pub fn write_tree_from_workdir<S: Store>(store: &S, dir: &Path) -> Result<Hash> {
    let mut listing = String::new();
    for item in fs::read_dir(dir)? {
        let item = item?;
        let name = item.file_name().to_string_lossy().into_owned();
        if name == CONTROL_DIR || name == GIT_DIR {
            continue;
        }
        let path = item.path();
        let entry = if path.is_dir() {
            TreeEntry {
                mode: DIR_MODE.to_string(),
                kind: Kind::Tree,
                hash: write_tree_from_workdir(store, &path)?,
                name,
            }
        } else {
            let payload = fs::read(&path)?;
            TreeEntry {
                mode: FILE_MODE.to_string(),
                kind: Kind::Blob,
                hash: store.put(Kind::Blob, &payload)?,
                name,
            }
        };
        listing.push_str(&entry.render());
        listing.push('\n');
    }
    Ok(store.put(Kind::Tree, listing.as_bytes())?)
}
