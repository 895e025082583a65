use super::error::{Error, Result};
use super::tree::FILE_MODE;
use super::{CONTROL_DIR, GIT_DIR};
use crate::cas::{Hash, Kind, Store};
use log::debug;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// A single staged file: `mode kind hash path` in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub mode: String,
    pub kind: Kind,
    pub hash: Hash,
    /// Path relative to the repository root, the entry's unique key.
    pub path: String,
}

impl Entry {
    /// Parse one ledger line.  Lines with fewer than four fields, or fields
    /// that do not parse, yield None; the caller skips them.
    fn parse(line: &str) -> Option<Entry> {
        let mut fields = line.trim().splitn(4, ' ');
        let mode = fields.next()?.to_string();
        let kind = Kind::from_name(fields.next()?).ok()?;
        let hash = Hash::from_hex(fields.next()?).ok()?;
        let path = fields.next()?.to_string();
        if path.is_empty() {
            return None;
        }
        Some(Entry {
            mode,
            kind,
            hash,
            path,
        })
    }

    pub fn render(&self) -> String {
        format!("{} {} {} {}", self.mode, self.kind, self.hash, self.path)
    }
}

/// Output selector for `Index::ls`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsMode {
    /// Just the path column.
    Paths,
    /// The full four-field entry line.
    Stage,
}

/// The staging area: a path-keyed mapping of entries, persisted as a flat
/// text ledger sorted by path.  Re-adding a path overwrites its prior entry.
#[derive(Debug)]
pub struct Index {
    ledger: PathBuf,
    entries: BTreeMap<String, Entry>,
}

impl Index {
    /// Load the ledger at `ledger`; an absent file is an empty index, and
    /// malformed lines are skipped rather than aborting the load.
    pub fn load(ledger: &Path) -> Result<Index> {
        let mut entries = BTreeMap::new();
        if ledger.exists() {
            let text = fs::read_to_string(ledger)?;
            for line in text.lines() {
                if let Some(entry) = Entry::parse(line) {
                    entries.insert(entry.path.clone(), entry);
                }
            }
        }
        Ok(Index {
            ledger: ledger.to_path_buf(),
            entries,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The staged entries, in sorted path order.
    pub fn entries(&self) -> impl Iterator<Item = &Entry> {
        self.entries.values()
    }

    /// Stage each of `paths` (relative to `root`): files become blobs in the
    /// store, directories are walked recursively in natural listing order.
    /// Paths that do not exist are returned as per-path errors and do not
    /// stop the rest of the batch.
    pub fn stage<S: Store>(
        &mut self,
        store: &S,
        root: &Path,
        paths: &[String],
    ) -> Result<Vec<Error>> {
        let mut failures = Vec::new();
        for path in paths {
            let key = normalize(path);
            let full = root.join(&key);
            if !full.exists() {
                failures.push(Error::MissingPath(path.clone()));
                continue;
            }
            if full.is_dir() {
                self.stage_dir(store, root, &key)?;
            } else {
                self.stage_file(store, root, &key)?;
            }
        }
        Ok(failures)
    }

    fn stage_file<S: Store>(&mut self, store: &S, root: &Path, key: &str) -> Result<()> {
        if is_control_path(key) {
            return Ok(());
        }
        let payload = fs::read(root.join(key))?;
        let hash = store.put(Kind::Blob, &payload)?;
        debug!("staged {} as blob {}", key, hash);
        self.entries.insert(
            key.to_string(),
            Entry {
                mode: FILE_MODE.to_string(),
                kind: Kind::Blob,
                hash,
                path: key.to_string(),
            },
        );
        Ok(())
    }

    fn stage_dir<S: Store>(&mut self, store: &S, root: &Path, key: &str) -> Result<()> {
        if is_control_path(key) {
            return Ok(());
        }
        for item in fs::read_dir(root.join(key))? {
            let item = item?;
            let name = item.file_name().to_string_lossy().into_owned();
            if name == CONTROL_DIR || name == GIT_DIR {
                continue;
            }
            let child = if key.is_empty() {
                name
            } else {
                format!("{}/{}", key, name)
            };
            if item.path().is_dir() {
                self.stage_dir(store, root, &child)?;
            } else {
                self.stage_file(store, root, &child)?;
            }
        }
        Ok(())
    }

    /// Write the ledger back out, sorted by path with a trailing newline
    /// when non-empty, replacing the old file atomically so a partial write
    /// cannot corrupt a previously valid ledger.
    pub fn persist(&self) -> Result<()> {
        let mut text = String::new();
        for entry in self.entries.values() {
            text.push_str(&entry.render());
            text.push('\n');
        }
        let dir = self.ledger.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.persist(&self.ledger).map_err(|e| Error::Io(e.error))?;
        debug!("persisted {} index entries", self.entries.len());
        Ok(())
    }

    /// Render the index for `ls_files`.
    pub fn ls(&self, mode: LsMode) -> Vec<String> {
        self.entries
            .values()
            .map(|entry| match mode {
                LsMode::Paths => entry.path.clone(),
                LsMode::Stage => entry.render(),
            })
            .collect()
    }
}

/// Reduce a user-supplied path to a repo-relative key: strip any leading
/// `./` and trailing separators.
fn normalize(path: &str) -> String {
    let mut key = path.trim_start_matches("./").trim_end_matches('/');
    if key == "." {
        key = "";
    }
    key.to_string()
}

/// True for paths inside the control directory or a nested `.git`.
fn is_control_path(key: &str) -> bool {
    key.split('/').any(|seg| seg == CONTROL_DIR || seg == GIT_DIR)
}
