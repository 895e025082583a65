use super::commit::Commit;
use super::error::{Error, Result};
use super::index::Index;
use super::refs;
use super::tree::{self, TreeEntry};
use super::CONTROL_DIR;
use crate::cas::{self, DiskStore, Hash, Kind, Store};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Fixed committer identity; the store has no identity configuration.
const AUTHOR: &str = "John Doe <john@example.com>";

/// A repository on disk: a working directory whose `.attic` control
/// directory holds the object store, the staging ledger, and references.
///
/// All operations are synchronous and run to completion; the design assumes
/// exactly one invocation touches the repository at a time.
#[derive(Debug)]
pub struct Repository {
    root: PathBuf,
    store: DiskStore,
}

impl Repository {
    /// Initialize a new repository at `root`: create the control directory,
    /// the object store, and a `HEAD` pointing at `refs/heads/main`.
    pub fn init(root: &Path) -> Result<Repository> {
        let control = root.join(CONTROL_DIR);
        if control.is_dir() {
            return Err(Error::AlreadyInitialized);
        }
        fs::create_dir_all(control.join("objects"))?;
        fs::create_dir_all(control.join("refs"))?;
        fs::write(
            control.join(refs::HEAD_FILE),
            format!("ref: {}\n", refs::MAIN_REF),
        )?;
        info!("initialized repository at {}", root.display());
        Ok(Repository::open(root))
    }

    /// Open the repository rooted at `root`.  No validation happens here;
    /// operations fail individually if the control directory is absent.
    pub fn open(root: &Path) -> Repository {
        let control = root.join(CONTROL_DIR);
        Repository {
            root: root.to_path_buf(),
            store: DiskStore::new(control.join("objects")),
        }
    }

    pub fn store(&self) -> &DiskStore {
        &self.store
    }

    pub fn control_dir(&self) -> PathBuf {
        self.root.join(CONTROL_DIR)
    }

    pub fn index_path(&self) -> PathBuf {
        self.control_dir().join("index")
    }

    /// Load the staging index from its ledger.
    pub fn index(&self) -> Result<Index> {
        Index::load(&self.index_path())
    }

    /// Stage paths into the index and persist it.  Missing paths are
    /// returned as per-path errors; they do not abort staging of the rest.
    pub fn add(&self, paths: &[String]) -> Result<Vec<Error>> {
        let mut index = self.index()?;
        let failures = index.stage(&self.store, &self.root, paths)?;
        index.persist()?;
        Ok(failures)
    }

    /// Hash a file as a blob, writing it to the store only when `write` is
    /// set.
    pub fn hash_object(&self, path: &Path, write: bool) -> Result<Hash> {
        let payload = fs::read(self.root.join(path))?;
        if write {
            Ok(self.store.put(Kind::Blob, &payload)?)
        } else {
            Ok(cas::Object::new(Kind::Blob, payload).hash())
        }
    }

    /// Build and store a tree object from the staged index.
    pub fn write_tree(&self) -> Result<Hash> {
        let index = self.index()?;
        tree::write_tree_from_index(&self.store, &index)
    }

    /// Fetch a tree object and parse its entry listing.
    pub fn ls_tree(&self, hash: &Hash) -> Result<Vec<TreeEntry>> {
        let (kind, payload) = self.store.get(hash)?;
        if kind != Kind::Tree {
            return Err(Error::NotATree(hash.to_hex()));
        }
        Ok(tree::parse_tree(&payload))
    }

    /// Snapshot the staged index into a new commit and advance `main` to
    /// it.  The parent is the current tip, when one exists.
    pub fn commit(&self, message: &str) -> Result<Hash> {
        let tree = match self.write_tree() {
            Ok(hash) => hash,
            Err(Error::EmptyIndex) => return Err(Error::NothingToCommit),
            Err(e) => return Err(e),
        };
        let parent = refs::resolve_head(&self.control_dir())?;
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let identity = format!("{} {}", AUTHOR, timestamp);
        let commit = Commit {
            tree,
            parent,
            author: identity.clone(),
            committer: identity,
            message: message.to_string(),
        };
        let hash = self.store.put(Kind::Commit, commit.render().as_bytes())?;
        refs::update_main(&self.control_dir(), &hash)?;
        info!("created commit {}", hash);
        Ok(hash)
    }

    /// Walk the commit chain from the current tip back to the root commit.
    /// Fails with `NoCommits` when `HEAD` or the reference is missing.
    pub fn history(&self) -> Result<History<'_>> {
        match refs::resolve_head(&self.control_dir())? {
            Some(tip) => Ok(History {
                store: &self.store,
                next: Some(tip),
            }),
            None => Err(Error::NoCommits),
        }
    }
}

/// Iterator over the commit chain, tip to root.  A broken link (missing or
/// unparsable commit object) is yielded as an error and terminates the walk.
#[derive(Debug)]
pub struct History<'a> {
    store: &'a DiskStore,
    next: Option<Hash>,
}

impl<'a> Iterator for History<'a> {
    type Item = Result<(Hash, Commit)>;

    fn next(&mut self) -> Option<Self::Item> {
        let hash = self.next.take()?;
        let commit = match fetch_commit(self.store, &hash) {
            Ok(commit) => commit,
            Err(e) => return Some(Err(e)),
        };
        debug!("history: {} -> {:?}", hash, commit.parent);
        self.next = commit.parent.clone();
        Some(Ok((hash, commit)))
    }
}

fn fetch_commit(store: &DiskStore, hash: &Hash) -> Result<Commit> {
    let (kind, payload) = match store.get(hash) {
        Ok(found) => found,
        Err(cas::Error::NotFound(hex)) => return Err(Error::CommitNotFound(hex)),
        Err(e) => return Err(e.into()),
    };
    if kind != Kind::Commit {
        return Err(Error::MalformedCommit(format!(
            "object {} is a {}",
            hash, kind
        )));
    }
    Commit::parse(&payload)
}

#[cfg(test)]
mod tests {
    use super::Repository;
    use crate::cas::Store;
    use crate::repo::Error;
    use std::fs;

    #[test]
    fn init_creates_layout() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();

        assert!(dir.path().join(".attic/objects").is_dir());
        assert!(dir.path().join(".attic/refs").is_dir());
        assert_eq!(
            fs::read_to_string(dir.path().join(".attic/HEAD")).unwrap(),
            "ref: refs/heads/main\n"
        );
    }

    #[test]
    fn init_twice_fails() {
        let dir = tempfile::tempdir().unwrap();
        Repository::init(dir.path()).unwrap();
        match Repository::init(dir.path()) {
            Err(Error::AlreadyInitialized) => (),
            other => panic!("expected AlreadyInitialized, got {:?}", other),
        }
    }

    #[test]
    fn commit_with_empty_index_is_nothing_to_commit() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        match repo.commit("nope") {
            Err(Error::NothingToCommit) => (),
            other => panic!("expected NothingToCommit, got {:?}", other),
        }
        // no reference was moved
        assert!(!dir.path().join(".attic/refs/heads/main").exists());
    }

    #[test]
    fn commit_chain_links_parents() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let file = dir.path().join("file.txt");

        fs::write(&file, "one").unwrap();
        repo.add(&["file.txt".to_string()]).unwrap();
        let first = repo.commit("first").unwrap();

        fs::write(&file, "two").unwrap();
        repo.add(&["file.txt".to_string()]).unwrap();
        let second = repo.commit("second").unwrap();
        assert_ne!(first, second);

        let entries: Vec<_> = repo
            .history()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0, second);
        assert_eq!(entries[0].1.parent, Some(first.clone()));
        assert_eq!(entries[1].0, first);
        assert_eq!(entries[1].1.parent, None);
    }

    #[test]
    fn history_without_commits_fails() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        match repo.history() {
            Err(Error::NoCommits) => (),
            other => panic!("expected NoCommits, got {:?}", other),
        }
    }

    #[test]
    fn hash_object_without_write_leaves_store_empty() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        fs::write(dir.path().join("f"), "hi").unwrap();

        let dry = repo.hash_object(std::path::Path::new("f"), false).unwrap();
        assert_eq!(dry.to_hex(), "32f95c0d1244a78b2be1bab8de17906fabb2c4a8");
        assert!(repo.store().get(&dry).is_err());

        let wet = repo.hash_object(std::path::Path::new("f"), true).unwrap();
        assert_eq!(dry, wet);
        assert_eq!(repo.store().get(&wet).unwrap().1, b"hi");
    }

    #[test]
    fn ls_tree_rejects_non_tree() {
        let dir = tempfile::tempdir().unwrap();
        let repo = Repository::init(dir.path()).unwrap();
        let blob = repo.store().put(crate::cas::Kind::Blob, b"hi").unwrap();
        match repo.ls_tree(&blob) {
            Err(Error::NotATree(_)) => (),
            other => panic!("expected NotATree, got {:?}", other),
        }
    }
}
