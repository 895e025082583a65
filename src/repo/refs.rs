use super::error::{Error, Result};
use crate::cas::Hash;
use log::debug;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// The symbolic pointer selecting the active reference.
pub const HEAD_FILE: &str = "HEAD";
/// The single reference this store supports.
pub const MAIN_REF: &str = "refs/heads/main";

/// Read `HEAD` in the given control directory and resolve it to the current
/// tip hash.  `HEAD` is either symbolic (`ref: <name>`) or a raw hash.
/// Returns None when `HEAD` or the named reference does not exist yet.
pub fn resolve_head(control_dir: &Path) -> Result<Option<Hash>> {
    let head_path = control_dir.join(HEAD_FILE);
    if !head_path.exists() {
        return Ok(None);
    }
    let head = fs::read_to_string(&head_path)?;
    let head = head.trim();
    let tip = match head.strip_prefix("ref: ") {
        Some(name) => {
            let ref_path = control_dir.join(name);
            if !ref_path.exists() {
                return Ok(None);
            }
            fs::read_to_string(&ref_path)?
        }
        None => head.to_string(),
    };
    let tip = tip.trim();
    if tip.is_empty() {
        return Ok(None);
    }
    Ok(Some(Hash::from_hex(tip)?))
}

/// Re-point the `main` reference at a new tip, replacing the old file
/// atomically.
pub fn update_main(control_dir: &Path, hash: &Hash) -> Result<()> {
    let ref_path = control_dir.join(MAIN_REF);
    if let Some(dir) = ref_path.parent() {
        fs::create_dir_all(dir)?;
    }
    let mut tmp = NamedTempFile::new_in(control_dir)?;
    writeln!(tmp, "{}", hash)?;
    tmp.persist(&ref_path).map_err(|e| Error::Io(e.error))?;
    debug!("main -> {}", hash);
    Ok(())
}
