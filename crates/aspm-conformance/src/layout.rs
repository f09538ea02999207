//! Generated-code layout check.
//!
//! Lists whether each expected package directory exists under the generated
//! code root. Informational only: a missing directory is logged, never failed,
//! since CI checkouts often build without the generated tree in place.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// One expected package directory and whether it was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    pub dir: String,
    pub path: PathBuf,
    pub present: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutReport {
    pub root: PathBuf,
    pub entries: Vec<LayoutEntry>,
}

impl LayoutReport {
    pub fn missing(&self) -> impl Iterator<Item = &LayoutEntry> {
        self.entries.iter().filter(|e| !e.present)
    }

    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.present)
    }
}

pub fn check_generated_layout<I, S>(root: impl AsRef<Path>, expected_dirs: I) -> LayoutReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let root = root.as_ref();
    let entries = expected_dirs
        .into_iter()
        .map(|dir| {
            let dir = dir.as_ref();
            let path = root.join(dir);
            let present = path.is_dir();
            info!(path = %path.display(), present, "checking generated package directory");
            LayoutEntry {
                dir: dir.to_owned(),
                path,
                present,
            }
        })
        .collect();

    LayoutReport {
        root: root.to_path_buf(),
        entries,
    }
}
