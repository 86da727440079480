/*!
 * Directory scanning
 *
 * Builds the filtered tree that both the tree view and the extraction walk
 * are rendered from. Each directory is listed exactly once, and ignored or
 * hidden directories are dropped before they are ever opened.
 */

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::config::Config;
use crate::filter::{is_hidden, FilterRules};
use crate::types::{DirectoryNode, FileNode};

/// Scanner for directory contents
pub struct Scanner {
    /// Directory the scan starts from
    root: PathBuf,
    /// Selection rules
    rules: FilterRules,
    /// Exact paths that are never reported (the report file itself)
    excluded_paths: Vec<PathBuf>,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(root: impl Into<PathBuf>, rules: FilterRules) -> Self {
        Self {
            root: root.into(),
            rules,
            excluded_paths: Vec::new(),
        }
    }

    /// Scanner for a run configuration; the configured report file is
    /// excluded from the results
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.target_dir.clone(), config.rules.clone())
            .with_excluded_path(config.output_file.clone())
    }

    /// Never report the file at `path`
    pub fn with_excluded_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.excluded_paths.push(path.into());
        self
    }

    /// Scan the root directory and return the filtered tree.
    ///
    /// Listing failures never abort the scan; the affected directory is
    /// returned with `access_denied` set and no children.
    pub fn scan(&self) -> DirectoryNode {
        let name = self
            .root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.root.display().to_string());

        self.scan_directory(&self.root, name)
    }

    fn scan_directory(&self, path: &Path, name: String) -> DirectoryNode {
        let mut node = DirectoryNode {
            name,
            path: path.to_path_buf(),
            ..Default::default()
        };

        let mut subdirs: Vec<(String, PathBuf, bool)> = Vec::new();

        for entry in WalkDir::new(path).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    warn!("Cannot list directory {}: {}", path.display(), e);
                    node.access_denied = true;
                    return node;
                }
                Err(e) => {
                    warn!("Skipping unreadable entry in {}: {}", path.display(), e);
                    continue;
                }
            };

            let entry_name = entry.file_name().to_string_lossy().into_owned();
            let file_type = entry.file_type();
            let linked_dir = file_type.is_symlink() && entry.path().is_dir();

            if file_type.is_dir() || linked_dir {
                if is_hidden(&entry_name) {
                    debug!("Skipping hidden directory {}", entry.path().display());
                    continue;
                }
                if self.rules.should_ignore_directory(&entry_name) {
                    debug!("Pruning ignored directory {}", entry.path().display());
                    continue;
                }
                subdirs.push((entry_name, entry.into_path(), linked_dir));
            } else if self.should_include_file(&entry_name, entry.path()) {
                // Hidden files are still extracted; only the tree view skips them
                node.files.push(FileNode::new(entry_name, entry.into_path()));
            }
        }

        subdirs.sort_by(|a, b| compare_names(&a.0, &b.0));
        node.files.sort_by(|a, b| compare_names(&a.name, &b.name));

        node.directories = subdirs
            .into_iter()
            .map(|(name, path, linked)| {
                if linked {
                    debug!("Not following directory link {}", path.display());
                    DirectoryNode {
                        name,
                        path,
                        symlink: true,
                        ..Default::default()
                    }
                } else {
                    self.scan_directory(&path, name)
                }
            })
            .collect();

        node
    }

    fn should_include_file(&self, name: &str, path: &Path) -> bool {
        if !self.rules.is_text_file(name) {
            return false;
        }
        if self.rules.is_excluded_file(name) || self.excluded_paths.iter().any(|p| p == path) {
            debug!("Skipping generated report {}", path.display());
            return false;
        }
        true
    }
}

/// Case-insensitive name order, ties broken by the exact name so the
/// result never depends on listing order
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
