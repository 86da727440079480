/*!
 * Core types and data structures for codedump
 */

use std::path::PathBuf;

use crate::filter::{extension_of, is_hidden};

/// A directory that survived filtering
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Subdirectories, sorted case-insensitively
    pub directories: Vec<DirectoryNode>,
    /// Candidate text files, sorted case-insensitively; hidden ones included
    pub files: Vec<FileNode>,
    /// The directory could not be listed
    pub access_denied: bool,
    /// The directory is reached through a symbolic link and was not descended
    pub symlink: bool,
}

/// A file selected by the name rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name
    pub name: String,
    /// Absolute path
    pub path: PathBuf,
    /// Lowercased extension without the dot
    pub extension: Option<String>,
    /// Name starts with a dot; extracted but left out of the tree view
    pub hidden: bool,
}

impl FileNode {
    /// Create a node, deriving the extension and hidden flag from `name`
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let name = name.into();
        Self {
            extension: extension_of(&name).map(str::to_lowercase),
            hidden: is_hidden(&name),
            path: path.into(),
            name,
        }
    }
}

/// What happened to a single file during extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Content copied into the report
    Extracted,
    /// Content sniffing found binary data
    SkippedBinary,
    /// The file could not be read
    Failed,
}

/// A child of a directory in render order
#[derive(Debug, Clone, Copy)]
pub enum Entry<'a> {
    /// Subdirectory
    Directory(&'a DirectoryNode),
    /// File
    File(&'a FileNode),
}

impl<'a> Entry<'a> {
    /// Display name of the entry
    pub fn name(&self) -> &'a str {
        match *self {
            Entry::Directory(dir) => &dir.name,
            Entry::File(file) => &file.name,
        }
    }
}

impl DirectoryNode {
    /// Children in tree order: directories first, then visible files
    pub fn entries(&self) -> impl Iterator<Item = Entry<'_>> {
        self.directories.iter().map(Entry::Directory).chain(
            self.files
                .iter()
                .filter(|file| !file.hidden)
                .map(Entry::File),
        )
    }

    /// Files in extraction order: a directory's own files (hidden ones too),
    /// then each subdirectory in turn
    pub fn files_depth_first(&self) -> Vec<&FileNode> {
        let mut out = Vec::new();
        self.collect_files(&mut out);
        out
    }

    fn collect_files<'a>(&'a self, out: &mut Vec<&'a FileNode>) {
        out.extend(self.files.iter());
        for dir in &self.directories {
            dir.collect_files(out);
        }
    }

    /// Number of directories in this subtree that could not be listed
    pub fn denied_count(&self) -> usize {
        let own = usize::from(self.access_denied);
        own + self
            .directories
            .iter()
            .map(DirectoryNode::denied_count)
            .sum::<usize>()
    }
}
