/*!
 * ASCII tree rendering of a scanned directory
 */

use std::io::{self, Write};

use crate::types::{DirectoryNode, Entry};
use crate::writer::ReportSink;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Marker emitted in place of the children of an unlistable directory
pub const ACCESS_DENIED: &str = "[Access Denied]";

/// Renders a `DirectoryNode` as box-drawing tree lines
pub struct TreeRenderer<'a> {
    root: &'a DirectoryNode,
}

impl<'a> TreeRenderer<'a> {
    /// Create a renderer for `root`
    pub fn new(root: &'a DirectoryNode) -> Self {
        Self { root }
    }

    /// All tree lines, without trailing newlines.
    ///
    /// The root itself is not printed; its children start at column zero.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        render_level(self.root, "", &mut lines);
        lines
    }

    /// Write every tree line to the sink
    pub fn write_to<W: Write>(&self, sink: &mut ReportSink<W>) -> io::Result<()> {
        for line in self.lines() {
            sink.write_line(&line)?;
        }
        Ok(())
    }
}

fn render_level(dir: &DirectoryNode, prefix: &str, lines: &mut Vec<String>) {
    if dir.access_denied {
        lines.push(format!("{prefix}{LAST_BRANCH}{ACCESS_DENIED}"));
        return;
    }

    let entries: Vec<Entry<'_>> = dir.entries().collect();
    let count = entries.len();

    for (index, entry) in entries.into_iter().enumerate() {
        let last = index + 1 == count;
        let (connector, extension) = if last {
            (LAST_BRANCH, SPACE)
        } else {
            (BRANCH, PIPE)
        };

        lines.push(format!("{prefix}{connector}{}", entry.name()));

        if let Entry::Directory(child) = entry {
            render_level(child, &format!("{prefix}{extension}"), lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileNode;
    use std::path::PathBuf;

    fn file(name: &str) -> FileNode {
        FileNode::new(name, PathBuf::from(name))
    }

    fn dir(name: &str, directories: Vec<DirectoryNode>, files: Vec<FileNode>) -> DirectoryNode {
        DirectoryNode {
            name: name.to_string(),
            path: PathBuf::from(name),
            directories,
            files,
            ..Default::default()
        }
    }

    #[test]
    fn test_connectors_and_prefixes() {
        let root = dir(
            "root",
            vec![
                dir("docs", vec![], vec![file("guide.md")]),
                dir("src", vec![dir("util", vec![], vec![file("mod.rs")])], vec![file("main.rs")]),
            ],
            vec![file("README.md")],
        );

        let lines = TreeRenderer::new(&root).lines();
        assert_eq!(
            lines,
            vec![
                "├── docs",
                "│   └── guide.md",
                "├── src",
                "│   ├── util",
                "│   │   └── mod.rs",
                "│   └── main.rs",
                "└── README.md",
            ]
        );
    }

    #[test]
    fn test_last_directory_uses_blank_extension() {
        let root = dir("root", vec![dir("only", vec![], vec![file("a.py"), file("b.py")])], vec![]);
        assert_eq!(
            TreeRenderer::new(&root).lines(),
            vec!["└── only", "    ├── a.py", "    └── b.py"]
        );
    }

    #[test]
    fn test_access_denied_is_scoped_to_subtree() {
        let mut locked = dir("locked", vec![], vec![]);
        locked.access_denied = true;
        let root = dir("root", vec![locked, dir("open", vec![], vec![file("x.rs")])], vec![]);

        assert_eq!(
            TreeRenderer::new(&root).lines(),
            vec!["├── locked", "│   └── [Access Denied]", "└── open", "    └── x.rs"]
        );
    }

    #[test]
    fn test_denied_root() {
        let mut root = dir("root", vec![], vec![]);
        root.access_denied = true;
        assert_eq!(TreeRenderer::new(&root).lines(), vec!["└── [Access Denied]"]);
    }

    #[test]
    fn test_empty_tree() {
        let root = dir("root", vec![], vec![]);
        assert!(TreeRenderer::new(&root).lines().is_empty());

        let mut sink = ReportSink::new(Vec::new());
        TreeRenderer::new(&root).write_to(&mut sink).unwrap();
        assert!(sink.into_inner().unwrap().is_empty());
    }
}
