/*!
 * Content extraction
 *
 * Copies the text of every file in a scanned tree into the report. A file
 * that cannot be sniffed or read is recorded in the report and the walk
 * carries on; only failures of the report sink itself are returned.
 */

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::filter::FilterRules;
use crate::scanner::Scanner;
use crate::types::{DirectoryNode, FileOutcome};
use crate::writer::ReportSink;

/// Number of leading bytes inspected by the binary sniffer
pub const SNIFF_LEN: usize = 1024;

/// Running totals for one extraction walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Files visited, whatever their outcome
    pub files_visited: usize,
    /// Files whose content was copied
    pub extracted: usize,
    /// Files skipped by content sniffing
    pub skipped_binary: usize,
    /// Files that could not be read
    pub errors: usize,
}

impl ExtractionStats {
    fn record(&mut self, outcome: FileOutcome) {
        self.files_visited += 1;
        match outcome {
            FileOutcome::Extracted => self.extracted += 1,
            FileOutcome::SkippedBinary => self.skipped_binary += 1,
            FileOutcome::Failed => self.errors += 1,
        }
    }
}

/// Check whether a leading chunk of a file looks binary.
///
/// A null byte or an invalid UTF-8 sequence marks the chunk as binary. A
/// multi-byte character cut off by the end of a full window is not invalid.
pub fn looks_binary(chunk: &[u8]) -> bool {
    if chunk.contains(&0) {
        return true;
    }
    match std::str::from_utf8(chunk) {
        Ok(_) => false,
        Err(e) => !(e.error_len().is_none() && chunk.len() == SNIFF_LEN),
    }
}

fn sniff(path: &Path) -> io::Result<bool> {
    let mut chunk = Vec::with_capacity(SNIFF_LEN);
    File::open(path)?
        .take(SNIFF_LEN as u64)
        .read_to_end(&mut chunk)?;
    Ok(looks_binary(&chunk))
}

/// Check if a file is binary by reading its first bytes.
///
/// Files that cannot be opened or read count as binary.
pub fn is_binary_file(path: &Path) -> bool {
    sniff(path).unwrap_or_else(|e| {
        debug!("Treating unreadable {} as binary: {}", path.display(), e);
        true
    })
}

/// Convert CRLF and lone CR line endings to LF
pub fn normalize_newlines(content: &str) -> Cow<'_, str> {
    if !content.contains('\r') {
        return Cow::Borrowed(content);
    }
    Cow::Owned(content.replace("\r\n", "\n").replace('\r', "\n"))
}

/// Write one file's block to the sink.
///
/// Binary files get a skip marker, unreadable files an `ERROR:` line. The
/// returned error is always a sink failure.
pub fn extract_file_content<W: Write>(
    path: &Path,
    sink: &mut ReportSink<W>,
) -> io::Result<FileOutcome> {
    match sniff(path) {
        Ok(false) => {}
        Ok(true) => {
            debug!("Skipping binary content in {}", path.display());
            sink.write_binary_skip(path)?;
            return Ok(FileOutcome::SkippedBinary);
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("File vanished before it could be read: {}", path.display());
            sink.write_file_error(path, &e.to_string())?;
            return Ok(FileOutcome::Failed);
        }
        Err(e) => {
            debug!("Treating unreadable {} as binary: {}", path.display(), e);
            sink.write_binary_skip(path)?;
            return Ok(FileOutcome::SkippedBinary);
        }
    }

    sink.write_file_header(path)?;

    match fs::read_to_string(path) {
        Ok(content) => {
            sink.write_str(&normalize_newlines(&content))?;
            sink.write_file_footer(path)?;
            Ok(FileOutcome::Extracted)
        }
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            sink.write_file_error(path, &e.to_string())?;
            Ok(FileOutcome::Failed)
        }
    }
}

/// Extractor walking a scanned tree
#[derive(Debug, Default)]
pub struct Extractor {
    stats: ExtractionStats,
}

impl Extractor {
    /// Create a new extractor
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals gathered so far
    pub fn stats(&self) -> &ExtractionStats {
        &self.stats
    }

    /// Write the extraction heading and a block for every file in `tree`,
    /// returning the number of files visited.
    ///
    /// Each directory's own files come before its subdirectories.
    pub fn extract_tree<W: Write>(
        &mut self,
        tree: &DirectoryNode,
        sink: &mut ReportSink<W>,
    ) -> io::Result<usize> {
        sink.write_extraction_heading()?;

        for file in tree.files_depth_first() {
            let outcome = extract_file_content(&file.path, sink)?;
            self.stats.record(outcome);
        }

        Ok(self.stats.files_visited)
    }
}

/// Scan `root` with `rules` and extract every selected file into `sink`.
///
/// Returns the number of files visited.
pub fn walk_and_extract<W: Write>(
    root: &Path,
    rules: &FilterRules,
    sink: &mut ReportSink<W>,
) -> io::Result<usize> {
    let tree = Scanner::new(root, rules.clone()).scan();
    Extractor::new().extract_tree(&tree, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn output(sink: ReportSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_looks_binary() {
        assert!(!looks_binary(b"plain ascii\n"));
        assert!(!looks_binary("héllo wörld".as_bytes()));
        assert!(!looks_binary(b""));
        assert!(looks_binary(b"abc\0def"));
        assert!(looks_binary(&[0x66, 0x6f, 0xff, 0x6f]));
        // Truncated sequence in a short file is invalid
        assert!(looks_binary(&[b'a', 0xc3]));
    }

    #[test]
    fn test_normalize_newlines() {
        assert!(matches!(normalize_newlines("a\nb\n"), Cow::Borrowed(_)));
        assert_eq!(normalize_newlines("a\r\nb\r\n"), "a\nb\n");
        assert_eq!(normalize_newlines("old\rmac\r"), "old\nmac\n");
        assert_eq!(normalize_newlines("mixed\r\n\r\rend"), "mixed\n\n\nend");
    }

    #[test]
    fn test_crlf_source_is_written_with_lf() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("win.bat");
        fs::write(&path, "@echo off\r\necho hi\r\n").unwrap();

        let mut sink = ReportSink::new(Vec::new());
        assert_eq!(
            extract_file_content(&path, &mut sink).unwrap(),
            FileOutcome::Extracted
        );

        let text = output(sink);
        assert!(text.contains("@echo off\necho hi\n"));
        assert!(!text.contains('\r'));
    }

    #[test]
    fn test_split_character_at_window_end() {
        let mut chunk = vec![b'a'; SNIFF_LEN - 1];
        chunk.push(0xc3);
        assert!(!looks_binary(&chunk));

        // An invalid byte is still invalid at the edge
        *chunk.last_mut().unwrap() = 0xff;
        assert!(looks_binary(&chunk));
    }

    #[test]
    fn test_is_binary_file() {
        let dir = tempdir().unwrap();
        let text = dir.path().join("text.txt");
        let nulls = dir.path().join("nulls.txt");
        let latin = dir.path().join("latin.txt");
        let late_null = dir.path().join("late.txt");

        fs::write(&text, "short utf-8 text: ✓\n").unwrap();
        fs::write(&nulls, b"ab\0cd").unwrap();
        fs::write(&latin, [b'c', b'a', b'f', 0xe9]).unwrap();
        let mut late = vec![b'x'; 2048];
        late[1500] = 0;
        fs::write(&late_null, &late).unwrap();

        assert!(!is_binary_file(&text));
        assert!(is_binary_file(&nulls));
        assert!(is_binary_file(&latin));
        // Only the first 1024 bytes are inspected
        assert!(!is_binary_file(&late_null));
        // Unreadable files are binary
        assert!(is_binary_file(&dir.path().join("missing.txt")));
    }

    #[test]
    fn test_extract_text_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.py");
        fs::write(&path, "print('hi')\n").unwrap();

        let mut sink = ReportSink::new(Vec::new());
        let outcome = extract_file_content(&path, &mut sink).unwrap();
        assert_eq!(outcome, FileOutcome::Extracted);

        let text = output(sink);
        let shown = path.display().to_string();
        assert!(text.contains(&format!("FILE: {}", shown)));
        assert!(text.contains("print('hi')\n"));
        assert!(text.contains(&format!("END: {}", shown)));
    }

    #[test]
    fn test_extract_binary_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, [1u8, 0, 2, 0]).unwrap();

        let mut sink = ReportSink::new(Vec::new());
        let outcome = extract_file_content(&path, &mut sink).unwrap();
        assert_eq!(outcome, FileOutcome::SkippedBinary);

        let text = output(sink);
        assert!(text.contains(&format!("SKIPPED BINARY FILE: {}", path.display())));
        assert!(!text.contains("\nFILE: "));
        assert!(!text.contains("END: "));
    }

    #[test]
    fn test_vanished_file_is_an_error_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.txt");

        let mut sink = ReportSink::new(Vec::new());
        let outcome = extract_file_content(&path, &mut sink).unwrap();
        assert_eq!(outcome, FileOutcome::Failed);
        assert!(output(sink).starts_with(&format!("\nERROR: {} - ", path.display())));
    }

    #[test]
    fn test_walk_and_extract_order_and_count() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir(root.join("sub")).unwrap();
        fs::write(root.join("sub").join("inner.rs"), "inner").unwrap();
        fs::write(root.join("B.txt"), "b").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("C.txt"), "c").unwrap();

        let mut sink = ReportSink::new(Vec::new());
        let count = walk_and_extract(root, &FilterRules::default(), &mut sink).unwrap();
        assert_eq!(count, 4);

        let text = output(sink);
        let paths = [
            root.join("a.txt"),
            root.join("B.txt"),
            root.join("C.txt"),
            root.join("sub").join("inner.rs"),
        ];
        let order: Vec<usize> = paths
            .iter()
            .map(|p| text.find(&format!("FILE: {}", p.display())).unwrap())
            .collect();
        let mut sorted = order.clone();
        sorted.sort_unstable();
        assert_eq!(order, sorted);
    }

    #[test]
    fn test_vanished_file_keeps_count() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("a.txt"), "first").unwrap();
        fs::write(root.join("b.txt"), "doomed").unwrap();
        fs::write(root.join("c.txt"), "last").unwrap();

        let tree = Scanner::new(root, FilterRules::default()).scan();
        fs::remove_file(root.join("b.txt")).unwrap();

        let mut extractor = Extractor::new();
        let mut sink = ReportSink::new(Vec::new());
        let count = extractor.extract_tree(&tree, &mut sink).unwrap();

        assert_eq!(count, 3);
        assert_eq!(
            extractor.stats(),
            &ExtractionStats {
                files_visited: 3,
                extracted: 2,
                skipped_binary: 0,
                errors: 1,
            }
        );

        let text = output(sink);
        assert!(text.contains(&format!("ERROR: {} - ", root.join("b.txt").display())));
        assert!(text.contains("last"));
    }
}
