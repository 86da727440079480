/*!
 * Report document writer
 *
 * The report is a plain-text, append-only stream. Everything written to it
 * can be mirrored to a second writer (standard output for the CLI).
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};

/// Width of the `=` rule lines separating blocks
pub const RULE_WIDTH: usize = 80;

/// Width of the `-` rule under the tree heading
pub const TREE_RULE_WIDTH: usize = 40;

/// Timestamp layout used in the document header
pub const HEADER_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";

/// An 80-character `=` rule
pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Output sink for the report, optionally echoed to a second writer
pub struct ReportSink<W: Write> {
    /// Primary destination
    out: W,
    /// Mirror destination
    echo: Option<Box<dyn Write>>,
}

impl ReportSink<BufWriter<File>> {
    /// Create the report file at `path`, truncating any existing file
    pub fn create(path: &Path, echo_stdout: bool) -> io::Result<Self> {
        let file = File::create(path)?;
        let sink = Self::new(BufWriter::new(file));
        Ok(if echo_stdout {
            sink.with_echo(Box::new(io::stdout()))
        } else {
            sink
        })
    }
}

impl<W: Write> ReportSink<W> {
    /// Wrap a writer without echoing
    pub fn new(out: W) -> Self {
        Self { out, echo: None }
    }

    /// Mirror everything written to `echo`
    pub fn with_echo(mut self, echo: Box<dyn Write>) -> Self {
        self.echo = Some(echo);
        self
    }

    /// Append text verbatim
    pub fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        if let Some(echo) = self.echo.as_mut() {
            echo.write_all(text.as_bytes())?;
        }
        Ok(())
    }

    /// Append a line followed by a newline
    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.write_str(line)?;
        self.write_str("\n")
    }

    /// Flush both destinations
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        if let Some(echo) = self.echo.as_mut() {
            echo.flush()?;
        }
        Ok(())
    }

    /// Flush and hand back the primary writer
    pub fn into_inner(mut self) -> io::Result<W> {
        self.flush()?;
        Ok(self.out)
    }

    /// Document header: timestamp, root path and a rule
    pub fn write_document_header(&mut self, now: DateTime<Local>, root: &Path) -> io::Result<()> {
        self.write_str(&format!(
            "CODE EXTRACTION - {}\nRoot: {}\n{}\n\n",
            now.format(HEADER_TIMESTAMP),
            root.display(),
            rule()
        ))
    }

    /// Heading above the tree view
    pub fn write_tree_heading(&mut self) -> io::Result<()> {
        self.write_str(&format!(
            "DIRECTORY TREE:\n{}\n",
            "-".repeat(TREE_RULE_WIDTH)
        ))
    }

    /// Heading above the file blocks
    pub fn write_extraction_heading(&mut self) -> io::Result<()> {
        let rule = rule();
        self.write_str(&format!("\n{rule}\nEXTRACTING FILE CONTENTS\n{rule}\n\n"))
    }

    /// Header of an extracted file block
    pub fn write_file_header(&mut self, path: &Path) -> io::Result<()> {
        let rule = rule();
        self.write_str(&format!("\n{rule}\nFILE: {}\n{rule}\n\n", path.display()))
    }

    /// Footer of an extracted file block
    pub fn write_file_footer(&mut self, path: &Path) -> io::Result<()> {
        let rule = rule();
        self.write_str(&format!("\n\n{rule}\nEND: {}\n{rule}\n\n", path.display()))
    }

    /// Marker for a file skipped as binary
    pub fn write_binary_skip(&mut self, path: &Path) -> io::Result<()> {
        let rule = rule();
        self.write_str(&format!(
            "\n{rule}\nSKIPPED BINARY FILE: {}\n{rule}\n\n",
            path.display()
        ))
    }

    /// Error line for a file that could not be read
    pub fn write_file_error(&mut self, path: &Path, message: &str) -> io::Result<()> {
        self.write_str(&format!("\nERROR: {} - {}\n", path.display(), message))
    }

    /// Trailing summary with the number of visited files
    pub fn write_summary(&mut self, file_count: usize) -> io::Result<()> {
        let rule = rule();
        self.write_str(&format!(
            "\n{rule}\nCOMPLETE - {file_count} files extracted\n{rule}\n"
        ))
    }
}
