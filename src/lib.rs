/*!
 * codedump - Dump a directory tree and the contents of its text files
 *
 * Scans a directory once into a filtered tree, renders that tree as an
 * ASCII view and then concatenates every selected text file into a single
 * plain-text report.
 */

pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod report;
pub mod scanner;
pub mod tree;
pub mod types;
pub mod writer;


use std::time::Instant;

use log::info;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use error::{CodeDumpError, Result};
pub use extractor::{
    extract_file_content, is_binary_file, walk_and_extract, ExtractionStats, Extractor,
};
pub use filter::{is_text_file, should_ignore_directory, FilterRules};
pub use report::{Reporter, RunSummary};
pub use scanner::Scanner;
pub use tree::TreeRenderer;
pub use types::{DirectoryNode, FileNode, FileOutcome};
pub use writer::ReportSink;

/// Produce the full report described by `config`.
///
/// The directory is scanned once; the tree view and the extraction walk are
/// both rendered from that scan. The report file is closed before this
/// returns, on error paths as well.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let start_time = Instant::now();
    info!(
        "Extracting from {} into {}",
        config.target_dir.display(),
        config.output_file.display()
    );

    let tree = Scanner::from_config(config).scan();

    let mut sink = ReportSink::create(&config.output_file, config.echo)?;
    sink.write_document_header(config.started_at, &config.target_dir)?;
    sink.write_tree_heading()?;
    TreeRenderer::new(&tree).write_to(&mut sink)?;

    let mut extractor = Extractor::new();
    let file_count = extractor.extract_tree(&tree, &mut sink)?;
    sink.write_summary(file_count)?;
    sink.into_inner()?;

    info!("Finished: {} files visited", file_count);

    Ok(RunSummary {
        output_file: config.output_file.display().to_string(),
        duration: start_time.elapsed(),
        stats: extractor.stats().clone(),
        denied_directories: tree.denied_count(),
    })
}
