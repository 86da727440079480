/*!
 * Name-based filtering rules
 *
 * Every decision here is a pure function of a file or directory name; no
 * filesystem access happens in this module.
 */

use std::collections::HashSet;

use glob_match::glob_match;
use once_cell::sync::Lazy;

/// Directory names that are never listed or descended into
pub const IGNORED_DIRECTORIES: &[&str] = &[
    "node_modules",
    "dist",
    "build",
    ".git",
    "$recycle.bin",
    "tree-maker",
    "__pycache__",
];

/// Extensions that always mark a file as binary
pub const BINARY_EXTENSIONS: &[&str] = &[
    // Images
    "ico", "svg", "png", "jpg", "jpeg", "gif", "bmp", "webp",
    // Video
    "mp4", "avi", "mov", "wmv", "flv", "webm", "mkv",
    // Audio
    "mp3", "wav", "flac", "aac", "ogg", "wma",
    // Archives
    "zip", "rar", "7z", "tar", "gz", "bz2",
    // Executables & libraries
    "exe", "dll", "so", "dylib", "bin",
    // Documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx",
    // Databases
    "db", "sqlite", "sqlite3", "mdb", "accdb",
    // Logs, temp & lock files
    "log", "tmp", "temp", "cache", "lock",
    // Python build artifacts
    "pyc", "pyo", "pyd", "whl", "egg",
];

/// Extensions whose files are extracted
pub const TEXT_EXTENSIONS: &[&str] = &[
    "py", "js", "jsx", "ts", "tsx", "html", "css", "scss", "sass", "json", "xml", "yaml", "yml",
    "md", "txt", "sh", "bat", "ps1", "vue", "php", "java", "cpp", "c", "h", "hpp", "cs", "rb",
    "go", "rs", "swift", "kt", "scala", "r", "sql", "pl", "lua", "toml", "ini", "cfg", "conf",
    "env", "gitignore",
];

/// Dependency lock files, matched exactly and case-sensitively
pub const LOCK_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    "composer.lock",
    "Gemfile.lock",
    "Pipfile.lock",
];

/// Well-known configuration files accepted regardless of extension
pub const CONFIG_FILES: &[&str] = &[
    "dockerfile",
    "makefile",
    "gemfile",
    "procfile",
    "webpack.config.js",
    "vite.config.js",
    "rollup.config.js",
    "tsconfig.json",
    "jsconfig.json",
    "package.json",
];

/// Glob patterns for files this tool writes itself
pub const EXCLUDED_FILE_PATTERNS: &[&str] = &["code_extraction_*.txt"];

/// The complete rule set used by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRules {
    /// Lowercased directory names to skip entirely
    pub ignored_directories: HashSet<String>,
    /// Lowercased extensions, without the leading dot, treated as binary
    pub binary_extensions: HashSet<String>,
    /// Lowercased extensions, without the leading dot, treated as text
    pub text_extensions: HashSet<String>,
    /// Exact file names that are never extracted
    pub lock_files: HashSet<String>,
    /// Lowercased file names accepted even without a text extension
    pub config_files: HashSet<String>,
    /// Glob patterns matched against file names; matches are dropped
    pub excluded_file_patterns: Vec<String>,
}

fn lowered(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

impl Default for FilterRules {
    fn default() -> Self {
        Self {
            ignored_directories: lowered(IGNORED_DIRECTORIES),
            binary_extensions: lowered(BINARY_EXTENSIONS),
            text_extensions: lowered(TEXT_EXTENSIONS),
            lock_files: LOCK_FILES.iter().map(|s| s.to_string()).collect(),
            config_files: lowered(CONFIG_FILES),
            excluded_file_patterns: EXCLUDED_FILE_PATTERNS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FilterRules {
    /// Check if a directory should be skipped, ignoring case
    pub fn should_ignore_directory(&self, name: &str) -> bool {
        self.ignored_directories.contains(&name.to_lowercase())
    }

    /// Check if a file name qualifies for extraction
    pub fn is_text_file(&self, name: &str) -> bool {
        if self.lock_files.contains(name) {
            return false;
        }

        let ext = extension_of(name).map(str::to_lowercase);
        if let Some(ext) = &ext {
            if self.binary_extensions.contains(ext) {
                return false;
            }
            if self.text_extensions.contains(ext) {
                return true;
            }
        }

        self.config_files.contains(&name.to_lowercase())
    }

    /// Check if a file name matches one of the excluded patterns
    pub fn is_excluded_file(&self, name: &str) -> bool {
        self.excluded_file_patterns
            .iter()
            .any(|pattern| glob_match(pattern, name))
    }
}

/// Hidden entries are skipped by the traversal before any rule applies
pub fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Extension of a file name, without the dot.
///
/// Leading dots belong to the stem, so `.gitignore` has no extension while
/// `a.tar.gz` has `gz`.
pub fn extension_of(name: &str) -> Option<&str> {
    let stem_start = name.len() - name.trim_start_matches('.').len();
    let rest = &name[stem_start..];
    rest.rfind('.').map(|idx| &rest[idx + 1..])
}

/// Default rules shared by the free-standing predicates
pub static DEFAULT_RULES: Lazy<FilterRules> = Lazy::new(FilterRules::default);

/// Check a directory name against the default ignore set
pub fn should_ignore_directory(name: &str) -> bool {
    DEFAULT_RULES.should_ignore_directory(name)
}

/// Check a file name against the default text-file rules
pub fn is_text_file(name: &str) -> bool {
    DEFAULT_RULES.is_text_file(name)
}
