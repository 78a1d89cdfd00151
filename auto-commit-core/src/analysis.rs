// change classification - turns the staged file list and diff text into counts

use std::collections::BTreeSet;
use tracing::{debug, warn};

use crate::utils::{base_name, extension_lowercase};

const TEST_MARKERS: &[&str] = &[".test.", ".spec."];
const DOC_EXTENSIONS: &[&str] = &["md", "txt", "rst"];
const SOURCE_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "py", "java"];
const MANIFEST_NAMES: &[&str] = &[
    "package.json",
    "package-lock.json",
    "requirements.txt",
    "Cargo.toml",
    "Cargo.lock",
    "go.mod",
];

/// category labels a change set can carry; only membership matters
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Feat,
    Chore,
}

/// what a single staged path looks like to the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClass {
    Test,
    Documentation,
    Manifest,
    Source,
    Other,
}

impl FileClass {
    pub fn label(&self) -> &'static str {
        match self {
            FileClass::Test => "test",
            FileClass::Documentation => "docs",
            FileClass::Manifest => "manifest",
            FileClass::Source => "source",
            FileClass::Other => "other",
        }
    }
}

/// derived statistics for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeStats {
    /// `+` lines in the diff minus one header per file; may be negative
    pub added_lines: i64,
    /// `-` lines in the diff minus one header per file; may be negative
    pub removed_lines: i64,
    pub test_file_count: usize,
    pub doc_file_count: usize,
    pub file_count: usize,
    pub categories: BTreeSet<Category>,
}

impl ChangeStats {
    pub fn has_category(&self, category: Category) -> bool {
        self.categories.contains(&category)
    }

    pub fn all_documentation(&self) -> bool {
        self.doc_file_count == self.file_count
    }
}

pub fn is_test_file(path: &str) -> bool {
    TEST_MARKERS.iter().any(|marker| path.contains(marker))
}

pub fn is_doc_file(path: &str) -> bool {
    extension_lowercase(path).is_some_and(|ext| DOC_EXTENSIONS.contains(&ext.as_str()))
}

pub fn is_manifest_file(path: &str) -> bool {
    MANIFEST_NAMES.contains(&base_name(path))
}

pub fn is_source_file(path: &str) -> bool {
    extension_lowercase(path).is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext.as_str()))
}

/// the most specific class of a path, for display
pub fn classify_file(path: &str) -> FileClass {
    if is_test_file(path) {
        FileClass::Test
    } else if is_doc_file(path) {
        FileClass::Documentation
    } else if is_manifest_file(path) {
        FileClass::Manifest
    } else if is_source_file(path) {
        FileClass::Source
    } else {
        FileClass::Other
    }
}

/// trim entries and drop blanks, keeping the original order
pub fn normalize_files<S: AsRef<str>>(files: &[S]) -> Vec<&str> {
    files
        .iter()
        .map(|f| f.as_ref().trim())
        .filter(|f| !f.is_empty())
        .collect()
}

/// count diff lines starting with `marker`, headers included
fn count_marker_lines(diff: &str, marker: char) -> usize {
    diff.lines().filter(|line| line.starts_with(marker)).count()
}

/// derive statistics from the staged paths and the staged diff text
pub fn analyze<S: AsRef<str>>(files: &[S], diff: &str) -> ChangeStats {
    let files = normalize_files(files);
    let file_count = files.len();

    let mut test_file_count = 0;
    let mut doc_file_count = 0;
    let mut categories = BTreeSet::new();

    for path in &files {
        if is_test_file(path) {
            test_file_count += 1;
        }
        if is_doc_file(path) {
            doc_file_count += 1;
        }
        if is_manifest_file(path) {
            categories.insert(Category::Chore);
        }
        if is_source_file(path) {
            categories.insert(Category::Feat);
        }
    }

    // each file's `+++`/`---` header is removed by subtracting the file count
    let headers = file_count as i64;
    let added_lines = count_marker_lines(diff, '+') as i64 - headers;
    let removed_lines = count_marker_lines(diff, '-') as i64 - headers;

    if added_lines < 0 || removed_lines < 0 {
        warn!(
            added_lines,
            removed_lines,
            "diff has fewer marker lines than staged files; line counts are approximate"
        );
    }

    let stats = ChangeStats {
        added_lines,
        removed_lines,
        test_file_count,
        doc_file_count,
        file_count,
        categories,
    };
    debug!(?stats, "classified staged changes");
    stats
}
