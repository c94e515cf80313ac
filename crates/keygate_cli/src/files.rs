//! File collection and reading utilities.
//!
//! Walks directories with gitignore support, keeps only scannable source
//! extensions, and applies the configured ignore globs.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Extensions keygate scans. Everything else ships through the build
/// untouched by application code, so scanning it is wasted work.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx"];

/// Directories that never contain first-party source.
const EXCLUDED_DIRS: &[&str] = &["node_modules", "dist", "build", ".next", "coverage", ".git"];

/// Walks the given paths, collecting scannable source files while honouring
/// gitignore rules and the ignore globs from configuration and flags.
pub fn collect_files(
    paths: &[PathBuf],
    ignore_globs: &[String],
    respect_gitignore: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let glob_set = build_glob_set(ignore_globs)?;
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            if has_source_extension(path) && !glob_set.is_match(path) {
                files.push(path.clone());
            }
            continue;
        }

        let walker = build_walker(path, respect_gitignore);
        let (tx, rx) = std::sync::mpsc::channel();
        walker.run(|| {
            let tx = tx.clone();
            let glob_set = glob_set.clone();
            Box::new(move |result| {
                if let Ok(entry) = result
                    && is_scannable(&entry, &glob_set)
                {
                    let _ = tx.send(entry.into_path());
                }
                ignore::WalkState::Continue
            })
        });
        drop(tx);
        files.extend(rx);
    }

    files.sort();
    Ok(files)
}

fn is_scannable(entry: &ignore::DirEntry, glob_set: &GlobSet) -> bool {
    entry.file_type().is_some_and(|ft| ft.is_file())
        && has_source_extension(entry.path())
        && !in_excluded_dir(entry.path())
        && !glob_set.is_match(entry.path())
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

fn in_excluded_dir(path: &Path) -> bool {
    path.iter()
        .filter_map(|s| s.to_str())
        .any(|segment| EXCLUDED_DIRS.contains(&segment))
}

fn build_glob_set(globs: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in globs {
        let glob = Glob::new(pattern).with_context(|| format!("invalid ignore glob '{pattern}'"))?;
        builder.add(glob);
    }
    builder.build().context("failed to build ignore globs")
}

fn build_walker(path: &Path, respect_gitignore: bool) -> ignore::WalkParallel {
    WalkBuilder::new(path)
        .hidden(false)
        .git_ignore(respect_gitignore)
        .git_global(respect_gitignore)
        .git_exclude(respect_gitignore)
        .build_parallel()
}

/// Reads a file as UTF-8 text, returning `None` if it exceeds `max_size`,
/// does not exist, or is not valid UTF-8.
#[must_use]
pub fn read_text_file(path: &Path, max_size: Option<u64>) -> Option<String> {
    if let Some(max) = max_size {
        let len = std::fs::metadata(path).ok()?.len();
        if len > max {
            return None;
        }
    }
    std::fs::read_to_string(path).ok()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::{NamedTempFile, TempDir};

    use super::*;

    #[test]
    fn collect_files_keeps_only_source_extensions() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.ts"), "export {}").unwrap();
        std::fs::write(dir.path().join("page.tsx"), "export {}").unwrap();
        std::fs::write(dir.path().join("notes.md"), "# notes").unwrap();
        std::fs::write(dir.path().join("style.css"), "body {}").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &[], true).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|path| has_source_extension(path)));
    }

    #[test]
    fn collect_files_skips_dependency_and_output_dirs() {
        let dir = TempDir::new().unwrap();
        for sub in ["node_modules/pkg", "dist", ".next/static", "src"] {
            std::fs::create_dir_all(dir.path().join(sub)).unwrap();
        }
        std::fs::write(dir.path().join("node_modules/pkg/index.js"), "x").unwrap();
        std::fs::write(dir.path().join("dist/bundle.js"), "x").unwrap();
        std::fs::write(dir.path().join(".next/static/chunk.js"), "x").unwrap();
        std::fs::write(dir.path().join("src/app.ts"), "x").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &[], true).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("src/app.ts"));
    }

    #[test]
    fn collect_files_applies_ignore_globs() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("app.ts"), "x").unwrap();
        std::fs::write(dir.path().join("app.test.ts"), "x").unwrap();

        let globs = vec!["**/*.test.ts".to_string()];
        let files = collect_files(&[dir.path().to_path_buf()], &globs, true).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("app.ts"));
    }

    #[test]
    fn collect_files_rejects_invalid_glob() {
        let dir = TempDir::new().unwrap();
        let globs = vec!["a[".to_string()];
        assert!(collect_files(&[dir.path().to_path_buf()], &globs, true).is_err());
    }

    #[test]
    fn collect_files_direct_file_path() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("single.tsx");
        std::fs::write(&file, "x").unwrap();

        let files = collect_files(&[file], &[], true).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn collect_files_direct_non_source_file_skipped() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("readme.md");
        std::fs::write(&file, "x").unwrap();

        let files = collect_files(&[file], &[], true).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn collect_files_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = collect_files(&[dir.path().to_path_buf()], &[], true).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn collect_files_nested_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("src").join("components").join("nav");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("Nav.tsx"), "x").unwrap();

        let files = collect_files(&[dir.path().to_path_buf()], &[], true).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn read_text_file_success() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "hello world").unwrap();

        let content = read_text_file(file.path(), None);
        assert!(content.unwrap().contains("hello world"));
    }

    #[test]
    fn read_text_file_nonexistent() {
        assert!(read_text_file(Path::new("/nonexistent/file.ts"), None).is_none());
    }

    #[test]
    fn read_text_file_exceeds_size_limit() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", "x".repeat(1000)).unwrap();

        assert!(read_text_file(file.path(), Some(500)).is_none());
        assert!(read_text_file(file.path(), Some(1000)).is_some());
    }
}
