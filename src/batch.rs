//! Directory batch: load and render every entry of the input directory

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::output::Renderer;
use crate::parser::Loader;

/// Outcome counts for one batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Entries that loaded and were rendered
    pub rendered: usize,
    /// Entries that produced no data
    pub skipped: usize,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.rendered + self.skipped
    }
}

/// Process every entry of `dir` (non-recursive, in listing order).
///
/// Only a directory that cannot be listed is an error; per-file failures are
/// logged and skipped.
pub fn run_batch(
    dir: &Path,
    loader: &mut Loader,
    renderer: &Renderer,
    writer: &mut dyn Write,
) -> Result<BatchSummary> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to list input directory: {}", dir.display()))?;

    let mut summary = BatchSummary::default();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("Failed to list input directory: {}", dir.display()))?;
        let path = entry.path();
        let label = entry.file_name().to_string_lossy().into_owned();

        info!("Processing file: {}", path.display());
        match loader.load(&path) {
            Ok(data) => {
                renderer.render(Some(&data), &label, writer)?;
                summary.rendered += 1;
            }
            Err(_) => {
                warn!("No data returned for file: {}", label);
                summary.skipped += 1;
            }
        }
    }

    info!(
        "Processed {} entries: {} displayed, {} skipped",
        summary.total(),
        summary.rendered,
        summary.skipped
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(dir: &Path) -> (BatchSummary, String) {
        let mut out = Vec::new();
        let summary = run_batch(dir, &mut Loader::new(), &Renderer::new(), &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_failures_do_not_stop_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.csv"), "id,name\n1,Al\n").unwrap();
        fs::write(dir.path().join("broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("wide.csv"), "a\n1,2\n").unwrap();
        fs::write(dir.path().join("c.bin"), [0u8, 1, 2]).unwrap();
        fs::write(dir.path().join("notes.txt"), "hello  \n").unwrap();

        let (summary, out) = run(dir.path());

        assert_eq!(summary, BatchSummary { rendered: 2, skipped: 3 });
        assert!(out.contains("Data from a.csv:\n---------------------\nid  name\n 1  Al\n\n"));
        assert!(out.contains("Data from notes.txt:\n---------------------\n- hello\n\n"));
        assert!(!out.contains("c.bin"));
        assert!(!out.contains("broken.json"));
        assert!(!out.contains("wide.csv"));
    }

    #[test]
    fn test_empty_csv_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty.csv"), "").unwrap();

        let (summary, out) = run(dir.path());
        assert_eq!(summary, BatchSummary { rendered: 0, skipped: 1 });
        assert!(out.is_empty());
    }

    #[test]
    fn test_subdirectories_are_not_descended() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("inner.csv"), "x\n1\n").unwrap();

        let (summary, out) = run(dir.path());
        assert_eq!(summary, BatchSummary { rendered: 0, skipped: 1 });
        assert!(out.is_empty());
    }

    #[test]
    fn test_missing_directory_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        let err = run_batch(
            &dir.path().join("input_data"),
            &mut Loader::new(),
            &Renderer::new(),
            &mut out,
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to list input directory"));
    }
}
