//! Staged output.
//!
//! Rendered files are formatted and written into a staging directory inside the
//! output root first; only when every file is staged are they renamed into
//! place. A failure while staging leaves the output tree untouched.
//!
//! Once committed, generated artifacts left over from an earlier run in the same
//! package directories are removed, so a namespace that lost its endpoints does
//! not keep referencing them. Hand-written files are never touched.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use codegen::{all_generators, GENERATED_MARKER};
use tracing::{info, warn};

use crate::formatter::SourceFormatter;
use crate::{PipelineError, Result};

const STAGING_PREFIX: &str = ".metagen-staging-";

/// Format `source` for `dest`, keeping it as rendered when the formatter fails.
fn formatted(formatter: &dyn SourceFormatter, dest: &Path, source: &str) -> String {
    match formatter.format(dest, source) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!(file = %dest.display(), formatter = formatter.name(), error = %e, "formatting failed, keeping rendered source");
            source.to_string()
        }
    }
}

/// Whether `path` holds a file this generator wrote.
fn is_generated(path: &Path) -> bool {
    fs::read_to_string(path).is_ok_and(|source| source.lines().any(|line| line.trim_end() == GENERATED_MARKER))
}

/// Remove generated artifacts under the directories of `files` that `files` no longer contains.
fn remove_stale(output_root: &Path, files: &BTreeMap<PathBuf, String>) -> Result<Vec<PathBuf>> {
    let dirs: BTreeSet<&Path> = files.keys().filter_map(|relative| relative.parent()).collect();
    let mut removed = Vec::new();
    for dir in dirs {
        for generator in all_generators() {
            let relative = dir.join(generator.file_name());
            let dest = output_root.join(&relative);
            if files.contains_key(&relative) || !is_generated(&dest) {
                continue;
            }
            fs::remove_file(&dest).map_err(PipelineError::io(format!("failed to remove {}", dest.display())))?;
            info!(file = %dest.display(), "removed stale artifact");
            removed.push(dest);
        }
    }
    Ok(removed)
}

/// Write `files` (paths relative to `output_root`) and return their final paths.
pub fn commit(
    output_root: &Path,
    files: &BTreeMap<PathBuf, String>,
    formatter: &dyn SourceFormatter,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_root)
        .map_err(PipelineError::io(format!("failed to create {}", output_root.display())))?;
    let staging = tempfile::Builder::new()
        .prefix(STAGING_PREFIX)
        .tempdir_in(output_root)
        .map_err(PipelineError::io("failed to create staging directory"))?;

    for (relative, source) in files {
        let staged = staging.path().join(relative);
        if let Some(parent) = staged.parent() {
            fs::create_dir_all(parent)
                .map_err(PipelineError::io(format!("failed to create {}", parent.display())))?;
        }
        let contents = formatted(formatter, &output_root.join(relative), source);
        fs::write(&staged, contents)
            .map_err(PipelineError::io(format!("failed to stage {}", relative.display())))?;
        logging::trace("staging", &format!("staged {}", relative.display()));
    }

    let mut written = Vec::with_capacity(files.len());
    for relative in files.keys() {
        let dest = output_root.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(PipelineError::io(format!("failed to create {}", parent.display())))?;
        }
        fs::rename(staging.path().join(relative), &dest)
            .map_err(PipelineError::io(format!("failed to commit {}", dest.display())))?;
        written.push(dest);
    }

    let removed = remove_stale(output_root, files)?;
    info!(
        output = %output_root.display(),
        files = written.len(),
        removed = removed.len(),
        "committed generated artifacts"
    );
    Ok(written)
}
