//! Post-processing of rendered Go files.
//!
//! Formatting and import resolution are delegated to an external tool. A
//! formatter failure never aborts a run: the file is kept as rendered and the
//! failure is logged.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use config::FormatterKind;
use thiserror::Error;

/// Why a formatter could not format a file.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The formatter process could not be run or talked to.
    #[error("failed to run {binary}: {source}")]
    Process {
        /// Formatter binary.
        binary: String,
        /// The underlying failure.
        source: std::io::Error,
    },
    /// The formatter rejected the source.
    #[error("{binary} failed: {stderr}")]
    Rejected {
        /// Formatter binary.
        binary: String,
        /// What the formatter printed.
        stderr: String,
    },
    /// The formatter printed something that is not UTF-8.
    #[error("formatter output is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Text in, formatted text out.
pub trait SourceFormatter {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Format `source`, which will be written to `file`.
    fn format(&self, file: &Path, source: &str) -> Result<String, FormatError>;
}

/// Leaves sources untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopFormatter;

impl SourceFormatter for NoopFormatter {
    fn name(&self) -> &str { "none" }

    fn format(&self, _file: &Path, source: &str) -> Result<String, FormatError> { Ok(source.to_string()) }
}

/// Pipes each file through `goimports`.
#[derive(Debug, Clone)]
pub struct GoImportsFormatter {
    binary: String,
}

impl Default for GoImportsFormatter {
    fn default() -> Self { Self { binary: "goimports".to_string() } }
}

impl GoImportsFormatter {
    /// Use `binary` instead of `goimports` from `PATH`.
    pub fn with_binary(binary: impl Into<String>) -> Self { Self { binary: binary.into() } }
}

impl SourceFormatter for GoImportsFormatter {
    fn name(&self) -> &str { &self.binary }

    fn format(&self, file: &Path, source: &str) -> Result<String, FormatError> {
        let mut cmd = Command::new(&self.binary);
        // Resolve imports as if the file were already in place.
        if let Some(dir) = file.parent() {
            cmd.arg("-srcdir").arg(dir);
        }
        let process = |source| FormatError::Process { binary: self.binary.clone(), source };
        let mut child = cmd
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(process)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).map_err(process)?;
        }
        let output = child.wait_with_output().map_err(process)?;
        if !output.status.success() {
            return Err(FormatError::Rejected {
                binary: self.binary.clone(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// The formatter selected by `kind`.
pub fn formatter_for(kind: FormatterKind) -> Box<dyn SourceFormatter> {
    match kind {
        FormatterKind::Goimports => Box::new(GoImportsFormatter::default()),
        FormatterKind::None => Box::new(NoopFormatter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_formatter() {
        let source = "package coinbasepro\n";
        let formatted = NoopFormatter.format(Path::new("web/coinbasepro/path.go"), source).expect("noop");
        assert_eq!(formatted, source);
    }

    #[test]
    fn test_missing_binary_is_an_error() {
        let formatter = GoImportsFormatter::with_binary("metagen-no-such-formatter");
        let err = formatter
            .format(Path::new("web/coinbasepro/path.go"), "package coinbasepro\n")
            .expect_err("binary is missing");
        assert!(matches!(err, FormatError::Process { ref binary, .. } if binary == "metagen-no-such-formatter"));
    }

    #[test]
    fn test_formatter_for() {
        assert_eq!(formatter_for(FormatterKind::None).name(), "none");
        assert_eq!(formatter_for(FormatterKind::Goimports).name(), "goimports");
    }
}
