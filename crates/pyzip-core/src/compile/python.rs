//! Bytecode backend running `compileall` in an external interpreter.

use super::BytecodeBackend;
use crate::PackError;
use crate::Result;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

/// Interpreter used when none is configured.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Compiles sources with `<interpreter> -m compileall`.
///
/// Files are written in the legacy layout (`mod.pyc` next to `mod.py`) with
/// unchecked-hash invalidation, so the bytecode does not depend on source
/// timestamps. Recorded source paths are relative to the compiled tree.
///
/// # Examples
///
/// ```
/// use pyzip_core::compile::PythonBackend;
///
/// let backend = PythonBackend::new("/usr/bin/python3.13");
/// assert_eq!(backend.interpreter().to_str(), Some("/usr/bin/python3.13"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PythonBackend {
    interpreter: PathBuf,
}

impl PythonBackend {
    /// Creates a backend that runs `interpreter`.
    #[must_use]
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        Self {
            interpreter: interpreter.into(),
        }
    }

    /// The interpreter this backend runs.
    #[must_use]
    pub fn interpreter(&self) -> &Path {
        &self.interpreter
    }

    fn command(&self, dir: &Path) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.args(["-m", "compileall", "-b", "-q", "-f"])
            .args(["--invalidation-mode", "unchecked-hash"])
            .arg("-s")
            .arg(dir)
            .arg(dir);
        cmd
    }
}

impl Default for PythonBackend {
    fn default() -> Self {
        Self::new(DEFAULT_INTERPRETER)
    }
}

impl BytecodeBackend for PythonBackend {
    fn compile_dir(&self, dir: &Path) -> Result<()> {
        tracing::debug!(
            interpreter = %self.interpreter.display(),
            dir = %dir.display(),
            "running compileall"
        );

        let output = self.command(dir).output().map_err(|e| PackError::Compiler {
            reason: format!("cannot run {}: {e}", self.interpreter.display()),
        })?;

        // compileall exits with 1 when some files failed to compile; those are
        // detected later by their missing .pyc. Anything else is a usage error.
        match output.status.code() {
            Some(0) => Ok(()),
            Some(1) => {
                for line in String::from_utf8_lossy(&output.stdout).lines() {
                    if !line.trim().is_empty() {
                        tracing::warn!("compileall: {line}");
                    }
                }
                Ok(())
            }
            _ => Err(PackError::Compiler {
                reason: format!(
                    "{} exited with {}: {}",
                    self.interpreter.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            }),
        }
    }
}
