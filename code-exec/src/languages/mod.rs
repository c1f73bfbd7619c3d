//! Language-specific executor implementations

mod python;

pub use python::PythonExecutor;

use std::path::PathBuf;
use which::which;

use crate::error::Error;

/// Locate `cmd` on `PATH`, or accept it as-is when it is already a path.
pub(crate) fn resolve_command(cmd: &str) -> Result<PathBuf, Error> {
    which(cmd).map_err(|e| Error::Spawn {
        command: cmd.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()),
    })
}

#[cfg(test)]
pub(crate) fn skip_if_not_available(tools: &[&str]) -> bool {
    let missing: Vec<_> = tools
        .iter()
        .filter(|tool| which(**tool).is_err())
        .map(|s| (*s).to_string())
        .collect();

    if !missing.is_empty() {
        eprintln!("Skipping test: {} not available", missing.join(", "));
        return true;
    }
    false
}
