use std::io::Write;
use std::path::Path;

use tempfile::{Builder, NamedTempFile};
use tracing::{debug, warn};

use crate::error::Error;

/// Temporary file holding the source of a single execution.
///
/// Each file gets a random name, so concurrent executions never share one.
/// The file is removed by [`ScriptFile::remove`] on the normal path and by
/// `Drop` if the owning call unwinds or is cancelled first.
pub struct ScriptFile {
    file: NamedTempFile,
}

impl ScriptFile {
    pub fn create(dir: Option<&Path>, extension: &str, code: &str) -> Result<Self, Error> {
        let suffix = format!(".{}", extension);
        let mut builder = Builder::new();
        builder.prefix("snippet-").suffix(&suffix);

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(Error::ScriptFile)?;

        file.write_all(code.as_bytes()).map_err(Error::ScriptFile)?;
        file.flush().map_err(Error::ScriptFile)?;

        debug!("Wrote script file: {}", file.path().display());
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file. Failures are logged, never returned.
    pub fn remove(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            warn!("Failed to remove script file {}: {}", path.display(), e);
        }
    }
}
