pub mod defaults {
    use crate::ServiceConfig;
    use std::path::Path;
    use tokio::time::Duration;

    pub fn short_timeout() -> Duration {
        Duration::from_secs(1)
    }

    pub fn test_config(scratch_dir: &Path) -> ServiceConfig {
        ServiceConfig::default().with_scratch_dir(scratch_dir)
    }

    /// Entries left behind in a scratch directory
    pub fn leftover_files(scratch_dir: &Path) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(scratch_dir)
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }
}
