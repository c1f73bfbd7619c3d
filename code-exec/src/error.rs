use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Language not supported: {0}")]
    UnsupportedLanguage(String),

    #[error("Failed to start interpreter {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to prepare script file: {0}")]
    ScriptFile(std::io::Error),

    #[error("Process error: {0}")]
    Process(std::io::Error),

    #[error("History error: {0}")]
    History(String),

    #[error("System error: {0}")]
    System(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
