use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("unknown shell type {0}")]
    UnknownShellType(String),

    #[error(transparent)]
    Generation(#[from] std::io::Error),

    #[error("register flag {flag} for sub-command {command} failed")]
    Registration {
        command: &'static str,
        flag: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CompletionError>;
