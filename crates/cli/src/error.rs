#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Defines(#[from] env_defines::Error),
    #[error("failed to create {}: {source}", path.display())]
    CreateOutput {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
