use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid window name: {0:?}")]
    InvalidWindowName(String),

    #[error("state file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

// commands hand errors to the frontend as plain strings
impl Serialize for Error {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
