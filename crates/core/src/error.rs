#[derive(Debug, thiserror::Error)]
pub enum PcrError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to read report file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write report file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to serialize report: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize report at `{path}`: {source}")]
    Deserialization {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to deserialize YAML at `{path}`: {source}")]
    YamlDeserialization {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("unknown report section: {0}")]
    UnknownSection(String),
    #[error("report not found: {0}")]
    NotFound(String),
}

pub type PcrResult<T> = std::result::Result<T, PcrError>;
