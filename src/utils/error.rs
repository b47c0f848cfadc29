use thiserror::Error;

#[derive(Error, Debug)]
pub enum DappError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Hex decoding error: {0}")]
    HexError(#[from] hex::FromHexError),

    /// 節點回傳的 JSON-RPC error 物件，原樣保留
    #[error("{message}")]
    RpcError { code: i64, message: String },

    #[error("Unexpected RPC response: {message}")]
    ResponseError { message: String },

    #[error("ABI error: {message}")]
    AbiError { message: String },

    #[error("Invalid address: {value}")]
    InvalidAddressError { value: String },

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmountError { value: String, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("No option at index {index} in '{list}'")]
    SelectionError { list: String, index: usize },
}

pub type Result<T> = std::result::Result<T, DappError>;
