use thiserror::Error;

/// Errors that can occur during recipe import operations
#[derive(Error, Debug)]
pub enum ImportError {
    /// Configuration could not be loaded or deserialized
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// No API key in configuration or environment
    #[error("api_key not set; export MEALIE__API_KEY or add it to config.toml")]
    MissingApiKey,

    /// Recipes directory does not exist
    #[error("Recipes directory not found: {0}")]
    MissingDirectory(String),

    /// HTTP transport failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server rejected a call; carries whatever detail the server returned
    #[error("Server returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Export file was not valid JSON
    #[error("Failed to parse recipe JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem failure while reading exports
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image blob was not valid base64
    #[error("Failed to decode image data: {0}")]
    Image(#[from] base64::DecodeError),

    /// Created recipe came back without a slug
    #[error("No slug in server response for recipe '{0}'")]
    MissingSlug(String),

    /// Flow name in configuration matches no known upload flow
    #[error("Unknown upload flow: {0}")]
    UnknownFlow(String),
}
