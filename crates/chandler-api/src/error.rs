use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server returned {status}: {body}")]
    Server { status: u16, body: String },

    /// First entry of a GraphQL `errors` list, with the offending column
    /// when the platform names one.
    #[error("{message}{}", column.as_ref().map(|c| format!(" (column: {c})")).unwrap_or_default())]
    GraphQl {
        message: String,
        column: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
