use ::scraper::error::SelectorErrorKind;
use std::num::{ParseFloatError, ParseIntError};
use std::path::PathBuf;

/// All errors that can occur while scraping, staging or loading results.
#[derive(thiserror::Error, Debug)]
pub enum BassError {
    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The HTTP client could not be constructed from the configuration.
    #[error("failed to build http client: {0}")]
    Client(reqwest::Error),

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        url: String,
        source: reqwest::Error,
    },

    /// A CSS selector string could not be parsed.
    #[error("invalid CSS selector: {0}")]
    Selector(String),

    /// Failed to parse an integer from scraped text.
    #[error("failed to parse integer: {0}")]
    IntParse(#[from] ParseIntError),

    /// Failed to parse a weight from scraped text.
    #[error("failed to parse number: {0}")]
    FloatParse(#[from] ParseFloatError),

    /// Failed to parse a tournament date.
    #[error("failed to parse date: {0}")]
    DateParse(#[from] chrono::ParseError),

    /// A page was parsed but lacks a metadata field needed downstream.
    #[error("tournament page is missing {field}")]
    MissingMetadata { field: &'static str },

    /// Reading or writing a file failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A links or staging file held invalid JSON.
    #[error("invalid json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A staged file could not be loaded.
    #[error("failed to load {}: {source}", path.display())]
    Staging {
        path: PathBuf,
        source: Box<BassError>,
    },

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl<'a> From<SelectorErrorKind<'a>> for BassError {
    fn from(err: SelectorErrorKind<'a>) -> Self {
        BassError::Selector(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BassError>;
