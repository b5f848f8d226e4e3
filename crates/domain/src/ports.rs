//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::dataset::FarmDataset;
use crate::model::{Category, ConversationTurn, Metric, RecordKind};

/// Error type for completion service calls
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Timeout")]
    Timeout,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Port for the external text-completion service
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a single user-role prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Provider name for logs and diagnostics
    fn provider(&self) -> &'static str;
}

#[async_trait]
impl<T: CompletionClient + ?Sized> CompletionClient for &T {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        (**self).complete(prompt).await
    }

    fn provider(&self) -> &'static str {
        (**self).provider()
    }
}

/// Error type for loading the farm dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error in {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Duplicate entry for {category} / {metric}")]
    DuplicateEntry { category: Category, metric: Metric },
    #[error("{category} / {metric} expects a {expected} record, found {actual}")]
    KindMismatch {
        category: Category,
        metric: Metric,
        expected: RecordKind,
        actual: RecordKind,
    },
}

/// Port for loading the farm dataset
#[async_trait]
pub trait DatasetRepo: Send + Sync {
    /// Load and validate the dataset
    async fn load(&self) -> Result<FarmDataset, DatasetError>;

    /// Human-readable description of where the data comes from
    fn source_name(&self) -> String;
}

/// Error type for transcript sinks
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Port for recording transcript turns outside the process
#[async_trait]
pub trait TranscriptSink: Send + Sync {
    async fn record(&self, session_id: &str, turn: &ConversationTurn)
    -> Result<(), TranscriptError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
