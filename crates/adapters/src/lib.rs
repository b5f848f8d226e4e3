//! farm-assistant adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `llm`: completion service clients (Anthropic, OpenAI, Ollama, stub)
//! - `dataset`: TOML farm dataset loader (built-in table or a file)
//! - `transcript`: JSONL transcript sink

mod dataset_toml;
mod transcript_jsonl;

pub mod llm;

/// Re-exports for dataset adapters
pub mod dataset {
    pub use crate::dataset_toml::TomlDatasetRepo;
}

/// Re-exports for transcript adapters
pub mod transcript {
    pub use crate::transcript_jsonl::JsonlTranscriptSink;
}
