//! JSONL transcript sink: one line per conversation turn

use async_trait::async_trait;
use farm_assistant_domain::{ConversationTurn, Role, TranscriptError, TranscriptSink};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
pub struct JsonlTranscriptSink {
    path: PathBuf,
    file: Arc<Mutex<tokio::fs::File>>,
}

impl JsonlTranscriptSink {
    /// Open (or create) the transcript file in append mode
    pub async fn open(path: PathBuf) -> Result<Self, TranscriptError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Serialize)]
struct TranscriptLine<'a> {
    session_id: &'a str,
    role: Role,
    content: &'a str,
    #[serde(with = "time::serde::rfc3339")]
    at: OffsetDateTime,
}

#[async_trait]
impl TranscriptSink for JsonlTranscriptSink {
    async fn record(
        &self,
        session_id: &str,
        turn: &ConversationTurn,
    ) -> Result<(), TranscriptError> {
        let line = serde_json::to_string(&TranscriptLine {
            session_id,
            role: turn.role,
            content: &turn.content,
            at: turn.at,
        })
        .map_err(|e| TranscriptError::Serialization(e.to_string()))?;

        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;
        Ok(())
    }
}
