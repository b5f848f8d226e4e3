//! Stub completion client for testing and offline mode

use async_trait::async_trait;
use farm_assistant_domain::{CompletionClient, CompletionError};

enum Mode {
    Canned(String),
    Echo,
}

/// Stub client that returns configurable responses without any network I/O
pub struct StubCompletion {
    mode: Mode,
}

impl StubCompletion {
    /// Always answer with the given text
    pub fn with_response(text: impl Into<String>) -> Self {
        Self {
            mode: Mode::Canned(text.into()),
        }
    }

    /// Answer with the farm data line of the prompt, or the question for
    /// general prompts
    pub fn echo() -> Self {
        Self { mode: Mode::Echo }
    }
}

impl Default for StubCompletion {
    fn default() -> Self {
        Self::echo()
    }
}

#[async_trait]
impl CompletionClient for StubCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        match &self.mode {
            Mode::Canned(text) => Ok(text.clone()),
            Mode::Echo => {
                let line = prompt
                    .lines()
                    .find(|l| l.starts_with("농장 데이터:"))
                    .or_else(|| prompt.lines().find(|l| l.starts_with("질문:")))
                    .unwrap_or_default();
                Ok(format!("[stub] {}", line.trim()))
            }
        }
    }

    fn provider(&self) -> &'static str {
        "stub"
    }
}
