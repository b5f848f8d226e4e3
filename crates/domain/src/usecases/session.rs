//! Chat session context passed explicitly to every turn

use uuid::Uuid;

use crate::model::{ConversationTurn, Role, Transcript};
use crate::ports::Clock;

/// Per-session state: identity and the append-only transcript.
///
/// Created at session start, cleared by [`ChatSession::reset`], dropped at
/// session end.
#[derive(Debug, Clone)]
pub struct ChatSession {
    id: Uuid,
    transcript: Transcript,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            transcript: Transcript::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub(crate) fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
        clock: &dyn Clock,
    ) -> &ConversationTurn {
        self.transcript.push(ConversationTurn {
            role,
            content: content.into(),
            at: clock.now(),
        });
        // Just pushed, so the transcript is non-empty
        &self.transcript.turns()[self.transcript.len() - 1]
    }

    /// Drop all turns; the session id is kept
    pub fn reset(&mut self) {
        tracing::info!(
            session_id = %self.id,
            turns = self.transcript.len(),
            "Resetting transcript"
        );
        self.transcript.clear();
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}
