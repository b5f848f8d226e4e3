//! Output constraints for generated answers

/// Policy configuration
#[derive(Debug, Clone, Default)]
pub struct AnswerPolicy {
    /// Maximum answer length in characters (None = unlimited)
    pub max_answer_chars: Option<usize>,
}

impl AnswerPolicy {
    pub fn new(max_answer_chars: Option<usize>) -> Self {
        Self { max_answer_chars }
    }

    /// Validate and sanitize a completion before it reaches the transcript
    pub fn apply(&self, answer: &str) -> Result<String, PolicyViolation> {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            return Err(PolicyViolation::EmptyAnswer);
        }

        match self.max_answer_chars {
            Some(max) => Ok(truncate_chars(trimmed, max)),
            None => Ok(trimmed.to_string()),
        }
    }
}

/// Truncate to at most `max` characters, marking the cut with "..."
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }

    // No room for the marker
    if max < 3 {
        return text.chars().take(max).collect();
    }

    let mut truncated: String = text.chars().take(max - 3).collect();
    truncated.push_str("...");
    truncated
}

/// Policy violation errors
#[derive(Debug, thiserror::Error)]
pub enum PolicyViolation {
    #[error("Completion returned no text")]
    EmptyAnswer,
}
