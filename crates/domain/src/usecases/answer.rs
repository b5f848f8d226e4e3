//! Answer use case - classify, look up, prompt, complete, and record one turn

use std::sync::Arc;

use serde::Serialize;

use crate::{
    dataset::{FarmDataset, Lookup},
    intent,
    model::{ConversationTurn, Role},
    policy::AnswerPolicy,
    ports::{Clock, CompletionClient, CompletionError, SystemClock},
    usecases::{
        prompt::{PromptBuilder, PromptConfig},
        session::ChatSession,
    },
};

/// Shown when the completion service returns something unusable
pub const APOLOGY_MESSAGE: &str = "죄송해요, 질문을 이해하지 못했어요. 다시 질문해주세요.";

/// Configuration for the answer use case
#[derive(Debug, Clone, Default)]
pub struct AnswerConfig {
    pub prompt: PromptConfig,
    pub policy: AnswerPolicy,
}

/// How the assistant turn was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerOutcome {
    /// The completion service produced a usable answer
    Answered,
    /// The response was malformed or empty; the fixed apology was shown
    Apology { reason: String },
    /// The service call failed; the error was shown inline
    ServiceError { error: String },
}

/// Everything that happened while answering one question
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub lookup: Lookup,
    pub answer: String,
    pub outcome: AnswerOutcome,
    /// Turns appended to the session, in order (user, then assistant)
    pub turns: Vec<ConversationTurn>,
}

/// A question resolved against the dataset, ready to be sent
#[derive(Debug, Clone)]
pub struct PreparedQuestion {
    pub lookup: Lookup,
    pub prompt: String,
}

/// Use case for answering farm questions
pub struct AnswerUseCase<C> {
    client: C,
    dataset: Arc<FarmDataset>,
    prompts: PromptBuilder,
    policy: AnswerPolicy,
    clock: Arc<dyn Clock>,
}

impl<C: CompletionClient> AnswerUseCase<C> {
    pub fn new(client: C, dataset: Arc<FarmDataset>, config: AnswerConfig) -> Self {
        Self {
            client,
            dataset,
            prompts: PromptBuilder::new(config.prompt),
            policy: config.policy,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Classify a question and build its prompt without calling the service
    pub fn prepare(&self, question: &str) -> PreparedQuestion {
        let intent = intent::classify(question);
        let lookup = self.dataset.lookup(intent);
        let prompt = self.prompts.build(question, &lookup);

        PreparedQuestion { lookup, prompt }
    }

    /// Answer one question, appending the user turn and exactly one
    /// assistant turn to the session. Service failures end up in the
    /// transcript rather than being returned.
    pub async fn respond(&self, session: &mut ChatSession, question: &str) -> TurnReport {
        let user_turn = session
            .append(Role::User, question, self.clock.as_ref())
            .clone();

        let PreparedQuestion { lookup, prompt } = self.prepare(question);

        tracing::info!(
            session_id = %session.id(),
            provider = self.client.provider(),
            category = %lookup.intent.category,
            metric = %lookup.intent.metric,
            origin = ?lookup.origin,
            prompt_chars = prompt.chars().count(),
            "Answering question"
        );

        let (answer, outcome) = match self.client.complete(&prompt).await {
            Ok(text) => match self.policy.apply(&text) {
                Ok(answer) => (answer, AnswerOutcome::Answered),
                Err(violation) => {
                    tracing::warn!(error = %violation, "Completion rejected by answer policy");
                    apology(violation.to_string())
                }
            },
            Err(CompletionError::InvalidResponse(reason)) => {
                tracing::warn!(reason = %reason, "Malformed completion response");
                apology(reason)
            }
            Err(e) => {
                tracing::error!(error = %e, "Completion request failed");
                let error = e.to_string();
                (
                    format!("죄송해요, 오류가 발생했습니다: {}", error),
                    AnswerOutcome::ServiceError { error },
                )
            }
        };

        let assistant_turn = session
            .append(Role::Assistant, answer.clone(), self.clock.as_ref())
            .clone();

        TurnReport {
            lookup,
            answer,
            outcome,
            turns: vec![user_turn, assistant_turn],
        }
    }
}

fn apology(reason: String) -> (String, AnswerOutcome) {
    (
        APOLOGY_MESSAGE.to_string(),
        AnswerOutcome::Apology { reason },
    )
}
