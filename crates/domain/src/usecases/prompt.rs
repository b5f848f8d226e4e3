//! Prompt building - turns a classified question and its data into a completion prompt

use crate::dataset::Lookup;
use crate::model::{Category, Metric};
use crate::policy::truncate_chars;

/// Configuration for the prompt builder
#[derive(Debug, Clone)]
pub struct PromptConfig {
    /// Longest question (in characters) copied into the prompt
    pub max_question_chars: usize,
    /// Length limit the model is asked to respect, in characters
    pub answer_length_hint: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_question_chars: 500,
            answer_length_hint: 200,
        }
    }
}

/// Builds the single user-role prompt sent to the completion service
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    config: PromptConfig,
}

impl PromptBuilder {
    pub fn new(config: PromptConfig) -> Self {
        Self { config }
    }

    pub fn build(&self, question: &str, lookup: &Lookup) -> String {
        let question = truncate_chars(question.trim(), self.config.max_question_chars);

        if lookup.intent.metric == Metric::General {
            self.general_prompt(&question)
        } else {
            self.metric_prompt(&question, lookup)
        }
    }

    fn metric_prompt(&self, question: &str, lookup: &Lookup) -> String {
        // Records are small fixed-shape structs, so serialization cannot fail
        let data = serde_json::to_string(&lookup.record).unwrap_or_default();

        format!(
            "농장 도우미로서 친근하고 유용한 답변을 해주세요.\n\n\
             농장주 질문: {question}\n\
             돼지 종류: {category}\n\
             농장 데이터: {data}\n\n\
             조건:\n\
             - 농장주에게 친근하게 말하세요\n\
             - 구체적인 숫자와 함께 설명하세요\n\
             - 돼지 종류를 명확히 언급하세요\n\
             - 간단하고 이해하기 쉽게 답변하세요\n\
             - {limit}자 이내로 답변하세요\n",
            category = lookup.intent.category.label(),
            limit = self.config.answer_length_hint,
        )
    }

    fn general_prompt(&self, question: &str) -> String {
        let groups = Category::GROUPS
            .iter()
            .map(|c| c.label())
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "농장 도우미로서 다음 질문에 답변해주세요.\n\n\
             질문: {question}\n\n\
             조건:\n\
             - 돼지 농장과 관련된 도움을 주세요\n\
             - 돼지 종류({groups})에 대해 설명할 수 있어요\n\
             - 친근하고 이해하기 쉽게 답변하세요\n\
             - {limit}자 이내로 답변하세요\n",
            limit = self.config.answer_length_hint,
        )
    }
}
