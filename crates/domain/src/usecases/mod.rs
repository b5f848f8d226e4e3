//! Application use cases / business logic

pub mod answer;
pub mod overview;
pub mod prompt;
pub mod session;

pub use answer::{
    APOLOGY_MESSAGE, AnswerConfig, AnswerOutcome, AnswerUseCase, PreparedQuestion, TurnReport,
};
pub use overview::{Alert, AlertLevel, FarmOverview, RateFigure};
pub use prompt::{PromptBuilder, PromptConfig};
pub use session::ChatSession;
