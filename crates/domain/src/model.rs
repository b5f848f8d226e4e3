//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

/// Livestock group a question is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// 모돈
    #[serde(alias = "모돈")]
    Sow,
    /// 포유자돈
    #[serde(alias = "포유자돈")]
    SucklingPiglet,
    /// 이유자돈
    #[serde(alias = "이유자돈")]
    WeanedPiglet,
    /// 육성돈
    #[serde(alias = "육성돈")]
    Grower,
    /// 비육돈
    #[serde(alias = "비육돈")]
    Finisher,
    /// 자돈전체: the generic offspring term without a specific stage.
    /// Only a label; no aggregation across piglet groups is implied.
    #[serde(alias = "자돈전체")]
    AllPiglets,
    /// 전체: the whole farm
    #[serde(alias = "전체")]
    All,
}

impl Category {
    /// The five concrete life-stage groups, in herd order
    pub const GROUPS: [Category; 5] = [
        Category::Sow,
        Category::SucklingPiglet,
        Category::WeanedPiglet,
        Category::Grower,
        Category::Finisher,
    ];

    /// Korean label used in prompts and on screen
    pub fn label(self) -> &'static str {
        match self {
            Category::Sow => "모돈",
            Category::SucklingPiglet => "포유자돈",
            Category::WeanedPiglet => "이유자돈",
            Category::Grower => "육성돈",
            Category::Finisher => "비육돈",
            Category::AllPiglets => "자돈전체",
            Category::All => "전체",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Measurement a question asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    #[serde(alias = "분만율_조회")]
    FarrowingRate,
    #[serde(alias = "폐사율_조회")]
    MortalityRate,
    #[serde(alias = "사료량_조회")]
    FeedAmount,
    #[serde(alias = "체중_조회")]
    Weight,
    /// No metric keyword matched
    #[serde(alias = "일반_질문")]
    General,
}

impl Metric {
    pub fn label(self) -> &'static str {
        match self {
            Metric::FarrowingRate => "분만율_조회",
            Metric::MortalityRate => "폐사율_조회",
            Metric::FeedAmount => "사료량_조회",
            Metric::Weight => "체중_조회",
            Metric::General => "일반_질문",
        }
    }

    /// Record shape a dataset entry for this metric must have
    pub fn record_kind(self) -> RecordKind {
        match self {
            Metric::FarrowingRate | Metric::MortalityRate => RecordKind::Rate,
            Metric::FeedAmount => RecordKind::Feed,
            Metric::Weight => RecordKind::Weight,
            Metric::General => RecordKind::Note,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of classifying a question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Intent {
    pub category: Category,
    pub metric: Metric,
}

impl Intent {
    pub fn new(category: Category, metric: Metric) -> Self {
        Self { category, metric }
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::new(Category::All, Metric::General)
    }
}

/// A weight value that is either a number (kg) or a free-text remark
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Measure {
    Value(f64),
    Text(String),
}

/// Shape of a metric record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Rate,
    Feed,
    Weight,
    Note,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Rate => "rate",
            RecordKind::Feed => "feed",
            RecordKind::Weight => "weight",
            RecordKind::Note => "note",
        };
        f.write_str(name)
    }
}

/// Rate statistics (farrowing or mortality), in percent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord {
    pub current_rate: f64,
    pub last_month: f64,
    pub average: f64,
    pub trend: String,
    pub count: u32,
    pub message: String,
}

impl RateRecord {
    /// Change against last month, in percentage points
    pub fn delta(&self) -> f64 {
        self.current_rate - self.last_month
    }
}

/// Feed usage: daily amount in kg, monthly cost in won
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedRecord {
    pub daily_amount: f64,
    pub monthly_cost: u64,
    pub efficiency: String,
    pub count: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightRecord {
    pub average_weight: Measure,
    pub target_weight: Measure,
    pub growth_rate: String,
    pub count: u32,
    pub message: String,
}

/// Immutable metric data looked up by `(Category, Metric)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricRecord {
    Rate(RateRecord),
    Feed(FeedRecord),
    Weight(WeightRecord),
    Note { message: String },
}

impl MetricRecord {
    pub fn note(message: impl Into<String>) -> Self {
        MetricRecord::Note {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> RecordKind {
        match self {
            MetricRecord::Rate(_) => RecordKind::Rate,
            MetricRecord::Feed(_) => RecordKind::Feed,
            MetricRecord::Weight(_) => RecordKind::Weight,
            MetricRecord::Note { .. } => RecordKind::Note,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            MetricRecord::Rate(r) => &r.message,
            MetricRecord::Feed(r) => &r.message,
            MetricRecord::Weight(r) => &r.message,
            MetricRecord::Note { message } => message,
        }
    }

    pub fn as_rate(&self) -> Option<&RateRecord> {
        match self {
            MetricRecord::Rate(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_feed(&self) -> Option<&FeedRecord> {
        match self {
            MetricRecord::Feed(r) => Some(r),
            _ => None,
        }
    }
}

/// Head count and status of one herd group, shown on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HerdSummary {
    pub category: Category,
    pub count: u32,
    pub status: String,
}

/// Who authored a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

/// A single entry of the chat transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

/// Ordered, append-only list of conversation turns
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    turns: Vec<ConversationTurn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
