//! TOML-backed farm dataset repository

use async_trait::async_trait;
use farm_assistant_domain::{
    Category, DatasetEntry, DatasetError, DatasetRepo, FarmDataset, FeedRecord, HerdSummary,
    Measure, Metric, MetricRecord, RateRecord, RecordKind, WeightRecord,
};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Dataset compiled into the binary
const BUILTIN_DATASET: &str = include_str!("../data/farm_data.toml");

enum Source {
    Builtin,
    File(PathBuf),
}

/// Dataset repository reading the TOML table format
pub struct TomlDatasetRepo {
    source: Source,
}

impl TomlDatasetRepo {
    /// Repository over the built-in farm data
    pub fn builtin() -> Self {
        Self {
            source: Source::Builtin,
        }
    }

    /// Repository over a TOML file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();

        if !path.is_file() {
            return Err(DatasetError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Dataset file not found: {}", path.display()),
            )));
        }

        Ok(Self {
            source: Source::File(path),
        })
    }

    /// Parse and validate a dataset document
    pub fn parse(source_name: &str, content: &str) -> Result<FarmDataset, DatasetError> {
        let document: DatasetDocument =
            toml::from_str(content).map_err(|e| DatasetError::Parse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        let entries = document
            .records
            .into_iter()
            .map(RawRecord::into_entry)
            .collect::<Result<Vec<_>, _>>()?;

        let herd = document
            .herd
            .into_iter()
            .map(|h| HerdSummary {
                category: h.category,
                count: h.count,
                status: h.status,
            })
            .collect();

        FarmDataset::new(entries, herd)
    }
}

#[async_trait]
impl DatasetRepo for TomlDatasetRepo {
    async fn load(&self) -> Result<FarmDataset, DatasetError> {
        let dataset = match &self.source {
            Source::Builtin => Self::parse("built-in dataset", BUILTIN_DATASET)?,
            Source::File(path) => {
                let content = tokio::fs::read_to_string(path).await?;
                Self::parse(&path.display().to_string(), &content)?
            }
        };

        tracing::info!(
            source = %self.source_name(),
            records = dataset.len(),
            "Farm dataset loaded"
        );

        Ok(dataset)
    }

    fn source_name(&self) -> String {
        match &self.source {
            Source::Builtin => "built-in dataset".to_string(),
            Source::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct DatasetDocument {
    #[serde(default)]
    records: Vec<RawRecord>,
    #[serde(default)]
    herd: Vec<RawHerd>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHerd {
    category: Category,
    count: u32,
    status: String,
}

/// Flat record as written in the file; the metric decides which fields apply
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRecord {
    category: Category,
    metric: Metric,
    message: String,
    current_rate: Option<f64>,
    last_month: Option<f64>,
    average: Option<f64>,
    trend: Option<String>,
    count: Option<u32>,
    daily_amount: Option<f64>,
    monthly_cost: Option<u64>,
    efficiency: Option<String>,
    average_weight: Option<Measure>,
    target_weight: Option<Measure>,
    growth_rate: Option<String>,
}

impl RawRecord {
    fn into_entry(self) -> Result<DatasetEntry, DatasetError> {
        let (category, metric) = (self.category, self.metric);
        let missing = |field: &str| {
            DatasetError::Validation(format!(
                "{} / {}: missing field `{}` for a {} record",
                category,
                metric,
                field,
                metric.record_kind()
            ))
        };

        let record = match metric.record_kind() {
            RecordKind::Rate => MetricRecord::Rate(RateRecord {
                current_rate: self.current_rate.ok_or_else(|| missing("current_rate"))?,
                last_month: self.last_month.ok_or_else(|| missing("last_month"))?,
                average: self.average.ok_or_else(|| missing("average"))?,
                trend: self.trend.ok_or_else(|| missing("trend"))?,
                count: self.count.ok_or_else(|| missing("count"))?,
                message: self.message,
            }),
            RecordKind::Feed => MetricRecord::Feed(FeedRecord {
                daily_amount: self.daily_amount.ok_or_else(|| missing("daily_amount"))?,
                monthly_cost: self.monthly_cost.ok_or_else(|| missing("monthly_cost"))?,
                efficiency: self.efficiency.ok_or_else(|| missing("efficiency"))?,
                count: self.count.ok_or_else(|| missing("count"))?,
                message: self.message,
            }),
            RecordKind::Weight => MetricRecord::Weight(WeightRecord {
                average_weight: self
                    .average_weight
                    .ok_or_else(|| missing("average_weight"))?,
                target_weight: self.target_weight.ok_or_else(|| missing("target_weight"))?,
                growth_rate: self.growth_rate.ok_or_else(|| missing("growth_rate"))?,
                count: self.count.ok_or_else(|| missing("count"))?,
                message: self.message,
            }),
            RecordKind::Note => MetricRecord::Note {
                message: self.message,
            },
        };

        Ok(DatasetEntry {
            category,
            metric,
            record,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_assistant_domain::{Intent, LookupOrigin, classify};
    use tempfile::TempDir;

    async fn builtin() -> FarmDataset {
        TomlDatasetRepo::builtin().load().await.unwrap()
    }

    #[tokio::test]
    async fn test_builtin_dataset_loads() {
        let dataset = builtin().await;

        assert_eq!(dataset.len(), 21);
        assert_eq!(dataset.herd().len(), 5);
        let total: u32 = dataset.herd().iter().map(|h| h.count).sum();
        assert_eq!(total, 2650);
    }

    #[tokio::test]
    async fn test_sow_farrowing_scenario() {
        let dataset = builtin().await;

        let intent = classify("모돈 분만율 어때?");
        let lookup = dataset.lookup(intent);

        assert_eq!(intent, Intent::new(Category::Sow, Metric::FarrowingRate));
        assert_eq!(lookup.origin, LookupOrigin::Exact);
        let rate = lookup.record.as_rate().unwrap();
        assert_eq!(rate.current_rate, 85.0);
        assert_eq!(rate.last_month, 82.0);
        assert_eq!(rate.average, 80.0);
    }

    #[tokio::test]
    async fn test_finisher_feed_scenario() {
        let dataset = builtin().await;

        let lookup = dataset.lookup(classify("비육돈 사료비 얼마나 나왔어?"));

        assert_eq!(lookup.intent.category, Category::Finisher);
        assert_eq!(lookup.intent.metric, Metric::FeedAmount);
        assert_eq!(lookup.record.as_feed().unwrap().monthly_cost, 1_100_000);
    }

    #[tokio::test]
    async fn test_greeting_scenario() {
        let dataset = builtin().await;

        let lookup = dataset.lookup(classify("안녕"));

        assert_eq!(lookup.intent, Intent::default());
        assert_eq!(
            lookup.record.message(),
            "농장에 대한 구체적인 질문을 해주세요"
        );
    }

    #[tokio::test]
    async fn test_whole_farm_weight_is_text() {
        let dataset = builtin().await;

        let record = dataset.get(Category::All, Metric::Weight).unwrap();
        match record {
            MetricRecord::Weight(w) => {
                assert_eq!(w.average_weight, Measure::Text("종류별 상이".to_string()));
            }
            other => panic!("unexpected record: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_absent_pairs_never_fail() {
        let dataset = builtin().await;

        for category in Category::GROUPS {
            for metric in [Metric::FarrowingRate, Metric::General] {
                let lookup = dataset.lookup(Intent::new(category, metric));
                assert!(!lookup.record.message().is_empty());
            }
        }
        let lookup = dataset.lookup(Intent::new(Category::SucklingPiglet, Metric::FarrowingRate));
        assert_eq!(lookup.origin, LookupOrigin::NoData);
    }

    #[tokio::test]
    async fn test_load_from_file_with_korean_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("farm.toml");
        std::fs::write(
            &path,
            r#"
[[records]]
category = "모돈"
metric = "분만율_조회"
current_rate = 90
last_month = 88
average = 85
trend = "상승"
count = 100
message = "좋아요"
"#,
        )
        .unwrap();

        let dataset = TomlDatasetRepo::from_path(&path)
            .unwrap()
            .load()
            .await
            .unwrap();

        let rate = dataset
            .get(Category::Sow, Metric::FarrowingRate)
            .and_then(|r| r.as_rate())
            .unwrap();
        assert_eq!(rate.current_rate, 90.0);
    }

    #[test]
    fn test_missing_required_field() {
        let content = r#"
[[records]]
category = "sow"
metric = "feed_amount"
daily_amount = 10.0
efficiency = "양호"
count = 1
message = "msg"
"#;
        let result = TomlDatasetRepo::parse("test", content);
        match result {
            Err(DatasetError::Validation(message)) => assert!(message.contains("monthly_cost")),
            other => panic!("unexpected result: {:?}", other.map(|d| d.len())),
        }
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let content = r#"
[[records]]
category = "all"
metric = "general"
message = "a"

[[records]]
category = "all"
metric = "general"
message = "b"
"#;
        let result = TomlDatasetRepo::parse("test", content);
        assert!(matches!(result, Err(DatasetError::DuplicateEntry { .. })));
    }

    #[test]
    fn test_unknown_category_is_parse_error() {
        let content = r#"
[[records]]
category = "cattle"
metric = "general"
message = "a"
"#;
        let result = TomlDatasetRepo::parse("test", content);
        assert!(matches!(result, Err(DatasetError::Parse { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = TomlDatasetRepo::from_path("/nonexistent/farm.toml");
        assert!(matches!(result, Err(DatasetError::Io(_))));
    }
}
