//! Static farm dataset and the `(Category, Metric)` lookup

use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Category, HerdSummary, Intent, Measure, Metric, MetricRecord};
use crate::ports::DatasetError;

/// One record keyed by its `(Category, Metric)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetEntry {
    pub category: Category,
    pub metric: Metric,
    pub record: MetricRecord,
}

/// How a lookup was resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupOrigin {
    /// The exact pair exists in the table
    Exact,
    /// Whole-farm question for a metric without its own row; the farm's
    /// general note is used instead
    CategoryDefault,
    /// No data for the pair
    NoData,
}

/// Result of a dataset lookup
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub intent: Intent,
    pub record: MetricRecord,
    pub origin: LookupOrigin,
}

impl Lookup {
    pub fn is_fallback(&self) -> bool {
        self.origin != LookupOrigin::Exact
    }
}

/// Immutable metric table plus herd summaries, validated on construction
#[derive(Debug, Clone)]
pub struct FarmDataset {
    records: HashMap<(Category, Metric), MetricRecord>,
    herd: Vec<HerdSummary>,
}

impl FarmDataset {
    /// Build a dataset, rejecting malformed or duplicated entries
    pub fn new(entries: Vec<DatasetEntry>, herd: Vec<HerdSummary>) -> Result<Self, DatasetError> {
        let mut records = HashMap::with_capacity(entries.len());

        for entry in entries {
            validate_entry(&entry)?;
            let key = (entry.category, entry.metric);
            if records.contains_key(&key) {
                return Err(DatasetError::DuplicateEntry {
                    category: entry.category,
                    metric: entry.metric,
                });
            }
            records.insert(key, entry.record);
        }

        let mut seen = Vec::with_capacity(herd.len());
        for summary in &herd {
            if seen.contains(&summary.category) {
                return Err(DatasetError::Validation(format!(
                    "duplicate herd entry for {}",
                    summary.category
                )));
            }
            if summary.status.trim().is_empty() {
                return Err(DatasetError::Validation(format!(
                    "herd entry for {} has an empty status",
                    summary.category
                )));
            }
            seen.push(summary.category);
        }

        tracing::debug!(
            records = records.len(),
            herd_groups = herd.len(),
            "Loaded farm dataset"
        );

        Ok(Self { records, herd })
    }

    /// Resolve the record for a classified question. Never fails.
    pub fn lookup(&self, intent: Intent) -> Lookup {
        if let Some(record) = self.records.get(&(intent.category, intent.metric)) {
            return Lookup {
                intent,
                record: record.clone(),
                origin: LookupOrigin::Exact,
            };
        }

        if intent.category == Category::All {
            if let Some(record) = self.records.get(&(Category::All, Metric::General)) {
                return Lookup {
                    intent,
                    record: record.clone(),
                    origin: LookupOrigin::CategoryDefault,
                };
            }
        }

        Lookup {
            intent,
            record: MetricRecord::note(format!(
                "{}에 대한 {} 데이터가 없습니다.",
                intent.category.label(),
                intent.metric.label()
            )),
            origin: LookupOrigin::NoData,
        }
    }

    pub fn get(&self, category: Category, metric: Metric) -> Option<&MetricRecord> {
        self.records.get(&(category, metric))
    }

    pub fn herd(&self) -> &[HerdSummary] {
        &self.herd
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn validate_entry(entry: &DatasetEntry) -> Result<(), DatasetError> {
    let expected = entry.metric.record_kind();
    let actual = entry.record.kind();
    if expected != actual {
        return Err(DatasetError::KindMismatch {
            category: entry.category,
            metric: entry.metric,
            expected,
            actual,
        });
    }

    let invalid = |message: &str| {
        Err(DatasetError::Validation(format!(
            "{} / {}: {}",
            entry.category, entry.metric, message
        )))
    };

    if entry.record.message().trim().is_empty() {
        return invalid("message must not be empty");
    }

    match &entry.record {
        MetricRecord::Rate(rate) => {
            for value in [rate.current_rate, rate.last_month, rate.average] {
                if !(0.0..=100.0).contains(&value) {
                    return invalid("rates must be between 0 and 100");
                }
            }
        }
        MetricRecord::Feed(feed) => {
            if !feed.daily_amount.is_finite() || feed.daily_amount < 0.0 {
                return invalid("daily_amount must be a non-negative number");
            }
        }
        MetricRecord::Weight(weight) => {
            for measure in [&weight.average_weight, &weight.target_weight] {
                if let Measure::Value(kg) = measure {
                    if !kg.is_finite() || *kg < 0.0 {
                        return invalid("weights must be non-negative numbers");
                    }
                }
            }
        }
        MetricRecord::Note { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FeedRecord, RateRecord, WeightRecord};

    fn sow_farrowing() -> MetricRecord {
        MetricRecord::Rate(RateRecord {
            current_rate: 85.0,
            last_month: 82.0,
            average: 80.0,
            trend: "상승".to_string(),
            count: 120,
            message: "모돈 분만율이 좋아졌어요!".to_string(),
        })
    }

    fn sample_dataset() -> FarmDataset {
        FarmDataset::new(
            vec![
                DatasetEntry {
                    category: Category::Sow,
                    metric: Metric::FarrowingRate,
                    record: sow_farrowing(),
                },
                DatasetEntry {
                    category: Category::All,
                    metric: Metric::General,
                    record: MetricRecord::note("농장에 대한 구체적인 질문을 해주세요"),
                },
            ],
            vec![HerdSummary {
                category: Category::Sow,
                count: 120,
                status: "양호".to_string(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_lookup() {
        let lookup = sample_dataset().lookup(Intent::new(Category::Sow, Metric::FarrowingRate));
        assert_eq!(lookup.origin, LookupOrigin::Exact);
        assert_eq!(lookup.record, sow_farrowing());
    }

    #[test]
    fn test_whole_farm_falls_back_to_general_note() {
        let lookup = sample_dataset().lookup(Intent::new(Category::All, Metric::Weight));
        assert_eq!(lookup.origin, LookupOrigin::CategoryDefault);
        assert_eq!(
            lookup.record.message(),
            "농장에 대한 구체적인 질문을 해주세요"
        );
    }

    #[test]
    fn test_missing_pair_returns_no_data_note() {
        let lookup = sample_dataset().lookup(Intent::new(Category::Grower, Metric::FarrowingRate));
        assert_eq!(lookup.origin, LookupOrigin::NoData);
        assert_eq!(
            lookup.record,
            MetricRecord::note("육성돈에 대한 분만율_조회 데이터가 없습니다.")
        );
    }

    #[test]
    fn test_all_piglets_has_no_union() {
        let lookup = sample_dataset().lookup(Intent::new(Category::AllPiglets, Metric::Weight));
        assert_eq!(lookup.origin, LookupOrigin::NoData);
        assert!(lookup.record.message().starts_with("자돈전체"));
    }

    #[test]
    fn test_empty_dataset_never_fails() {
        let dataset = FarmDataset::new(vec![], vec![]).unwrap();
        let lookup = dataset.lookup(Intent::default());
        assert_eq!(lookup.origin, LookupOrigin::NoData);
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let entry = DatasetEntry {
            category: Category::Sow,
            metric: Metric::FarrowingRate,
            record: sow_farrowing(),
        };
        let result = FarmDataset::new(vec![entry.clone(), entry], vec![]);
        assert!(matches!(result, Err(DatasetError::DuplicateEntry { .. })));
    }

    #[test]
    fn test_kind_mismatch_rejected() {
        let result = FarmDataset::new(
            vec![DatasetEntry {
                category: Category::Sow,
                metric: Metric::FeedAmount,
                record: sow_farrowing(),
            }],
            vec![],
        );
        assert!(matches!(result, Err(DatasetError::KindMismatch { .. })));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let mut record = sow_farrowing();
        if let MetricRecord::Rate(rate) = &mut record {
            rate.current_rate = 140.0;
        }
        let result = FarmDataset::new(
            vec![DatasetEntry {
                category: Category::Sow,
                metric: Metric::FarrowingRate,
                record,
            }],
            vec![],
        );
        assert!(matches!(result, Err(DatasetError::Validation(_))));
    }

    #[test]
    fn test_negative_feed_rejected() {
        let result = FarmDataset::new(
            vec![DatasetEntry {
                category: Category::Finisher,
                metric: Metric::FeedAmount,
                record: MetricRecord::Feed(FeedRecord {
                    daily_amount: -1.0,
                    monthly_cost: 0,
                    efficiency: "양호".to_string(),
                    count: 1,
                    message: "msg".to_string(),
                }),
            }],
            vec![],
        );
        assert!(matches!(result, Err(DatasetError::Validation(_))));
    }

    fn weight_entry(average: Measure, target: Measure) -> DatasetEntry {
        DatasetEntry {
            category: Category::Grower,
            metric: Metric::Weight,
            record: MetricRecord::Weight(WeightRecord {
                average_weight: average,
                target_weight: target,
                growth_rate: "양호".to_string(),
                count: 1,
                message: "msg".to_string(),
            }),
        }
    }

    #[test]
    fn test_invalid_weight_rejected() {
        for (average, target) in [
            (Measure::Value(-45.0), Measure::Value(50.0)),
            (Measure::Value(45.0), Measure::Value(f64::NAN)),
        ] {
            let result = FarmDataset::new(vec![weight_entry(average, target)], vec![]);
            assert!(matches!(result, Err(DatasetError::Validation(_))));
        }
    }

    #[test]
    fn test_text_weight_accepted() {
        let entry = weight_entry(
            Measure::Text("종류별 상이".to_string()),
            Measure::Value(50.0),
        );
        assert!(FarmDataset::new(vec![entry], vec![]).is_ok());
    }

    #[test]
    fn test_duplicate_herd_rejected() {
        let summary = HerdSummary {
            category: Category::Sow,
            count: 1,
            status: "양호".to_string(),
        };
        let result = FarmDataset::new(vec![], vec![summary.clone(), summary]);
        assert!(matches!(result, Err(DatasetError::Validation(_))));
    }
}
