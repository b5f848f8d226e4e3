//! Farm overview - dashboard figures derived from the dataset

use serde::Serialize;

use crate::dataset::FarmDataset;
use crate::model::{Category, HerdSummary, Metric};

/// Status a herd group normally reports
const NORMAL_STATUS: &str = "양호";

/// A headline figure with its change against last month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateFigure {
    pub current: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

/// Summary of the whole farm
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmOverview {
    pub total_head_count: u64,
    pub mortality: Option<RateFigure>,
    pub sow_farrowing: Option<RateFigure>,
    pub monthly_feed_cost: Option<u64>,
    pub groups: Vec<HerdSummary>,
    pub alerts: Vec<Alert>,
}

impl FarmOverview {
    pub fn from_dataset(dataset: &FarmDataset) -> Self {
        let groups = dataset.herd().to_vec();
        let total_head_count = groups.iter().map(|g| u64::from(g.count)).sum();

        let rate = |category, metric| {
            dataset
                .get(category, metric)
                .and_then(|r| r.as_rate())
                .map(|r| RateFigure {
                    current: r.current_rate,
                    delta: r.delta(),
                })
        };

        let mortality = rate(Category::All, Metric::MortalityRate);
        let sow_farrowing = rate(Category::Sow, Metric::FarrowingRate);
        let monthly_feed_cost = dataset
            .get(Category::All, Metric::FeedAmount)
            .and_then(|r| r.as_feed())
            .map(|f| f.monthly_cost);

        let mut alerts = Vec::new();
        if let Some(m) = &mortality {
            if m.delta < 0.0 {
                alerts.push(Alert {
                    level: AlertLevel::Success,
                    message: "전체 폐사율 개선".to_string(),
                });
            } else if m.delta > 0.0 {
                alerts.push(Alert {
                    level: AlertLevel::Warning,
                    message: "전체 폐사율 증가".to_string(),
                });
            }
        }
        if let Some(f) = &sow_farrowing {
            if f.delta > 0.0 {
                alerts.push(Alert {
                    level: AlertLevel::Info,
                    message: "모돈 분만율 상승".to_string(),
                });
            }
        }
        for group in groups.iter().filter(|g| g.status != NORMAL_STATUS) {
            alerts.push(Alert {
                level: AlertLevel::Warning,
                message: format!("{} {}", group.category, group.status),
            });
        }

        Self {
            total_head_count,
            mortality,
            sow_farrowing,
            monthly_feed_cost,
            groups,
            alerts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::DatasetEntry;
    use crate::model::{FeedRecord, MetricRecord, RateRecord};

    fn rate(current: f64, last: f64) -> MetricRecord {
        MetricRecord::Rate(RateRecord {
            current_rate: current,
            last_month: last,
            average: current,
            trend: "개선".to_string(),
            count: 10,
            message: "msg".to_string(),
        })
    }

    fn herd(category: Category, count: u32, status: &str) -> HerdSummary {
        HerdSummary {
            category,
            count,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_overview_figures_and_alerts() {
        let dataset = FarmDataset::new(
            vec![
                DatasetEntry {
                    category: Category::All,
                    metric: Metric::MortalityRate,
                    record: rate(2.8, 3.2),
                },
                DatasetEntry {
                    category: Category::Sow,
                    metric: Metric::FarrowingRate,
                    record: rate(85.0, 82.0),
                },
                DatasetEntry {
                    category: Category::All,
                    metric: Metric::FeedAmount,
                    record: MetricRecord::Feed(FeedRecord {
                        daily_amount: 630.0,
                        monthly_cost: 3_630_000,
                        efficiency: "양호".to_string(),
                        count: 2650,
                        message: "msg".to_string(),
                    }),
                },
            ],
            vec![
                herd(Category::Sow, 120, "양호"),
                herd(Category::Finisher, 380, "출하준비"),
            ],
        )
        .unwrap();

        let overview = FarmOverview::from_dataset(&dataset);

        assert_eq!(overview.total_head_count, 500);
        assert_eq!(overview.monthly_feed_cost, Some(3_630_000));
        let mortality = overview.mortality.unwrap();
        assert!((mortality.delta + 0.4).abs() < 1e-9);

        let messages: Vec<_> = overview.alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["전체 폐사율 개선", "모돈 분만율 상승", "비육돈 출하준비"]
        );
    }

    #[test]
    fn test_head_count_exceeding_u32_range() {
        let dataset = FarmDataset::new(
            vec![],
            vec![
                herd(Category::Sow, 3_000_000_000, "양호"),
                herd(Category::Finisher, 2_000_000_000, "양호"),
            ],
        )
        .unwrap();

        let overview = FarmOverview::from_dataset(&dataset);
        assert_eq!(overview.total_head_count, 5_000_000_000);
    }

    #[test]
    fn test_overview_of_empty_dataset() {
        let dataset = FarmDataset::new(vec![], vec![]).unwrap();
        let overview = FarmOverview::from_dataset(&dataset);

        assert_eq!(overview.total_head_count, 0);
        assert!(overview.mortality.is_none());
        assert!(overview.alerts.is_empty());
    }
}
