//! Classify command - offline intent classification and data lookup

use anyhow::{Context, Result};
use farm_assistant_adapters::dataset::TomlDatasetRepo;
use farm_assistant_domain::{DatasetRepo, FarmDataset, Lookup, classify};
use std::io::{self, Read};
use std::path::PathBuf;

use crate::args::{ClassifyArgs, QuestionInput};
use crate::config::AppConfig;

pub async fn execute(args: ClassifyArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;

    let question = read_question(&args.input)?;
    if question.trim().is_empty() {
        anyhow::bail!("No question provided");
    }

    let dataset = load_dataset(&config).await?;
    let lookup = dataset.lookup(classify(&question));

    if args.json {
        let json = serde_json::to_string_pretty(&lookup_json(&question, &lookup))
            .context("Failed to serialize output")?;
        println!("{}", json);
    } else {
        println!("Question: {}", question.trim());
        println!(
            "Category: {} ({:?})",
            lookup.intent.category, lookup.intent.category
        );
        println!(
            "Metric:   {} ({:?})",
            lookup.intent.metric, lookup.intent.metric
        );
        if lookup.is_fallback() {
            println!("Lookup:   {:?} (fallback)", lookup.origin);
        } else {
            println!("Lookup:   {:?}", lookup.origin);
        }
        println!();
        println!("{}", serde_json::to_string_pretty(&lookup.record)?);
    }

    Ok(())
}

/// JSON view of a lookup, shared with `ask --json`
pub(crate) fn lookup_json(question: &str, lookup: &Lookup) -> serde_json::Value {
    serde_json::json!({
        "question": question.trim(),
        "category": lookup.intent.category,
        "metric": lookup.intent.metric,
        "origin": lookup.origin,
        "fallback": lookup.is_fallback(),
        "kind": lookup.record.kind().to_string(),
        "record": lookup.record,
    })
}

/// Load the configured data file, or the built-in table when none is set
pub(crate) async fn load_dataset(config: &AppConfig) -> Result<FarmDataset> {
    let repo = match &config.general.data_file {
        Some(path) => TomlDatasetRepo::from_path(path)
            .with_context(|| format!("Failed to open data file: {}", path.display()))?,
        None => TomlDatasetRepo::builtin(),
    };

    repo.load()
        .await
        .with_context(|| format!("Failed to load farm data from {}", repo.source_name()))
}

pub(crate) fn read_question(input: &QuestionInput) -> Result<String> {
    if let Some(ref text) = input.text {
        return Ok(text.clone());
    }

    if let Some(ref path) = input.file {
        if path.as_os_str() != "-" {
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display()));
        }
    }

    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read from stdin")?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_assistant_domain::{Category, LookupOrigin, Metric};

    #[tokio::test]
    async fn test_load_dataset_defaults_to_builtin() {
        let dataset = load_dataset(&AppConfig::default()).await.unwrap();
        assert!(dataset.get(Category::Sow, Metric::FarrowingRate).is_some());
    }

    #[tokio::test]
    async fn test_load_dataset_missing_file_is_error() {
        let mut config = AppConfig::default();
        config.general.data_file = Some(PathBuf::from("/nonexistent/farm.toml"));

        assert!(load_dataset(&config).await.is_err());
    }

    #[tokio::test]
    async fn test_lookup_json_fields() {
        let dataset = load_dataset(&AppConfig::default()).await.unwrap();
        let lookup = dataset.lookup(classify("이유자돈 폐사율 좀 알려줘"));

        let value = lookup_json(" 이유자돈 폐사율 좀 알려줘 ", &lookup);
        assert_eq!(value["question"], "이유자돈 폐사율 좀 알려줘");
        assert_eq!(value["category"], "weaned_piglet");
        assert_eq!(value["metric"], "mortality_rate");
        assert_eq!(value["origin"], "exact");
        assert_eq!(value["fallback"], false);
        assert_eq!(lookup.origin, LookupOrigin::Exact);
    }

    #[tokio::test]
    async fn test_lookup_json_marks_fallback() {
        let dataset = load_dataset(&AppConfig::default()).await.unwrap();
        let lookup = dataset.lookup(classify("자돈 폐사율"));

        let value = lookup_json("자돈 폐사율", &lookup);
        assert_eq!(value["origin"], "no_data");
        assert_eq!(value["fallback"], true);
    }

    #[test]
    fn test_read_question_prefers_text() {
        let input = QuestionInput {
            text: Some("모돈 분만율 어때?".to_string()),
            file: None,
        };
        assert_eq!(read_question(&input).unwrap(), "모돈 분만율 어때?");
    }

    #[test]
    fn test_read_question_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("q.txt");
        std::fs::write(&path, "비육돈 사료비 얼마나 나왔어?").unwrap();

        let input = QuestionInput {
            text: None,
            file: Some(path),
        };
        assert_eq!(
            read_question(&input).unwrap(),
            "비육돈 사료비 얼마나 나왔어?"
        );
    }
}
