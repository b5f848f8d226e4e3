//! Doctor command - validate configuration and show status

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;

use crate::args::DoctorArgs;
use crate::commands::classify::load_dataset;
use crate::config::AppConfig;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    dataset: CheckResult,
    llm: CheckResult,
    transcript: CheckResult,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn warn(message: impl Into<String>) -> Self {
        Self {
            status: "warn".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        dataset: CheckResult::error("Not checked"),
        llm: CheckResult::error("Not checked"),
        transcript: CheckResult::error("Not checked"),
        overall: "error".to_string(),
    };

    match AppConfig::load(config_path.as_deref()) {
        Ok(config) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            report.dataset = check_dataset(&config).await;
            report.llm = check_llm(&config);
            report.transcript = check_transcript(&config);
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {:#}", e));
        }
    }

    let checks = [
        &report.config,
        &report.dataset,
        &report.llm,
        &report.transcript,
    ];

    report.overall = if checks.iter().any(|c| c.is_error()) {
        "error".to_string()
    } else if checks.iter().all(|c| c.is_ok()) {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

async fn check_dataset(config: &AppConfig) -> CheckResult {
    let source = match &config.general.data_file {
        Some(path) => path.display().to_string(),
        None => "built-in".to_string(),
    };

    match load_dataset(config).await {
        Ok(dataset) => CheckResult::ok(format!(
            "{} records, {} herd groups ({})",
            dataset.len(),
            dataset.herd().len(),
            source
        ))
        .with_details(serde_json::json!({
            "source": source,
            "records": dataset.len(),
            "head_count": dataset.herd().iter().map(|g| u64::from(g.count)).sum::<u64>(),
        })),
        Err(e) => CheckResult::error(format!("{:#}", e)),
    }
}

fn check_llm(config: &AppConfig) -> CheckResult {
    let provider = &config.llm.provider;
    let model = &config.llm.model;

    // Check if API key env var is set (without revealing the value)
    let api_key_env = match provider.as_str() {
        "anthropic" => &config.llm.anthropic.api_key_env,
        "openai" => &config.llm.openai.api_key_env,
        "ollama" => {
            return CheckResult::ok(format!(
                "Provider: ollama, Model: {}, base_url: {}",
                model, config.llm.ollama.base_url
            ));
        }
        "stub" => return CheckResult::ok("Provider: stub (offline)"),
        other => return CheckResult::error(format!("Unknown provider: {}", other)),
    };

    if api_key_env.trim().is_empty() {
        return CheckResult::error(format!("No API key env var configured for {}", provider));
    }

    match std::env::var(api_key_env) {
        Ok(val) if !val.trim().is_empty() => CheckResult::ok(format!(
            "Provider: {}, Model: {}, API key: {} (set)",
            provider, model, api_key_env
        )),
        _ => CheckResult::error(format!(
            "Provider: {}, Model: {}, API key: {} (not set)",
            provider, model, api_key_env
        )),
    }
}

fn check_transcript(config: &AppConfig) -> CheckResult {
    let Some(path) = &config.general.transcript_path else {
        return CheckResult::ok("Transcript disabled");
    };

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            CheckResult::warn(format!(
                "Transcript directory will be created: {}",
                parent.display()
            ))
        }
        _ => CheckResult::ok(format!("Transcript: {}", path.display())),
    }
}

fn print_report(report: &DoctorReport) {
    println!("farm-assistant Doctor Report");
    println!("============================");
    println!();

    print_check("Config", &report.config);
    print_check("Farm Data", &report.dataset);
    print_check("LLM Provider", &report.llm);
    print_check("Transcript", &report.transcript);

    println!();
    println!(
        "{} Overall: {}",
        symbol(&report.overall),
        report.overall.to_uppercase()
    );

    if report.overall == "ok" {
        println!();
        println!("Ready! Try: farm-assistant chat");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    println!("{} {}: {}", symbol(&result.status), name, result.message);
}

fn symbol(status: &str) -> &'static str {
    match status {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    }
}
