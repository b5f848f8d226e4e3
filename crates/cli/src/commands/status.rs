//! Status command - farm overview dashboard

use anyhow::{Context, Result};
use farm_assistant_domain::usecases::{AlertLevel, FarmOverview, RateFigure};
use std::path::PathBuf;

use crate::args::StatusArgs;
use crate::commands::classify::load_dataset;
use crate::config::AppConfig;

pub async fn execute(args: StatusArgs, config_path: Option<PathBuf>) -> Result<()> {
    let config = AppConfig::load(config_path.as_deref())?;
    let dataset = load_dataset(&config).await?;
    let overview = FarmOverview::from_dataset(&dataset);

    if args.json {
        let json = serde_json::to_string_pretty(&overview).context("Failed to serialize overview")?;
        println!("{}", json);
    } else {
        print_overview(&overview);
    }

    Ok(())
}

fn print_overview(overview: &FarmOverview) {
    println!("🐷 농장 현황");
    println!("============");
    println!();
    println!("총 사육두수: {}두", overview.total_head_count);
    println!("전체 폐사율: {}", format_rate(overview.mortality.as_ref()));
    println!(
        "모돈 분만율: {}",
        format_rate(overview.sow_farrowing.as_ref())
    );
    match overview.monthly_feed_cost {
        Some(cost) => println!("월 사료비:   {}원", group_thousands(cost)),
        None => println!("월 사료비:   -"),
    }

    println!();
    println!("사육 현황");
    for group in &overview.groups {
        println!(
            "  {:<6} {:>5}두  {}",
            group.category.label(),
            group.count,
            group.status
        );
    }

    if !overview.alerts.is_empty() {
        println!();
        println!("알림");
        for alert in &overview.alerts {
            let symbol = match alert.level {
                AlertLevel::Success => "✓",
                AlertLevel::Info => "ℹ",
                AlertLevel::Warning => "⚠",
            };
            println!("  {} {}", symbol, alert.message);
        }
    }
}

fn format_rate(figure: Option<&RateFigure>) -> String {
    match figure {
        Some(f) => format!("{:.1}% ({:+.1}%p)", f.current, f.delta),
        None => "-".to_string(),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
