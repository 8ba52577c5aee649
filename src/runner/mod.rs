pub mod context;
pub mod state;

pub use context::*;
pub use state::*;

use crate::config::Config;
use crate::suites;
use anyhow::Result;
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Options for one harness run
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Directory for result files
    pub output: PathBuf,

    /// Write JSON and JUnit reports after the run
    pub report: bool,

    /// Run only these categories (by suite name), in declared order
    pub categories: Option<Vec<String>>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            output: PathBuf::from("./output"),
            report: false,
            categories: None,
        }
    }
}

/// Run the full test sequence against the configured deployment.
/// Returns true iff every recorded case passed.
pub async fn run_harness(config: &Config, options: &RunOptions) -> Result<bool> {
    validate_categories(options.categories.as_deref())?;

    let mut ctx = SessionContext::new(config)?;
    let mut log = HarnessState::new(&uuid::Uuid::new_v4().to_string());

    println!(
        "\n{} Marketplace backend API tests",
        "🚀".to_string().yellow()
    );
    println!("{} Testing against: {}", "📍".to_string(), config.api_base().cyan());
    println!("{}", "=".repeat(80));

    log.start();

    for suite in suites::all() {
        if !selected(options.categories.as_deref(), suite.name()) {
            continue;
        }
        log.begin_category(suite.name(), suite.title());
        suite.run(&mut ctx, &mut log).await;
    }

    log.finish();
    print_summary(&log);

    if options.report {
        write_reports(&log, &options.output)?;
    }

    Ok(log.all_passed())
}

/// A typoed filter would otherwise match no suite and report a green run
/// over zero cases
fn validate_categories(filter: Option<&[String]>) -> Result<()> {
    let Some(names) = filter else {
        return Ok(());
    };

    let known: Vec<&str> = suites::all().iter().map(|s| s.name()).collect();
    if names.is_empty() {
        anyhow::bail!("No categories selected (expected one of: {})", known.join(", "));
    }
    for name in names {
        if !known.contains(&name.as_str()) {
            anyhow::bail!(
                "Unknown category: {} (expected one of: {})",
                name,
                known.join(", ")
            );
        }
    }
    Ok(())
}

fn selected(filter: Option<&[String]>, name: &str) -> bool {
    match filter {
        Some(names) => names.iter().any(|n| n == name),
        None => true,
    }
}

fn print_summary(log: &HarnessState) {
    let summary = log.summary();

    println!("\n{}", "=".repeat(80));
    println!("{} TEST SUMMARY", "📊".to_string());
    println!("{}", "=".repeat(80));
    println!("Total Tests: {}", summary.total);
    println!("Passed: {}", summary.passed.to_string().green());
    println!("Failed: {}", summary.failed.to_string().red());
    println!("Success Rate: {:.1}%", summary.success_rate());

    if summary.failed > 0 {
        println!("\n{} FAILED TESTS:", "❌".to_string());
        for record in log.failed_records() {
            println!("   • {}: {}", record.name, record.message);
        }
    }
}

fn write_reports(log: &HarnessState, output: &Path) -> Result<()> {
    std::fs::create_dir_all(output)?;

    let results = crate::report::types::TestResults {
        session_id: log.session_id.clone(),
        cases: log.records().to_vec(),
        summary: log.summary(),
        generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    };

    let json_path = output.join("test-results.json");
    std::fs::write(&json_path, serde_json::to_string_pretty(&results)?)?;
    println!(
        "\n{} JSON report saved to: {}",
        "📄".to_string().blue(),
        json_path.display().to_string().cyan()
    );

    crate::report::junit::write_report(&results, output)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filter_selects_everything() {
        assert!(selected(None, "auth"));
        assert!(selected(None, "payments"));
    }

    #[test]
    fn filter_selects_named_categories_only() {
        let filter = vec!["auth".to_string(), "catalog".to_string()];
        assert!(selected(Some(&filter), "auth"));
        assert!(selected(Some(&filter), "catalog"));
        assert!(!selected(Some(&filter), "payments"));
    }

    #[test]
    fn known_category_filters_validate() {
        assert!(validate_categories(None).is_ok());
        let filter = vec!["auth".to_string(), "access".to_string()];
        assert!(validate_categories(Some(&filter)).is_ok());
    }

    #[test]
    fn unknown_category_is_rejected() {
        let filter = vec!["payment".to_string()];
        let err = validate_categories(Some(&filter)).unwrap_err();
        assert!(err.to_string().contains("Unknown category: payment"));

        let empty: Vec<String> = Vec::new();
        assert!(validate_categories(Some(&empty)).is_err());
    }

    #[tokio::test]
    async fn run_refuses_misspelled_categories_instead_of_green_run() {
        let config = Config::default();
        let options = RunOptions {
            categories: Some(vec!["payment".to_string()]),
            ..RunOptions::default()
        };
        let err = run_harness(&config, &options).await.unwrap_err();
        assert!(err.to_string().contains("Unknown category: payment"));
    }
}
