use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use mart_tester::runner::RunOptions;
use mart_tester::{report, runner, Config};

#[derive(Parser)]
#[command(name = "mart-tester")]
#[command(version = "0.1.0")]
#[command(about = "Integration test harness for the marketplace backend API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the test sequence against a deployment
    Run {
        /// Base URL of the deployment (defaults to $NEXT_PUBLIC_BASE_URL)
        #[arg(short, long)]
        base_url: Option<String>,

        /// Output directory for result files
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Write JSON and JUnit reports after the run
        #[arg(long, default_value = "false")]
        report: bool,

        /// Per-request timeout in seconds
        #[arg(long, default_value = "30")]
        timeout: u64,

        /// Run only these categories (comma-separated:
        /// auth,catalog,payments,custom,user,access)
        #[arg(short, long, value_delimiter = ',')]
        category: Option<Vec<String>>,
    },

    /// Generate report from saved test results
    Report {
        /// Path to test results JSON
        results: PathBuf,

        /// Output format (json, junit)
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            base_url,
            output,
            report,
            timeout,
            category,
        } => {
            let mut config = Config::from_env();
            if let Some(url) = base_url {
                config.base_url = url.trim_end_matches('/').to_string();
            }
            config.timeout_secs = timeout;

            println!("{} Target: {}", "▶".green().bold(), config.base_url.cyan());
            println!("  Output: {}", output.display().to_string().cyan());
            if report {
                println!("  Reports: {}", "Enabled".green());
            }
            if let Some(ref names) = category {
                println!("  Categories: {}", names.join(", ").yellow());
            }

            let options = RunOptions {
                output,
                report,
                categories: category,
            };

            let all_passed = runner::run_harness(&config, &options).await?;

            if all_passed {
                println!(
                    "\n{} All tests passed! Backend API is working correctly.",
                    "🎉".to_string().green()
                );
            } else {
                println!(
                    "\n{} Some tests failed. Check the output above for details.",
                    "⚠️".to_string().yellow()
                );
                std::process::exit(1);
            }
        }

        Commands::Report {
            results,
            format,
            output,
        } => {
            println!(
                "{} Generating {} report from: {}",
                "📊".to_string().blue(),
                format.cyan(),
                results.display()
            );
            report::generate_report(&results, &format, output.as_deref())?;
        }
    }

    Ok(())
}
