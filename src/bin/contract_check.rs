use std::time::Duration;

use clap::Parser;
use destinations_api::utils::logger::{self, LogFormat};
use destinations_api::utils::validation::{validate_range, Validate};
use destinations_api::{ApiError, ContractChecker, ContractExpectation, E2eConfig};

#[derive(Parser)]
#[command(name = "contract-check")]
#[command(about = "Checks a running destinations API against its HTTP contract")]
struct Args {
    /// Path to an E2E TOML configuration file; defaults apply when omitted
    #[arg(short, long)]
    config: Option<String>,

    /// Override the base URL from the configuration
    #[arg(long)]
    base_url: Option<String>,

    #[arg(long, default_value = "/api/destinations")]
    path: String,

    #[arg(long, default_value = "200")]
    expect_status: u16,

    /// Expected length of the JSON array body
    #[arg(long, default_value = "3")]
    expect_length: usize,

    /// Only check the status code
    #[arg(long)]
    no_length: bool,

    #[arg(long, default_value = "10")]
    timeout_seconds: u64,

    /// Print the spec files matched by the configured pattern and exit
    #[arg(long)]
    list_specs: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // 初始化日誌
    logger::init_logger(LogFormat::Compact, args.verbose);

    if let Err(e) = run(args).await {
        tracing::error!(
            "❌ Contract check failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(e.exit_code().max(1));
    }
}

async fn run(args: Args) -> Result<(), ApiError> {
    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            E2eConfig::from_file(path)?
        }
        None => E2eConfig::default(),
    };

    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    config.validate()?;
    validate_range("timeout_seconds", args.timeout_seconds, 1, 300)?;

    if args.list_specs {
        let specs = config.discover_specs(".")?;
        println!("{} spec file(s) match '{}':", specs.len(), config.spec_pattern);
        for spec in specs {
            println!("  {}", spec);
        }
        return Ok(());
    }

    let checker = ContractChecker::new(&config.base_url, Duration::from_secs(args.timeout_seconds))?;
    tracing::info!("🔍 Checking {} against {}", args.path, checker.base_url());
    let mut expectation = ContractExpectation::new(args.path, args.expect_status);
    if !args.no_length {
        expectation = expectation.with_length(args.expect_length);
    }

    let report = checker.check(&expectation).await?;
    println!(
        "✅ GET {} -> {}{} in {:?}",
        report.url,
        report.status,
        report
            .length
            .map(|n| format!(", {} item(s)", n))
            .unwrap_or_default(),
        report.elapsed
    );

    Ok(())
}
