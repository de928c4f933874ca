//! `tubelens` -- YouTube channel analyzer and performance auditor.
//!
//! # Environment variables
//!
//! | Variable              | Default    | Description                          |
//! |-----------------------|------------|--------------------------------------|
//! | `ANALYSIS_OUTPUT_DIR` | `analysis` | Root for `<channel>/<timestamp>/`    |
//! | `YTDLP_BIN`           | `yt-dlp`   | Extractor executable                 |

mod console;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tubelens_core::report::audit_text::{action_plan_text, audit_report};
use tubelens_pipeline::audit_run::{discover_exports, run_audit, AuditInputs};
use tubelens_pipeline::channel_run::{run_channel_analysis, ChannelRun};
use tubelens_pipeline::config::AnalyzerConfig;
use tubelens_pipeline::events::EventSink;
use tubelens_pipeline::extractor::YtDlpExtractor;
use tubelens_pipeline::opener;

#[derive(Debug, Parser)]
#[command(name = "tubelens", version, about = "YouTube channel analyzer and performance auditor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Extract every video of a channel and write the analysis documents.
    Analyze(AnalyzeArgs),
    /// Audit YouTube Studio analytics exports and print an action plan.
    Audit(AuditArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Channel URL or handle; prompted for when omitted.
    url: Option<String>,

    /// Skip the confirmation prompt.
    #[arg(short, long)]
    yes: bool,

    /// Open the output folder when the analysis completes.
    #[arg(long)]
    open: bool,
}

#[derive(Debug, Args)]
struct AuditArgs {
    /// Totals export (daily channel views).
    #[arg(long, value_name = "PATH")]
    totals: Option<PathBuf>,

    /// Chart data export (per-video daily views).
    #[arg(long, value_name = "PATH")]
    chart: Option<PathBuf>,

    /// Look for exports in DIR (default: ~/Downloads).
    #[arg(long, value_name = "DIR", num_args = 0..=1)]
    discover: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tubelens_cli=info,tubelens_pipeline=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AnalyzerConfig::from_env();
    tracing::debug!(
        output_root = %config.output_root.display(),
        ytdlp = %config.ytdlp_bin,
        "Loaded analyzer configuration"
    );

    match cli.command {
        Command::Analyze(args) => analyze(args, &config).await,
        Command::Audit(args) => audit(args).await,
    }
}

async fn analyze(args: AnalyzeArgs, config: &AnalyzerConfig) -> anyhow::Result<ExitCode> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    let url = match args.url {
        Some(url) => url,
        None => console::ask(&mut stdin.lock(), &mut stdout, "Enter YouTube channel URL: ")?,
    };

    let run = ChannelRun::new(&url, &config.output_root, chrono::Utc::now())?;
    println!("Channel: {}", run.channel_name);
    println!("URL: {}", run.channel_url);
    println!("Output: {}", run.output_dir.display());

    if !args.yes && !console::confirm(&mut stdin.lock(), &mut stdout, "Proceed with analysis?")? {
        println!("Analysis cancelled");
        return Ok(ExitCode::SUCCESS);
    }

    let (sink, mut receiver) = EventSink::channel();
    let extractor = YtDlpExtractor::new(config.ytdlp_bin.clone());
    let task = tokio::spawn(async move { run_channel_analysis(&extractor, &run, &sink).await });

    while let Some(event) = receiver.recv().await {
        println!("{}", console::describe_event(&event));
        stdout.flush()?;
    }

    // A failed run has already printed its error event.
    let Ok(outcome) = task.await? else {
        return Ok(ExitCode::FAILURE);
    };

    if args.open {
        opener::open_folder(&outcome.output_dir).await?;
    }
    Ok(ExitCode::SUCCESS)
}

async fn audit(args: AuditArgs) -> anyhow::Result<ExitCode> {
    let mut inputs = match &args.discover {
        Some(dir) => {
            let dir = dir
                .clone()
                .unwrap_or_else(|| console::downloads_dir(|key| std::env::var(key).ok()));
            println!("Looking for analytics exports in {}", dir.display());
            discover_exports(&dir).await?
        }
        None => AuditInputs::default(),
    };
    if let Some(totals) = args.totals {
        inputs.totals = Some(totals);
    }
    if let Some(chart) = args.chart {
        inputs.chart = Some(chart);
    }

    if inputs.is_empty() && args.discover.is_none() {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let totals = console::ask(
            &mut stdin.lock(),
            &mut stdout,
            "Path to totals CSV (Enter to skip): ",
        )?;
        let chart = console::ask(
            &mut stdin.lock(),
            &mut stdout,
            "Path to chart data CSV (Enter to skip): ",
        )?;
        inputs = AuditInputs::from_user_paths(&totals, &chart);
    }

    for (label, path) in [("Totals", &inputs.totals), ("Chart data", &inputs.chart)] {
        match path {
            Some(path) => println!("{label}: {}", path.display()),
            None => println!("{label}: not provided, skipping the analyses that need it"),
        }
    }

    let outcome = run_audit(&inputs).await?;
    println!();
    print!("{}", audit_report(&outcome.report));
    print!("{}", action_plan_text(&outcome.recommendations));
    Ok(ExitCode::SUCCESS)
}
