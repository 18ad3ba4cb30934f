use clap::{Parser, Subcommand};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pain_assess::assessment::{
    AssessError, AssessmentResult, Intensity, PainLocation, PainTrackerForm, PainType,
    SymptomCategory, SymptomForm, Tool,
};
use pain_assess::catalog::Catalog;
use pain_assess::config::Config;
use pain_assess::i18n::Locale;
use pain_assess::output;
use pain_assess::reveal::RevealQueue;
use pain_assess::scoring::Scorer;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_CONFIG: i32 = 4;
const EXIT_INPUT: i32 = 5;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assess period pain from your main symptom and pain level
    Assess {
        /// Main symptom
        #[arg(long, value_enum)]
        symptom: Option<SymptomCategory>,

        /// Pain level from 1 (no pain) to 10 (extreme pain)
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        intensity: u8,

        /// Show the result without the processing delay
        #[arg(long)]
        no_delay: bool,
    },
    /// Record a pain entry by location, type and pain level
    Track {
        /// Where the pain is felt
        #[arg(long, value_enum)]
        location: Option<PainLocation>,

        /// What the pain feels like
        #[arg(long = "type", value_enum)]
        pain_type: Option<PainType>,

        /// Pain level from 1 (no pain) to 10 (extreme pain)
        #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
        intensity: u8,

        /// Show the result without the processing delay
        #[arg(long)]
        no_delay: bool,
    },
    /// List the recommendation catalog
    Catalog,
    /// Create a config file (interactive when stdin is a terminal)
    Init {
        /// Write the defaults without asking
        #[arg(long)]
        defaults: bool,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "pain-assess")]
#[command(about = "Period pain self-assessment with recommendations", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/pain-assess/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Display language (overrides the config file)
    #[arg(short, long, global = true, value_enum)]
    locale: Option<Locale>,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);

    if let Commands::Init { defaults, force } = cli.command {
        let interactive = !defaults && std::io::stdin().is_terminal();
        match pain_assess::config::init::run_init(config_path, interactive, force) {
            Ok(Some(path)) => println!("Config written to {}", path.display()),
            Ok(None) => {}
            Err(e) => {
                eprintln!("Init error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load and validate config at startup
    let config = match pain_assess::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    if let Err(errors) = pain_assess::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let locale = cli.locale.unwrap_or_else(|| config.locale());
    let scorer = Scorer::new(config.scoring());
    let use_colors = !cli.json && output::should_use_colors();
    debug!(locale = %locale, json = cli.json, "starting");

    let (tool, outcome, no_delay) = match cli.command {
        Commands::Assess {
            symptom,
            intensity,
            no_delay,
        } => {
            let outcome = Intensity::new(intensity).and_then(|intensity| {
                scorer.score_symptom_assessment(&SymptomForm { symptom, intensity }, locale)
            });
            (Tool::SymptomAssessment, outcome, no_delay)
        }
        Commands::Track {
            location,
            pain_type,
            intensity,
            no_delay,
        } => {
            let outcome = Intensity::new(intensity).and_then(|intensity| {
                scorer.score_pain_tracker(
                    &PainTrackerForm {
                        location,
                        pain_type,
                        intensity,
                    },
                    locale,
                )
            });
            (Tool::PainTracker, outcome, no_delay)
        }
        Commands::Catalog => {
            let catalog = Catalog::builtin();
            if cli.json {
                match output::format_catalog_json(catalog, locale) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("Output error: {:#}", e);
                        std::process::exit(EXIT_FAILURE);
                    }
                }
            } else {
                println!("{}", output::format_catalog(catalog, locale, use_colors));
            }
            std::process::exit(EXIT_SUCCESS);
        }
        Commands::Init { .. } => unreachable!("handled before config load"),
    };

    // A missing selection blocks submission: show the alert, no result
    let result = match outcome {
        Ok(result) => result,
        Err(e @ AssessError::InvalidInput { .. }) => {
            eprintln!("{}", e);
            std::process::exit(EXIT_INPUT);
        }
        Err(e) => {
            eprintln!("Input error: {}", e);
            std::process::exit(EXIT_INPUT);
        }
    };

    let result = if no_delay {
        result
    } else {
        match reveal_after_delay(&config, tool, locale, result).await {
            Ok(result) => result,
            Err(e) => {
                eprintln!("Error: {:#}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
    };

    if let Err(e) = print_result(&result, cli.json, use_colors) {
        eprintln!("Output error: {:#}", e);
        std::process::exit(EXIT_FAILURE);
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Hold the result back for the configured delay, showing the pending
/// status meanwhile.
async fn reveal_after_delay(
    config: &Config,
    tool: Tool,
    locale: Locale,
    result: AssessmentResult,
) -> anyhow::Result<AssessmentResult> {
    let queue = RevealQueue::new(config.reveal_delay(tool)?);
    let submission = queue.submit(result);
    if std::io::stderr().is_terminal() {
        eprintln!("{}", tool.pending_text().get(locale));
    }
    queue
        .wait_for(submission)
        .await
        .ok_or_else(|| anyhow::anyhow!("Submission was cancelled before its result was shown"))
}

fn print_result(result: &AssessmentResult, json: bool, use_colors: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", output::format_result_json(result)?);
    } else {
        println!("{}", output::format_result(result, use_colors));
    }
    Ok(())
}
