use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use advisor_kit::config::Config;
use advisor_kit::disc::DiscSession;
use advisor_kit::income::{
    parse_choice, BreakImpact, EstimateResult, FamilyStatus, IncomeProfile, IncomeSession, Kids,
    LifeCostBracket, Mortgage, WorkUntil,
};
use advisor_kit::tui::Theme;

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INVALID_INPUT: i32 = 2;
const EXIT_BROWSER: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive questionnaire and calculator (default if no subcommand)
    Tui {
        /// Color palette; auto asks the terminal for its background
        #[arg(long, value_enum, default_value_t = Theme::Auto)]
        theme: Theme,
    },
    /// Score DISC answers given in question order
    Disc {
        /// Comma-separated 1-5 ratings; leave an entry empty to skip it (5,4,,3)
        #[arg(short, long, default_value = "")]
        answers: String,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Estimate the lifetime income needed for a profile
    Income {
        /// Current age (18-65)
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(18..=65))]
        age: u8,

        /// When earning stops: 55, 60, 65 or uncertain
        #[arg(long, default_value = "60", value_parser = parse_choice::<WorkUntil>)]
        work_until: WorkUntil,

        /// single, married or married-kids
        #[arg(long, default_value = "single", value_parser = parse_choice::<FamilyStatus>)]
        family: FamilyStatus,

        /// Number of children: 1, 2 or 3+ (only counted for married-kids)
        #[arg(long, default_value = "1", value_parser = parse_choice::<Kids>)]
        kids: Kids,

        /// none, moderate or heavy
        #[arg(long, default_value = "none", value_parser = parse_choice::<Mortgage>)]
        mortgage: Mortgage,

        /// What a year without income does: negligible, draws-savings or major-gap
        #[arg(long, default_value = "draws-savings", value_parser = parse_choice::<BreakImpact>)]
        break_impact: BreakImpact,

        /// Monthly living cost bracket: under-3, 3-5, 5-8 or over-8 (萬)
        #[arg(long, default_value = "3-5", value_parser = parse_choice::<LifeCostBracket>)]
        life_cost: LifeCostBracket,

        /// Email or phone number; unlocks the full analysis
        #[arg(long)]
        contact: Option<String>,

        /// Show how each factor moves the estimate
        #[arg(long)]
        explain: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the configured DISC questionnaire
    Questions,
    /// Open the contact link in the browser
    Contact,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "advisor-kit")]
#[command(about = "DISC questionnaire and lifetime income estimator for advisors", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/advisor-kit/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Income estimate as emitted by `income --format json`
#[derive(Serialize)]
struct IncomeOutput<'a> {
    profile: &'a IncomeProfile,
    #[serde(flatten)]
    result: &'a EstimateResult,
    unlocked: bool,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "advisor_kit=debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(advisor_kit::stderr_buffer::BufferedStderr),
        )
        .init();
}

fn print_json<T: Serialize>(value: &T) {
    match advisor_kit::output::format_json(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_FAILURE);
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Tui { theme: Theme::Auto });
    let config_path = cli.config.map(PathBuf::from);

    // Init writes the config, so it must not require one to exist
    if let Commands::Init = command {
        if let Err(e) = advisor_kit::config::run_init_wizard(config_path) {
            eprintln!("Init failed: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    let config = match advisor_kit::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = advisor_kit::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }
    debug!(cta_link = %config.cta_link, "config validated");

    let use_colors = advisor_kit::output::should_use_colors();

    match command {
        Commands::Tui { theme } => {
            let colors = advisor_kit::tui::resolve_theme(theme);
            let app = advisor_kit::tui::App::new(&config, colors);
            if let Err(e) = advisor_kit::tui::run_tui(app).await {
                eprintln!("TUI error: {}", e);
                std::process::exit(EXIT_FAILURE);
            }
        }
        Commands::Disc { answers, format } => {
            run_disc(&config, &answers, format, use_colors);
        }
        Commands::Income {
            age,
            work_until,
            family,
            kids,
            mortgage,
            break_impact,
            life_cost,
            contact,
            explain,
            format,
        } => {
            let profile = IncomeProfile {
                age,
                work_until,
                family,
                kids,
                mortgage,
                break_impact,
                life_cost,
            };
            let mut session = IncomeSession::new(config.estimator());
            session.profile = profile;
            if let Some(contact) = contact.as_deref() {
                if !session.unlock(contact) {
                    eprintln!("Invalid contact: must not be blank");
                    std::process::exit(EXIT_INVALID_INPUT);
                }
            }
            let result = session.result();

            match format {
                OutputFormat::Json => print_json(&IncomeOutput {
                    profile: &session.profile,
                    result: &result,
                    unlocked: session.contact.is_unlocked(),
                }),
                OutputFormat::Text => {
                    println!(
                        "{}",
                        advisor_kit::output::format_estimate(
                            &session.profile,
                            &result,
                            explain,
                            use_colors
                        )
                    );
                    println!();
                    println!("{}", advisor_kit::output::format_contact_gate(&session.contact));
                    println!("{}", advisor_kit::output::format_cta(&config.cta_link, use_colors));
                }
            }
        }
        Commands::Questions => {
            println!(
                "{}",
                advisor_kit::output::format_questions(&config.questions(), use_colors)
            );
        }
        Commands::Contact => {
            if let Err(e) = advisor_kit::browser::open_url(&config.cta_link) {
                eprintln!("Failed to open browser: {}", e);
                std::process::exit(EXIT_BROWSER);
            }
            println!("Opening {} in browser", config.cta_link);
        }
        // Handled before config load
        Commands::Init => {}
    }

    std::process::exit(EXIT_SUCCESS);
}

fn run_disc(config: &Config, answers: &str, format: OutputFormat, use_colors: bool) {
    let mut session = DiscSession::new(config.questions());

    let parsed = match advisor_kit::disc::parse_answer_list(answers, session.question_count()) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid answers: {}", e);
            std::process::exit(EXIT_INVALID_INPUT);
        }
    };
    for (index, value) in parsed.iter() {
        if let Err(e) = session.record_answer(index, value.value()) {
            eprintln!("Invalid answers: {}", e);
            std::process::exit(EXIT_INVALID_INPUT);
        }
    }

    let report = session.report();
    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            println!("{}", advisor_kit::output::format_disc_report(&report, use_colors));
            if report.complete {
                println!();
                println!("{}", advisor_kit::output::format_cta(&config.cta_link, use_colors));
            }
        }
    }
}
