//! Termfolio CLI
//!
//! Launches the terminal portfolio, or runs single commands without the UI.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use ratatui::text::Line;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use termfolio::config::LoggingConfig;
use termfolio::content::{self, blog, markdown};
use termfolio::shell::{Action, Shell};
use termfolio::ticker::TickerFeed;
use termfolio::tui::App;
use termfolio::Config;

/// Termfolio - a security portfolio in your terminal
#[derive(Parser)]
#[command(name = "termfolio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "TERMFOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal UI (default)
    Run {
        /// Don't draw the matrix background
        #[arg(long)]
        no_matrix: bool,

        /// Don't poll headline sources; show the built-in list
        #[arg(long)]
        offline: bool,
    },

    /// Run one command and print its output
    Exec {
        /// Command line, e.g. `ls -la`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },

    /// Run one headline aggregation pass
    Headlines {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    // .env may supply TERMFOLIO_CONFIG, so load it before parsing
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize logging. The TUI owns the screen, so it logs to a file.
    let command = cli.command.unwrap_or(Commands::Run {
        no_matrix: false,
        offline: false,
    });
    let to_file = matches!(command, Commands::Run { .. });
    let _guard = match init_logging(&config.logging, cli.verbose, to_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error initializing logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    // Execute command
    let result = match command {
        Commands::Run { no_matrix, offline } => run_tui(config, no_matrix, offline).await,
        Commands::Exec { words } => run_exec(&config, &words.join(" ")).await,
        Commands::Headlines { format } => run_headlines(&config, format).await,
        Commands::Config => print_config(&config),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(
    logging: &LoggingConfig,
    verbose: bool,
    to_file: bool,
) -> anyhow::Result<Option<WorkerGuard>> {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let json = logging.format.eq_ignore_ascii_case("json");

    if !to_file {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);
        if json {
            builder.json().init();
        } else {
            builder.init();
        }
        return Ok(None);
    }

    let dir = logging.resolve_dir()?;
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("creating log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "termfolio.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(Some(guard))
}

async fn run_tui(mut config: Config, no_matrix: bool, offline: bool) -> anyhow::Result<()> {
    if no_matrix {
        config.matrix.enabled = false;
    }
    if offline {
        config.ticker.enabled = false;
    }

    info!(
        matrix = config.matrix.enabled,
        ticker = config.ticker.enabled,
        content_root = %config.content.root.display(),
        "Starting terminal"
    );

    let mut app = App::new(config);
    app.run().await?;

    info!("Terminal closed");
    Ok(())
}

async fn run_exec(config: &Config, line: &str) -> anyhow::Result<()> {
    let mut shell = Shell::new(config.terminal.clone());
    let action = shell.execute(line);

    for output in shell.output() {
        println!("{}", output.plain());
    }

    match action {
        Some(Action::OpenSection(section)) => {
            print_lines(&markdown::render(content::section_markdown(section)));
        }
        Some(Action::LoadBlog(post)) => match blog::load(&config.content.root, post).await {
            Ok(text) => print_lines(&markdown::render(&text)),
            Err(e) => {
                warn!(slug = post.slug, error = %e, "Failed to load blog post");
                println!("Failed to load blog post: {}", post.slug);
            }
        },
        Some(Action::Clear | Action::Exit) | None => {}
    }
    Ok(())
}

fn print_lines(lines: &[Line<'_>]) {
    println!();
    for line in lines {
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        println!("{text}");
    }
}

async fn run_headlines(config: &Config, format: OutputFormat) -> anyhow::Result<()> {
    let feed = TickerFeed::from_config(&config.ticker)?;
    let batch = feed.fetch().await;

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "headlines": batch.headlines,
                "failed": batch.failed,
                "fallback": batch.is_fallback,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            for headline in &batch.headlines {
                match &headline.url {
                    Some(url) => println!("{}\n    {url}", headline.ticker_text()),
                    None => println!("{}", headline.ticker_text()),
                }
            }
            if batch.is_fallback {
                eprintln!("No source answered; showing the built-in list.");
            } else if !batch.failed.is_empty() {
                let failed: Vec<&str> = batch.failed.iter().map(|o| o.label()).collect();
                eprintln!("Failed sources: {}", failed.join(", "));
            }
        }
    }
    Ok(())
}

fn print_config(config: &Config) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "termfolio", &mut io::stdout());
}
