mod input;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use prose_engine::config::resolve_config_path;
use prose_engine::service::{
    analyze_with_timeout, fix_and_paraphrase_with_timeout, rewrite_with_timeout, RewriteMode,
};
use prose_engine::{load_config, Config, RewritePipeline, TextAnalyzer};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "prose-assistant")]
#[command(about = "Readability, grammar and tone feedback with model-backed rewriting", long_about = None)]
struct Cli {
    /// Config file (default: ~/.config/prose-assistant/config.toml)
    #[arg(long, global = true)]
    config: Option<String>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Analyze readability, grammar, sentiment and word statistics")]
    Analyze(InputArgs),
    #[command(about = "Correct grammar and spelling")]
    Fix(InputArgs),
    #[command(about = "Paraphrase for style")]
    Improve(InputArgs),
    #[command(about = "Correct, then paraphrase long enough text")]
    Rewrite(InputArgs),
    #[command(about = "Show the state of the rewrite models")]
    Models {
        /// Load both models before reporting
        #[arg(long)]
        load: bool,
    },
    #[command(about = "Print the effective configuration")]
    Config {
        /// Print only the config file path
        #[arg(long)]
        path: bool,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Text to process; read from stdin when omitted
    text: Option<String>,

    /// Read the text from a file
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
}

impl InputArgs {
    fn read(self) -> Result<String> {
        input::read_input(self.text, self.file.as_deref())
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", rendered);
    Ok(())
}

async fn analyze(config: &Config, text: String) -> Result<()> {
    let analyzer = Arc::new(TextAnalyzer::new().with_limits(config.analysis.clone()));
    let timeout = Duration::from_secs(config.analysis.timeout_secs);

    let report = analyze_with_timeout(analyzer, text, timeout).await;
    print_json(&report)
}

async fn rewrite(config: &Config, text: String, mode: Option<RewriteMode>) -> Result<()> {
    let pipeline = Arc::new(RewritePipeline::from_config(&config.rewrite));
    let timeout = Duration::from_secs(config.rewrite.timeout_secs);

    match mode {
        Some(mode) => print_json(&rewrite_with_timeout(pipeline, text, mode, timeout).await),
        None => print_json(&fix_and_paraphrase_with_timeout(pipeline, text, timeout).await),
    }
}

async fn show_models(config: &Config, load: bool) -> Result<()> {
    let pipeline = Arc::new(RewritePipeline::from_config(&config.rewrite));

    if load {
        info!("Loading rewrite models...");
        let loader = pipeline.clone();
        tokio::task::spawn_blocking(move || {
            loader.load_grammar_model();
            loader.load_paraphraser_model();
        })
        .await
        .context("Model loading task failed")?;
    }

    let models = [&config.rewrite.grammar_model, &config.rewrite.paraphrase_model];
    let mut report = serde_json::Map::new();
    for ((name, state), model) in pipeline.model_states().into_iter().zip(models) {
        report.insert(name.to_string(), json!({ "model": model, "state": state }));
    }

    print_json(&report)
}

fn show_config(config: &Config, config_arg: Option<&str>, path_only: bool) -> Result<()> {
    if path_only {
        println!("{}", resolve_config_path(config_arg)?.display());
        return Ok(());
    }

    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(cli.config.as_deref());
    debug!("Effective config: {:?}", config);

    match cli.command {
        Commands::Analyze(args) => analyze(&config, args.read()?).await?,
        Commands::Fix(args) => rewrite(&config, args.read()?, Some(RewriteMode::Fix)).await?,
        Commands::Improve(args) => {
            rewrite(&config, args.read()?, Some(RewriteMode::Improve)).await?
        }
        Commands::Rewrite(args) => rewrite(&config, args.read()?, None).await?,
        Commands::Models { load } => show_models(&config, load).await?,
        Commands::Config { path } => show_config(&config, cli.config.as_deref(), path)?,
    }

    Ok(())
}
