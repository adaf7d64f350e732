// LTR trainer - main.rs
// Runs svm_rank_learn and turns its weight vector into a Solr LTR linear model

use anyhow::{Context, Result};
use clap::Parser;
use ltr_trainer::cli::Cli;
use ltr_trainer::config::load_config;
use ltr_trainer::pipeline::ModelBuilder;
use ltr_trainer::trainer::{ProcessLauncher, PromptConfirm};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout is reserved for the model document
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ltr_trainer={}", cli.log_filter())));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();

    let mut config = load_config(cli.config.as_deref()).context("failed to load configuration")?;
    cli.apply_overrides(&mut config);

    let target = cli.output_target();
    let mut builder = ModelBuilder::new(config, PromptConfirm::stdio(), ProcessLauncher);
    builder
        .run(&cli.training_file, &target)
        .with_context(|| format!("failed to build model from {}", cli.training_file.display()))?;

    Ok(())
}
