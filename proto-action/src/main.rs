//! Proto Action - skeleton action recognition CLI
//!
//! Classifies pose-estimation keypoint sequences by nearest prototype.

use proto_action::app::cli::{Cli, Commands, ConfigAction};
use proto_action::app::config::Config;
use proto_action::loader::{load_labeled_examples, load_sequence_from_dir};
use proto_action::synthetic::{demo_examples, make_sequence, MotionKind};
use proto_action::{Classification, PrototypeBank};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) if path.exists() => Config::load(path)?,
        Some(path) => {
            debug!(path = %path.display(), "Config file not found, using defaults");
            Config::default()
        }
        None => Config::load_default()?,
    };
    let target = config_target(cli.config.as_deref());

    match cli.command {
        Commands::Classify {
            input,
            prototypes,
            json,
        } => {
            run_classify(input, prototypes, json, &config)?;
        }
        Commands::Demo { query, json } => {
            run_demo(query, json, &config)?;
        }
        Commands::Init { force } => {
            run_init(force, &target, &config)?;
        }
        Commands::Config { action } => {
            run_config(action, &target, &config)?;
        }
    }

    Ok(())
}

fn run_classify(
    input: Option<PathBuf>,
    prototypes: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let explicit = input.is_some();
    let input_dir = input.unwrap_or_else(Cli::default_input_dir);

    if !input_dir.is_dir() {
        if explicit {
            anyhow::bail!("Input directory not found: {:?}", input_dir);
        }
        info!(
            "{:?} directory not found, running the synthetic demo instead",
            input_dir
        );
        return run_demo(MotionKind::Run, json, config);
    }

    info!("Found input directory: {:?}", input_dir);
    let query = load_sequence_from_dir(&input_dir, &config.loader)?;
    let [frames, joints, coords] = query.shape();
    info!("Loaded sequence shape: ({}, {}, {})", frames, joints, coords);

    let bank = match &prototypes {
        Some(root) => build_bank_from_dir(root, config)?,
        None => {
            debug!("No prototype directory given, using synthetic demo bank");
            build_demo_bank(config)?
        }
    };

    let result = config.classifier().classify(&query, &bank)?;
    print_report(&result, json)
}

fn run_demo(query: MotionKind, json: bool, config: &Config) -> anyhow::Result<()> {
    info!("Running demo with a synthetic {} query", query);

    let bank = build_demo_bank(config)?;
    let sequence = make_sequence(config.demo.frames, query, &config.demo)?;
    let result = config.classifier().classify(&sequence, &bank)?;

    print_report(&result, json)
}

fn build_demo_bank(config: &Config) -> anyhow::Result<PrototypeBank> {
    let examples = demo_examples(&config.demo)?;
    Ok(config.prototype_builder().build(&examples))
}

fn build_bank_from_dir(root: &Path, config: &Config) -> anyhow::Result<PrototypeBank> {
    if !root.is_dir() {
        anyhow::bail!("Prototype directory not found: {:?}", root);
    }
    let examples = load_labeled_examples(root, &config.loader)?;
    Ok(config.prototype_builder().build(&examples))
}

fn print_report(result: &Classification, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", result.to_json()?);
        return Ok(());
    }

    println!("Predicted action: {}", result.label);
    println!("Scores:");
    for (label, score) in &result.scores {
        println!("  {}: {:.3}", label, score);
    }

    Ok(())
}

/// Config file targeted by `init` and `config reset`: `--config` or the default path
fn config_target(cli_path: Option<&Path>) -> PathBuf {
    cli_path.map(Path::to_path_buf).unwrap_or_else(Config::default_path)
}

fn write_config(path: &Path, config: &Config, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists, pass --force to replace it", path.display());
    }
    config.save(path)?;
    info!(path = %path.display(), "Wrote config");
    Ok(())
}

fn run_init(force: bool, target: &Path, config: &Config) -> anyhow::Result<()> {
    write_config(target, config, force)?;
    println!("{}", config.to_toml()?);
    Ok(())
}

fn run_config(action: ConfigAction, target: &Path, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", target.display());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Reset { force } => {
            write_config(target, &Config::default(), force)?;
            println!("Restored defaults in {}", target.display());
        }
    }
    Ok(())
}
