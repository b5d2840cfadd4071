//! research-brief - Summarize a research article with an LLM and lay it out for Slack

mod article;
mod config;
mod error;
mod llm;
mod pipeline;
mod slack;
mod summary;
mod text;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::BriefConfig;
use llm::LlmClient;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "research-brief")]
#[command(about = "Summarize a research article with an LLM and write Slack Block Kit payloads", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the article JSON array (default: data/input.json)
    input: Option<PathBuf>,

    /// Directory for the payload files (default: current directory)
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Model preset to use (overrides default from llm.toml)
    #[arg(short, long)]
    model: Option<String>,

    /// Enable debug output
    #[arg(short, long, default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lay out an already generated summary without calling the model
    Render {
        /// File containing the model's section-delimited summary
        summary_file: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Write the default research-brief.toml if none exists
    Init,
    /// List available model presets
    List,
    /// Set the default model preset
    SetDefault {
        /// Name of the preset to use as default
        preset: String,
    },
}

fn init_logging(debug: bool) {
    let default_filter = if debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.debug);

    if let Some(Commands::Config { action }) = &args.command {
        return handle_config_command(action);
    }

    let config = BriefConfig::load().context("Failed to load configuration")?;
    let out_dir = args.out_dir.clone().unwrap_or_else(|| config.out_dir.clone());

    let outcome = match &args.command {
        Some(Commands::Render { summary_file }) => render_file(summary_file, &config, &out_dir),
        _ => run(&args, &config, &out_dir).await,
    };

    if let Err(err) = &outcome {
        save_raw_output(err, &out_dir);
    }

    outcome
}

/// Keep the model output behind a failed validation; never masks `err`.
fn save_raw_output(err: &anyhow::Error, out_dir: &Path) {
    match pipeline::persist_invalid_summary(err, out_dir) {
        Ok(Some(path)) => log::error!("Raw model output saved to {}", path.display()),
        Ok(None) => {}
        Err(e) => log::error!("Could not save raw model output: {:#}", e),
    }
}

/// Full run: load the article, ask the model, write both payloads.
async fn run(args: &Args, config: &BriefConfig, out_dir: &Path) -> Result<()> {
    let input = args.input.clone().unwrap_or_else(|| config.input.clone());
    let articles = article::load_articles(&input)?;

    let llm = LlmClient::new(args.model.as_deref())?;
    let today = chrono::Local::now().date_naive();

    let briefing = pipeline::generate_briefing(&articles[0], config, &llm, today).await?;
    let (parent, thread) = briefing.write_to(out_dir)?;

    log::info!(
        "✅ Saved {} and {}",
        parent.display(),
        thread.display()
    );
    Ok(())
}

/// Offline layout of a saved summary into `summary_blocks.json`.
fn render_file(summary_file: &Path, config: &BriefConfig, out_dir: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(summary_file)
        .with_context(|| format!("Failed to read {}", summary_file.display()))?;

    let blocks = pipeline::render_summary(&raw, &config.pipeline)?;

    std::fs::create_dir_all(out_dir)?;
    let path = out_dir.join("summary_blocks.json");
    std::fs::write(&path, serde_json::to_string_pretty(&blocks)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("✅ Wrote {} blocks to {}", blocks.len(), path.display());
    Ok(())
}

/// Handle config subcommands
fn handle_config_command(action: &ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let path = BriefConfig::config_path()?;
            let config = BriefConfig::load()?;
            println!("Config file: {}", path.display());
            println!();
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Init => {
            let path = BriefConfig::config_path()?;
            if path.exists() {
                println!("Config already exists: {}", path.display());
            } else {
                BriefConfig::default().save_to(&path)?;
                println!("Wrote default config to {}", path.display());
            }
        }
        ConfigAction::List => {
            let config = llm_client::Config::load()?;
            println!("Available presets:");
            for (name, preset) in &config.presets {
                let default_marker = if *name == config.default_preset {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "  {} - {} / {}{}",
                    name, preset.provider, preset.model, default_marker
                );
            }
        }
        ConfigAction::SetDefault { preset } => {
            let mut config = llm_client::Config::load()?;
            // Verify preset exists
            config.get_preset(preset)?;
            config.default_preset = preset.clone();
            config.save()?;
            println!("Default preset set to: {}", preset);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_defaults() {
        let args = Args::try_parse_from(["research-brief"]).unwrap();
        assert!(args.input.is_none());
        assert!(args.command.is_none());
        assert!(!args.debug);
    }

    #[test]
    fn test_args_parse_render() {
        let args =
            Args::try_parse_from(["research-brief", "-o", "out", "render", "summary.txt"]).unwrap();
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert!(matches!(
            args.command,
            Some(Commands::Render { ref summary_file }) if summary_file == Path::new("summary.txt")
        ));
    }

    #[test]
    fn test_render_file_writes_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.txt");
        std::fs::write(
            &summary,
            "[SECTION] Summary\nHello world.\n[SECTION] One-liner\nDone.",
        )
        .unwrap();

        let mut config = BriefConfig::default();
        config.pipeline.required_sections = vec!["Summary".to_string(), "One-liner".to_string()];

        let out = dir.path().join("out");
        render_file(&summary, &config, &out).unwrap();

        let blocks: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("summary_blocks.json")).unwrap())
                .unwrap();
        assert_eq!(blocks.as_array().unwrap().len(), 4);
        assert_eq!(blocks[1]["text"]["text"], "Hello world.");
    }

    #[test]
    fn test_save_raw_output_failure_keeps_error() {
        let dir = tempfile::tempdir().unwrap();
        // A regular file where the output directory should be
        let blocked = dir.path().join("out");
        std::fs::write(&blocked, "").unwrap();

        let err: anyhow::Error = error::BriefError::MissingSections {
            missing: vec!["One-liner".to_string()],
            raw: "[SECTION] Summary\nBody".to_string(),
        }
        .into();

        save_raw_output(&err, &blocked);
        assert!(err.to_string().contains("One-liner"));
        assert!(!blocked.join(pipeline::INVALID_SUMMARY_FILE).exists());
    }

    #[test]
    fn test_save_raw_output_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let err: anyhow::Error = error::BriefError::MissingSections {
            missing: vec!["Summary".to_string()],
            raw: "nothing useful".to_string(),
        }
        .into();

        save_raw_output(&err, dir.path());
        let saved = std::fs::read_to_string(dir.path().join(pipeline::INVALID_SUMMARY_FILE)).unwrap();
        assert_eq!(saved, "nothing useful");
    }

    #[test]
    fn test_render_file_missing_sections_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let summary = dir.path().join("summary.txt");
        std::fs::write(&summary, "[SECTION] Summary\nOnly this.").unwrap();

        let out = dir.path().join("out");
        let err = render_file(&summary, &BriefConfig::default(), &out).unwrap_err();

        assert!(err.to_string().contains("Top 5 Findings"));
        assert!(!out.join("summary_blocks.json").exists());
    }
}
