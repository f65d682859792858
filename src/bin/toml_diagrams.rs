use anyhow::Context;
use clap::Parser;
use girder_diagrams::app::{dry_run_report, run_diagrams};
use girder_diagrams::core::ConfigProvider;
use girder_diagrams::utils::{logger, validation::Validate};
use girder_diagrams::TomlConfig;

#[derive(Parser)]
#[command(name = "toml-diagrams")]
#[command(about = "Girder BMD/SFD generation driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "girder-diagrams.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override the output.open setting from config
    #[arg(long)]
    open: Option<bool>,

    /// Show what would be plotted without reading any input
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based girder-diagrams");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Some(open) = args.open {
        config.output.open = Some(open);
        tracing::info!("🔧 output.open overridden to: {}", open);
    }

    config
        .validate()
        .with_context(|| format!("invalid configuration in '{}'", args.config))?;

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no input will be read");
        println!(
            "{}",
            dry_run_report(&config, config.diagrams.profile, config.diagrams.scene)
        );
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run_diagrams(
        &config,
        config.diagrams.profile,
        config.diagrams.scene,
        monitor_enabled,
    ) {
        Ok(outputs) => {
            println!("✅ Diagrams generated successfully!");
            for output in outputs {
                println!("📁 {}", output);
            }
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Diagram generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("💡 {}", e.recovery_suggestion());
            Err(anyhow::Error::new(e).context(failure_context(&config)))
        }
    }
}

fn failure_context(config: &TomlConfig) -> String {
    format!("project '{}' did not produce its diagrams", config.project.name)
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Project: {}", config.project.name);
    if let Some(description) = &config.project.description {
        println!("  Description: {}", description);
    }
    println!("  Dataset: {}", config.dataset_path());
    println!("  Nodes: {}", config.nodes_path().unwrap_or("-"));
    println!("  Elements: {}", config.elements_path().unwrap_or("-"));
    println!("  Output: {}", config.output_path());
    println!("  Open figures: {}", config.open_figures());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}
