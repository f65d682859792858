use clap::Parser;
use girder_diagrams::app::run_diagrams;
use girder_diagrams::utils::error::ErrorSeverity;
use girder_diagrams::utils::{logger, validation::Validate};
use girder_diagrams::CliConfig;

fn main() {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting girder-diagrams CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run_diagrams(
        &config,
        config.diagram.includes_profile(),
        config.diagram.includes_scene(),
        config.monitor,
    ) {
        Ok(outputs) => {
            println!("✅ Diagrams generated successfully!");
            for output in outputs {
                println!("📁 {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Diagram generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}
