//! Config check command handler.

use anyhow::Result;

use depverify::config::Config;

use super::ConfigAction;

/// Validate configuration file.
pub(crate) async fn cmd_config(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Check => {
            let config_path = Config::path();
            println!("Config file: {}", config_path.display());

            if !config_path.exists() {
                println!("[OK] No config file found (using defaults)");
            }

            let config = match Config::load_from_path(&config_path) {
                Ok(c) => c,
                Err(e) => {
                    println!("[ERROR] {}", e);
                    anyhow::bail!("Invalid configuration in {}", config_path.display());
                }
            };

            println!("[OK] probe.api_base     {}", config.probe.api_base);
            println!("[OK] probe.repo         {}", config.probe.repo);
            println!("[OK] probe.timeout_secs {}", config.probe.timeout_secs);
            println!(
                "[OK] logging            {:?} at {}{}",
                config.logging.format,
                config.logging.level,
                config
                    .logging
                    .file
                    .as_deref()
                    .map(|f| format!(" -> {}", f))
                    .unwrap_or_default()
            );
            println!("\nConfiguration looks good!");
        }
    }
    Ok(())
}
