//! `capstan doctor` — Diagnose configuration and backend selection.

use capstan_config::AppConfig;
use capstan_providers::{choose, BackendChoice};

pub fn run() -> anyhow::Result<()> {
    println!("Capstan Doctor");
    println!("==============\n");

    let mut issues = 0;

    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("  [ok]   Config file found: {}", config_path.display());
    } else {
        println!("  [info] No config file at {} (defaults apply)", config_path.display());
    }

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  [ok]   Configuration valid");
            config
        }
        Err(e) => {
            println!("  [fail] Configuration invalid: {e}");
            println!();
            println!("  A minimal config.toml looks like:\n");
            for line in AppConfig::default_toml().lines() {
                println!("    {line}");
            }
            return Ok(());
        }
    };

    println!("  [ok]   Preferred provider: {}", config.provider);

    let has_openai = config.openai.api_key.is_some();
    let has_gemini = config.gemini.api_key.is_some();
    if has_openai {
        println!("  [ok]   OpenAI credential present (model {})", config.openai.model);
    } else {
        println!("  [warn] No OpenAI credential (OPENAI_API_KEY)");
        issues += 1;
    }
    if has_gemini {
        println!("  [ok]   Gemini credential present (model {})", config.gemini.model);
    } else {
        println!("  [warn] No Gemini credential (GEMINI_API_KEY)");
        issues += 1;
    }

    let selection = choose(config.force_offline, &config.provider, has_openai, has_gemini);
    let label = match selection {
        BackendChoice::OpenAi => "openai (remote)",
        BackendChoice::Gemini => "gemini (remote)",
        BackendChoice::Offline => "offline (deterministic)",
    };
    println!();
    println!("  Selected backend: {label}");
    if selection == BackendChoice::Offline && !config.force_offline {
        println!("  Chat will answer offline until a credential for '{}' is set.", config.provider);
    }

    println!();
    if issues == 0 {
        println!("  All checks passed.");
    } else {
        println!("  {issues} warning(s). Remote providers may be unavailable.");
    }

    Ok(())
}
