use anyhow::{Context, Result};
use spindle_etl::{config, Config};
use toml_edit::DocumentMut;

const KEYS: &str = "rules_path, halt_on_error, state_path";

/// Show the current effective configuration.
pub fn show_config() -> Result<()> {
    let config = Config::load()?;

    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    let exists = config_path.exists();
    println!("File exists: {}\n", if exists { "yes" } else { "no (using defaults)" });

    println!("Settings:");
    println!("  rules_path: {}", display_rules_path(&config));
    println!("  halt_on_error: {}", config.halt_on_error);
    println!("  state_path: {}", config.state_path.display());

    println!("\nPriority: CLI args > ENV vars (SPINDLE_*) > Config file > Defaults");

    Ok(())
}

fn display_rules_path(config: &Config) -> String {
    config
        .effective_rules_path()
        .map_or_else(|| "<built-in tables>".to_string(), |p| p.display().to_string())
}

/// Get a specific config value, or print the whole file.
pub fn get_config(key: Option<String>) -> Result<()> {
    let Some(key) = key else {
        let config_path = config::config_file_path();

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).context("Failed to read config file")?;
            print!("{}", contents);
        } else {
            println!("Config file does not exist: {}", config_path.display());
            println!("\nRun 'spindle config init' to create it.");
        }
        return Ok(());
    };

    let config = Config::load()?;
    match key.as_str() {
        "rules_path" => println!("{}", display_rules_path(&config)),
        "halt_on_error" => println!("{}", config.halt_on_error),
        "state_path" => println!("{}", config.state_path.display()),
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS),
    }

    Ok(())
}

/// Set a config value, keeping the rest of the file (comments included).
pub fn set_config(key: &str, value: &str) -> Result<()> {
    let config_path = config::config_file_path();

    config::ensure_config_file()?;

    let contents = std::fs::read_to_string(&config_path).context("Failed to read config file")?;
    let updated = set_value(&contents, key, value)?;

    std::fs::write(&config_path, updated).context("Failed to write config file")?;

    println!("✓ Updated {} = {}", key, value);
    println!("  in {}", config_path.display());

    Ok(())
}

fn set_value(contents: &str, key: &str, value: &str) -> Result<String> {
    let mut doc: DocumentMut = contents.parse().context("Failed to parse config file")?;

    match key {
        "rules_path" | "state_path" => doc[key] = toml_edit::value(value),
        "halt_on_error" => {
            let flag: bool = value
                .parse()
                .with_context(|| format!("halt_on_error must be true or false, got '{value}'"))?;
            doc[key] = toml_edit::value(flag);
        }
        _ => anyhow::bail!("Unknown config key: {}\n\nValid keys: {}", key, KEYS),
    }

    Ok(doc.to_string())
}

/// Show the config file path.
pub fn show_path() {
    println!("{}", config::config_file_path().display());
}

/// Show example configuration.
pub fn show_example() {
    print!("{}", config::example_config());
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to configure spindle.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
