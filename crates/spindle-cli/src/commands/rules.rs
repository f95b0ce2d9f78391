use anyhow::{Context, Result};
use std::fs;
use std::process::Command;

use spindle_core::taxonomy::rules::DEFAULT_RULES_TOML;
use spindle_core::taxonomy::ClassificationRules;
use spindle_etl::{config, Config};

/// Initialize rules file with default content.
pub fn init_rules() -> Result<()> {
    let rules_path = config::default_rules_path();

    if rules_path.exists() {
        println!("✓ Rules file already exists at: {}", rules_path.display());
        return Ok(());
    }

    if let Some(parent) = rules_path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(&rules_path, DEFAULT_RULES_TOML).context("Failed to write rules file")?;

    println!("✓ Created default rules file at: {}", rules_path.display());
    println!("\nNext steps:");
    println!("  1. Review the rules: spindle rules edit");
    println!("  2. Validate syntax: spindle rules validate");
    println!("  3. Normalize a batch: spindle normalize collection.json");

    Ok(())
}

/// Show the rules file path.
pub fn show_path(config: &Config) {
    match config.effective_rules_path() {
        Some(path) => println!("{}", path.display()),
        None => println!(
            "{} (not created, using built-in tables)",
            config::default_rules_path().display()
        ),
    }
}

/// Print the rules in effect as TOML.
pub fn show_rules(config: &Config) -> Result<()> {
    let rules = config.rules()?;
    print!("{}", rules.to_toml_string()?);
    Ok(())
}

/// Open rules file in $EDITOR.
pub fn edit_rules(config: &Config) -> Result<()> {
    let Some(rules_path) = config.effective_rules_path() else {
        println!("Rules file not found: {}", config::default_rules_path().display());
        println!("\nRun 'spindle rules init' to create it first.");
        return Ok(());
    };

    let editor = std::env::var("EDITOR").unwrap_or_else(|_| {
        if cfg!(target_os = "macos") {
            "open".to_string()
        } else if cfg!(target_os = "windows") {
            "notepad".to_string()
        } else {
            "vi".to_string()
        }
    });

    Command::new(&editor)
        .arg(&rules_path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to open editor '{}': {}", editor, e))?;

    Ok(())
}

/// Validate rules file syntax.
pub fn validate_rules(config: &Config) -> Result<()> {
    let Some(rules_path) = config.effective_rules_path() else {
        println!("Rules file not found: {}", config::default_rules_path().display());
        println!("\nRun 'spindle rules init' to create it first.");
        return Ok(());
    };

    match ClassificationRules::load(&rules_path) {
        Ok(rules) => {
            println!("✓ Rules file is valid!");
            println!("\nSummary:");
            println!("  Color rules:    {}", rules.color_rules.len());
            println!("  Region aliases: {}", rules.region_aliases.len());
            println!(
                "  Size tokens:    {} twelve-inch, {} seven-inch",
                rules.size_rules.twelve_inch.len(),
                rules.size_rules.seven_inch.len()
            );
            println!("  Edition rules:  {}", rules.edition_rules.len());
        }
        Err(e) => {
            println!("✗ Rules file has errors:");
            println!("\n{}", e);
            println!("\nFix the errors and run 'spindle rules validate' again.");
        }
    }

    Ok(())
}
