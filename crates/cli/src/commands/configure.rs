use anyhow::{Context, Result};
use sitecraft_core::Settings;
use sitecraft_core::config::{global_config_path, save_settings};
use std::io::{self, Write};

/// Read a line of input from stdin
fn read_input(prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Keep `current` when the answer is blank
fn or_current(input: String, current: &str) -> String {
    if input.is_empty() {
        current.to_string()
    } else {
        input
    }
}

/// Configure the model credential, model and content language
pub async fn run() -> Result<()> {
    println!("🔧 Configuring the site generator...\n");

    let path = global_config_path().context("Could not determine home directory")?;

    // Existing file values are the defaults; env overrides are not persisted
    let existing = if path.exists() {
        sitecraft_core::config::parse_settings(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        Settings::default()
    };

    println!("📋 You'll need a Gemini API key.");
    println!("   Create one at: https://aistudio.google.com/apikey");
    println!();

    let current_key = existing.provider.api_key.clone().unwrap_or_default();
    let api_key = if current_key.is_empty() {
        read_input("API Key: ")?
    } else {
        let shown: String = current_key.chars().take(6).collect();
        or_current(
            read_input(&format!("API Key [current: {}...]: ", shown))?,
            &current_key,
        )
    };

    if api_key.is_empty() {
        anyhow::bail!("API key is required");
    }

    let model = or_current(
        read_input(&format!("Model [{}]: ", existing.provider.model))?,
        &existing.provider.model,
    );
    let language = or_current(
        read_input(&format!("Content language [{}]: ", existing.provider.language))?,
        &existing.provider.language,
    );

    let mut settings = existing;
    settings.provider.api_key = Some(api_key);
    settings.provider.model = model;
    settings.provider.language = language;

    save_settings(&settings, &path).context("Failed to save settings")?;

    println!();
    println!("✅ Configuration saved to {}", path.display());
    println!();
    println!("🚀 Ready! Try: sitecraft serve");

    Ok(())
}
