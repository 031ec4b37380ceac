use anyhow::{Context, Result};
use sitecraft_client::GeminiClient;
use sitecraft_core::{ProjectType, Settings};
use std::fs;
use std::path::PathBuf;

/// Generate a site once and emit its JSON
pub async fn run(
    idea: String,
    project_type: ProjectType,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<()> {
    if idea.trim().is_empty() {
        anyhow::bail!("The idea must not be empty");
    }

    let settings = Settings::load(config.as_deref()).context("Failed to load settings")?;
    let client = GeminiClient::new(&settings.provider).context("Failed to create model client")?;

    // Progress goes to stderr so stdout stays valid JSON
    eprintln!("✨ Generating a {} site with {}...", project_type, settings.provider.model);

    let site = client
        .generate(&idea, project_type.id())
        .await
        .context("Site generation failed")?;

    eprintln!("   ✓ {} ({} pages)", site.site_name, site.pages.len());

    let json = serde_json::to_string_pretty(&site).context("Failed to serialize site")?;
    match output {
        Some(path) => {
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("✅ Saved to {}", path.display());
            eprintln!("   Render it with: sitecraft render {} -o site", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
