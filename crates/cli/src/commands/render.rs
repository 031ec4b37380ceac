use anyhow::{Context, Result};
use sitecraft_core::GeneratedSite;
use sitecraft_renderer::{HtmlOptions, PageLinks, page_file_name, render, to_html};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Render a site JSON file into static HTML pages
pub async fn run(site_path: PathBuf, output: PathBuf) -> Result<()> {
    println!("🔨 Rendering static site...");
    println!("   Source: {}", site_path.display());
    println!("   Output: {}", output.display());
    println!();

    if !site_path.exists() {
        anyhow::bail!("Site file does not exist: {}", site_path.display());
    }

    let json = fs::read_to_string(&site_path)
        .with_context(|| format!("Failed to read {}", site_path.display()))?;
    let site = GeneratedSite::from_json(&json).context("Failed to parse site JSON")?;

    println!("✓ Loaded: {}", site.site_name);
    println!("  Pages: {}", site.pages.len());
    println!();

    let written = export_site(&site, &output)?;
    for path in &written {
        println!("   ✓ {}", path.display());
    }

    println!();
    println!("✅ Render complete!");
    println!("   Output: {}", output.display());
    println!();
    println!("To view locally:");
    println!("   cd {} && python3 -m http.server 8000", output.display());
    println!();

    Ok(())
}

/// Write one HTML file per page plus `index.html` (the first page).
///
/// Pages whose file name is already taken are skipped, so the first page
/// with a given slug wins.
pub fn export_site(site: &GeneratedSite, output: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output).context("Failed to create output directory")?;

    let options = HtmlOptions {
        links: PageLinks::Files,
        ..HtmlOptions::default()
    };

    let mut seen = HashSet::new();
    let mut written = Vec::new();

    for page in &site.pages {
        let file_name = page_file_name(&page.slug);
        if !seen.insert(file_name.clone()) {
            warn!(slug = %page.slug, file = %file_name, "duplicate page slug, skipping");
            continue;
        }

        let html = to_html(&render(site, Some(&page.slug)), &options);
        let path = output.join(&file_name);
        fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(path);
    }

    let index = output.join("index.html");
    if !seen.contains("index.html") {
        let html = to_html(&render(site, None), &options);
        fs::write(&index, html).context("Failed to write index.html")?;
        written.push(index);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn site() -> GeneratedSite {
        GeneratedSite::from_json(
            r##"{
            "siteName": "Sweet Crumbs",
            "tagline": "Baked fresh daily",
            "palette": { "primary": "#c2410c", "secondary": "#fed7aa", "background": "#fff7ed", "text": "#431407", "accent": "#ea580c" },
            "pages": [
                { "title": "Home", "slug": "home", "sections": [ { "type": "hero", "content": { "headline": "Warm bread" } } ] },
                { "title": "Our Story", "slug": "Our Story", "sections": [ { "type": "about", "content": { "headline": "Since 1990" } } ] },
                { "title": "Again", "slug": "home", "sections": [ { "type": "hero", "content": { "headline": "Shadowed" } } ] }
            ]
        }"##,
        )
        .unwrap()
    }

    #[test]
    fn test_export_writes_each_page_once() {
        let dir = tempfile::tempdir().unwrap();
        let written = export_site(&site(), dir.path()).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["home.html", "our-story.html", "index.html"]);

        let story = fs::read_to_string(dir.path().join("our-story.html")).unwrap();
        assert!(story.contains("Since 1990"));
        assert!(story.contains(r#"<a href="home.html">Home</a>"#));

        let home = fs::read_to_string(dir.path().join("home.html")).unwrap();
        assert!(home.contains("Warm bread"));
        assert!(!home.contains("Shadowed"));
    }

    #[test]
    fn test_index_is_first_page() {
        let dir = tempfile::tempdir().unwrap();
        export_site(&site(), dir.path()).unwrap();
        let index = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(index.contains("Warm bread"));
    }
}
