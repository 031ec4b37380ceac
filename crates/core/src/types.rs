use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complete generated website, as returned by the model provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedSite {
    pub site_name: String,
    pub tagline: String,
    /// Not required by the provider schema, so it may be missing
    #[serde(default)]
    pub description: String,
    pub palette: ColorPalette,
    pub pages: Vec<SitePage>,
}

impl GeneratedSite {
    /// Parse a site from its JSON form, rejecting sites without pages
    pub fn from_json(json: &str) -> Result<Self> {
        let site: GeneratedSite = serde_json::from_str(json)?;
        site.validate()?;
        Ok(site)
    }

    /// A site must have at least one page to be rendered
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(Error::InvalidData(format!(
                "site '{}' has no pages",
                self.site_name
            )));
        }
        Ok(())
    }

    /// Position of the first page whose slug matches. Duplicate slugs resolve to the earliest page.
    pub fn page_index(&self, slug: &str) -> Option<usize> {
        self.pages.iter().position(|p| p.slug == slug)
    }
}

/// Five-color theme. Values are not validated and pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub accent: String,
}

/// One page of a generated site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitePage {
    pub title: String,
    pub slug: String,
    pub sections: Vec<SiteSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSection {
    #[serde(rename = "type")]
    pub section_type: SectionType,
    pub content: SectionContent,
}

/// Section kinds the provider is asked to choose from.
///
/// Any other value is kept verbatim in `Other` so the site round-trips
/// unchanged; renderers treat it as unknown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SectionType {
    Hero,
    Features,
    About,
    Testimonials,
    Contact,
    Gallery,
    Faq,
    Other(String),
}

impl SectionType {
    /// The closed set, in the order offered to the provider
    pub const KNOWN: [SectionType; 7] = [
        SectionType::Hero,
        SectionType::Features,
        SectionType::About,
        SectionType::Testimonials,
        SectionType::Contact,
        SectionType::Gallery,
        SectionType::Faq,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            SectionType::Hero => "hero",
            SectionType::Features => "features",
            SectionType::About => "about",
            SectionType::Testimonials => "testimonials",
            SectionType::Contact => "contact",
            SectionType::Gallery => "gallery",
            SectionType::Faq => "faq",
            SectionType::Other(raw) => raw,
        }
    }
}

impl From<String> for SectionType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "hero" => SectionType::Hero,
            "features" => SectionType::Features,
            "about" => SectionType::About,
            "testimonials" => SectionType::Testimonials,
            "contact" => SectionType::Contact,
            "gallery" => SectionType::Gallery,
            "faq" => SectionType::Faq,
            _ => SectionType::Other(value),
        }
    }
}

impl From<SectionType> for String {
    fn from(value: SectionType) -> Self {
        match value {
            SectionType::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Copy for a section. Only the headline is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionContent {
    pub headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subheadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<SectionItem>>,
}

impl SectionContent {
    pub fn items(&self) -> &[SectionItem] {
        self.items.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Suggested icon name, e.g. "star" or "settings"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_name: Option<String>,
}

/// Kind of project the user wants a site for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    #[default]
    Business,
    Store,
    Blog,
    Portfolio,
    Other,
}

impl ProjectType {
    pub const ALL: [ProjectType; 5] = [
        ProjectType::Business,
        ProjectType::Store,
        ProjectType::Blog,
        ProjectType::Portfolio,
        ProjectType::Other,
    ];

    /// Identifier embedded in prompts and form values
    pub fn id(&self) -> &'static str {
        match self {
            ProjectType::Business => "business",
            ProjectType::Store => "store",
            ProjectType::Blog => "blog",
            ProjectType::Portfolio => "portfolio",
            ProjectType::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Business => "Company / Business",
            ProjectType::Store => "Online Store",
            ProjectType::Blog => "Personal Blog",
            ProjectType::Portfolio => "Portfolio",
            ProjectType::Other => "Other",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for ProjectType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ProjectType::ALL
            .into_iter()
            .find(|t| t.id().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidData(format!("Unknown project type '{}'", s)))
    }
}

/// Registration form state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub idea: String,
    #[serde(default)]
    pub project_type: ProjectType,
}

impl FormInput {
    /// Submit guard: an idea with visible text, a name and an email
    pub fn is_complete(&self) -> bool {
        !self.idea.trim().is_empty() && !self.name.is_empty() && !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SITE_JSON: &str = r##"{
        "siteName": "Sweet Crumbs",
        "tagline": "Baked fresh daily",
        "palette": {
            "primary": "#c2410c",
            "secondary": "#fed7aa",
            "background": "#fff7ed",
            "text": "#431407",
            "accent": "not-a-color"
        },
        "pages": [
            {
                "title": "Home",
                "slug": "home",
                "sections": [
                    { "type": "hero", "content": { "headline": "Warm bread", "ctaButtonText": "Order" } },
                    { "type": "pricing", "content": { "headline": "Prices" } }
                ]
            },
            { "title": "Menu", "slug": "menu", "sections": [] },
            { "title": "Duplicate", "slug": "home", "sections": [] }
        ]
    }"##;

    #[test]
    fn test_parse_site_defaults_missing_description() {
        let site = GeneratedSite::from_json(SITE_JSON).unwrap();
        assert_eq!(site.site_name, "Sweet Crumbs");
        assert_eq!(site.description, "");
        assert_eq!(site.pages.len(), 3);
    }

    #[test]
    fn test_palette_passes_through_unvalidated() {
        let site = GeneratedSite::from_json(SITE_JSON).unwrap();
        assert_eq!(site.palette.accent, "not-a-color");
    }

    #[test]
    fn test_unknown_section_type_is_preserved() {
        let site = GeneratedSite::from_json(SITE_JSON).unwrap();
        let section = &site.pages[0].sections[1];
        assert_eq!(section.section_type, SectionType::Other("pricing".into()));

        let json = serde_json::to_string(&site).unwrap();
        assert!(json.contains(r#""type":"pricing""#));
        assert_eq!(GeneratedSite::from_json(&json).unwrap(), site);
    }

    #[test]
    fn test_known_section_types_round_trip_names() {
        for section_type in SectionType::KNOWN {
            let name = section_type.as_str().to_string();
            assert_eq!(SectionType::from(name), section_type);
        }
    }

    #[test]
    fn test_optional_content_fields() {
        let site = GeneratedSite::from_json(SITE_JSON).unwrap();
        let content = &site.pages[0].sections[0].content;
        assert_eq!(content.cta_button_text.as_deref(), Some("Order"));
        assert_eq!(content.subheadline, None);
        assert!(content.items().is_empty());
    }

    #[test]
    fn test_page_lookup_first_match_wins() {
        let site = GeneratedSite::from_json(SITE_JSON).unwrap();
        assert_eq!(site.pages[site.page_index("home").unwrap()].title, "Home");
        assert_eq!(site.pages[site.page_index("menu").unwrap()].title, "Menu");
        assert_eq!(site.page_index("missing"), None);
    }

    #[test]
    fn test_site_without_pages_rejected() {
        let json = r##"{
            "siteName": "Empty",
            "tagline": "",
            "palette": { "primary": "", "secondary": "", "background": "", "text": "", "accent": "" },
            "pages": []
        }"##;
        let err = GeneratedSite::from_json(json).unwrap_err();
        assert!(err.to_string().contains("no pages"));
    }

    #[test]
    fn test_site_missing_headline_rejected() {
        let json = SITE_JSON.replace(r#""headline": "Prices""#, r#""subheadline": "Prices""#);
        assert!(GeneratedSite::from_json(&json).is_err());
    }

    #[test]
    fn test_project_type_parse() {
        assert_eq!("store".parse::<ProjectType>().unwrap(), ProjectType::Store);
        assert_eq!(" Blog ".parse::<ProjectType>().unwrap(), ProjectType::Blog);
        assert!("restaurant".parse::<ProjectType>().is_err());
        assert_eq!(ProjectType::default(), ProjectType::Business);
    }

    #[test]
    fn test_form_completeness() {
        let mut form = FormInput {
            name: "Sara".into(),
            email: "s@x.com".into(),
            idea: "bakery website".into(),
            project_type: ProjectType::Business,
        };
        assert!(form.is_complete());

        form.idea = "   ".into();
        assert!(!form.is_complete());

        form.idea = "bakery website".into();
        form.email.clear();
        assert!(!form.is_complete());

        form.email = "s@x.com".into();
        form.name.clear();
        assert!(!form.is_complete());
    }
}
