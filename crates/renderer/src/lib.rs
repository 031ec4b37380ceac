pub mod html;
pub mod icons;

use sitecraft_core::{ColorPalette, GeneratedSite, SectionContent, SectionType, SitePage};

use html::query_escape;

pub use html::{HtmlOptions, PageLinks, html_escape, page_file_name, to_html};
pub use icons::Icon;

/// One page of a site, ready to draw
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage<'a> {
    pub site_name: &'a str,
    pub tagline: &'a str,
    pub description: &'a str,
    pub palette: &'a ColorPalette,
    pub title: &'a str,
    pub slug: &'a str,
    pub nav: Vec<NavEntry<'a>>,
    pub blocks: Vec<Block<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub active: bool,
}

/// A section mapped onto one of the fixed templates
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Hero {
        headline: &'a str,
        /// Subheadline, or body text when there is none
        lead: Option<&'a str>,
        cta: Option<&'a str>,
        image_url: String,
    },
    Features {
        headline: &'a str,
        subheadline: Option<&'a str>,
        cards: Vec<FeatureCard<'a>>,
    },
    About {
        headline: &'a str,
        body_text: Option<&'a str>,
        subheadline: Option<&'a str>,
        image_url: String,
    },
    Contact {
        headline: &'a str,
        body_text: Option<&'a str>,
        cta: Option<&'a str>,
        email: String,
    },
    Testimonials {
        headline: &'a str,
        quotes: Vec<Quote<'a>>,
    },
    /// Gallery, FAQ and unknown section types
    Generic {
        headline: &'a str,
        body_text: Option<&'a str>,
    },
}

impl Block<'_> {
    pub fn headline(&self) -> &str {
        match self {
            Block::Hero { headline, .. }
            | Block::Features { headline, .. }
            | Block::About { headline, .. }
            | Block::Contact { headline, .. }
            | Block::Testimonials { headline, .. }
            | Block::Generic { headline, .. } => *headline,
        }
    }

    /// Template name, used as a CSS class
    pub fn template(&self) -> &'static str {
        match self {
            Block::Hero { .. } => "hero",
            Block::Features { .. } => "features",
            Block::About { .. } => "about",
            Block::Contact { .. } => "contact",
            Block::Testimonials { .. } => "testimonials",
            Block::Generic { .. } => "generic",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCard<'a> {
    pub icon: Icon,
    pub title: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote<'a> {
    pub author: &'a str,
    pub text: &'a str,
    pub avatar_url: String,
}

/// The page whose slug matches, else the first page.
///
/// Returns `None` only for a site without pages.
pub fn select_page<'a>(site: &'a GeneratedSite, slug: Option<&str>) -> Option<&'a SitePage> {
    selected_index(site, slug).map(|i| &site.pages[i])
}

fn selected_index(site: &GeneratedSite, slug: Option<&str>) -> Option<usize> {
    if site.pages.is_empty() {
        return None;
    }
    let matched = slug.and_then(|slug| site.page_index(slug));
    Some(matched.unwrap_or(0))
}

/// Render the selected page of `site`
pub fn render<'a>(site: &'a GeneratedSite, slug: Option<&str>) -> RenderedPage<'a> {
    let index = selected_index(site, slug);

    let nav = site
        .pages
        .iter()
        .enumerate()
        .map(|(i, page)| NavEntry {
            title: &page.title,
            slug: &page.slug,
            active: Some(i) == index,
        })
        .collect();

    let page = index.map(|i| &site.pages[i]);
    let blocks = page
        .map(|page| {
            page.sections
                .iter()
                .enumerate()
                .map(|(i, section)| render_section(site, &section.section_type, &section.content, i))
                .collect()
        })
        .unwrap_or_default();

    RenderedPage {
        site_name: &site.site_name,
        tagline: &site.tagline,
        description: &site.description,
        palette: &site.palette,
        title: page.map(|p| p.title.as_str()).unwrap_or_default(),
        slug: page.map(|p| p.slug.as_str()).unwrap_or_default(),
        nav,
        blocks,
    }
}

fn render_section<'a>(
    site: &'a GeneratedSite,
    section_type: &SectionType,
    content: &'a SectionContent,
    index: usize,
) -> Block<'a> {
    let headline = content.headline.as_str();
    let subheadline = content.subheadline.as_deref();
    let body_text = content.body_text.as_deref();
    let cta = content.cta_button_text.as_deref();

    match section_type {
        SectionType::Hero => Block::Hero {
            headline,
            lead: subheadline.or(body_text),
            cta,
            image_url: format!(
                "https://picsum.photos/seed/{}{}/600/400",
                image_seed(&site.site_name),
                index
            ),
        },
        SectionType::Features => Block::Features {
            headline,
            subheadline,
            cards: content
                .items()
                .iter()
                .map(|item| FeatureCard {
                    icon: Icon::resolve(item.icon_name.as_deref()),
                    title: &item.title,
                    description: &item.description,
                })
                .collect(),
        },
        SectionType::About => Block::About {
            headline,
            body_text,
            subheadline,
            image_url: format!("https://picsum.photos/seed/about{}/500/500", index),
        },
        SectionType::Contact => Block::Contact {
            headline,
            body_text,
            cta,
            email: contact_email(&site.site_name),
        },
        SectionType::Testimonials => Block::Testimonials {
            headline,
            quotes: content
                .items()
                .iter()
                .enumerate()
                .map(|(i, item)| Quote {
                    author: &item.title,
                    text: &item.description,
                    avatar_url: format!("https://picsum.photos/seed/user{}/100/100", i),
                })
                .collect(),
        },
        SectionType::Gallery | SectionType::Faq | SectionType::Other(_) => {
            Block::Generic { headline, body_text }
        }
    }
}

/// Placeholder contact address derived from the site name
pub fn contact_email(site_name: &str) -> String {
    let domain: String = site_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("contact@{}.com", domain)
}

/// Site name percent-encoded for use in an image URL path
fn image_seed(site_name: &str) -> String {
    query_escape(site_name)
}
