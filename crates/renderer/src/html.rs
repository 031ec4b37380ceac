use crate::{Block, RenderedPage, contact_email};
use chrono::Datelike;

/// Placeholder phone line shown on contact panels and in the footer
pub const CONTACT_PHONE: &str = "+966 50 000 0000";

/// Escape text for use in HTML element content and quoted attribute values
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Static export file name for a page slug, e.g. "About Us" -> "about-us.html".
/// Slugs with no ASCII letters or digits map to "page.html".
pub fn page_file_name(slug: &str) -> String {
    let mut stem = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c.is_ascii_alphanumeric() {
            stem.push(c.to_ascii_lowercase());
        } else if (c.is_whitespace() || matches!(c, '-' | '_'))
            && !stem.is_empty()
            && !stem.ends_with('-')
        {
            stem.push('-');
        }
    }
    let stem = stem.trim_end_matches('-');

    if stem.is_empty() {
        "page.html".to_string()
    } else {
        format!("{}.html", stem)
    }
}

/// How navigation links point at other pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLinks {
    /// `{base}?page={slug}`, for a live preview server
    Query(String),
    /// `{page_file_name(slug)}`, for a static export
    Files,
}

impl PageLinks {
    pub fn href(&self, slug: &str) -> String {
        match self {
            PageLinks::Query(base) => format!("{}?page={}", base, query_escape(slug)),
            PageLinks::Files => page_file_name(slug),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    pub links: PageLinks,
    /// Raw HTML placed at the end of the header, trusted
    pub toolbar: Option<String>,
    /// Year shown in the footer copyright line
    pub year: i32,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            links: PageLinks::Files,
            toolbar: None,
            year: chrono::Local::now().year(),
        }
    }
}

/// Percent-encode everything outside the unreserved URL characters
pub(crate) fn query_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~') {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

const BASE_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; line-height: 1.6; background: #fff; color: var(--text); }
.container { max-width: 72rem; margin: 0 auto; padding: 0 1.5rem; }
.site-header { position: sticky; top: 0; background: rgba(255,255,255,0.95); border-bottom: 1px solid #eee; z-index: 10; }
.site-header .container { display: flex; align-items: center; justify-content: space-between; height: 4rem; gap: 1rem; }
.brand { display: flex; align-items: center; gap: 0.5rem; font-weight: 700; font-size: 1.25rem; }
.brand-mark { width: 2rem; height: 2rem; border-radius: 0.5rem; display: grid; place-items: center; background: var(--primary); color: #fff; }
.site-nav { display: flex; gap: 1.5rem; }
.site-nav a { color: var(--text); opacity: 0.6; text-decoration: none; font-size: 0.9rem; font-weight: 500; }
.site-nav a.active { opacity: 1; border-bottom: 2px solid var(--primary); }
section { padding: 4rem 0; }
h1 { font-size: clamp(2rem, 5vw, 3.5rem); line-height: 1.15; }
h2 { font-size: 2rem; margin-bottom: 1rem; }
.muted { opacity: 0.7; }
.btn { display: inline-block; padding: 0.9rem 2rem; border: none; border-radius: 999px; font-weight: 700; cursor: pointer; background: var(--primary); color: #fff; }
.hero { background: linear-gradient(0deg, transparent, color-mix(in srgb, var(--primary) 10%, transparent)); }
.hero .container, .about .container { display: flex; gap: 3rem; align-items: center; flex-wrap: wrap; }
.hero .copy, .about .copy { flex: 1 1 20rem; display: grid; gap: 1.5rem; }
.hero img, .about img { flex: 1 1 20rem; max-width: 100%; border-radius: 1rem; box-shadow: 0 20px 40px rgba(0,0,0,0.15); }
.features { background: var(--background); }
.center { text-align: center; margin-bottom: 3rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(16rem, 1fr)); gap: 1.5rem; }
.card { background: #fff; border: 1px solid #f0f0f0; border-radius: 0.75rem; padding: 1.5rem; box-shadow: 0 1px 3px rgba(0,0,0,0.05); }
.card .icon { width: 3rem; height: 3rem; border-radius: 0.5rem; display: grid; place-items: center; margin-bottom: 1rem; color: var(--primary); background: color-mix(in srgb, var(--primary) 12%, transparent); font-size: 1.4rem; }
.about { background: #f9fafb; }
.contact .panel { display: flex; flex-wrap: wrap; border-radius: 1rem; overflow: hidden; box-shadow: 0 20px 40px rgba(0,0,0,0.1); }
.contact .info { flex: 1 1 20rem; padding: 3rem; background: var(--primary); color: #fff; display: grid; gap: 1rem; }
.contact form { flex: 1 1 20rem; padding: 3rem; display: grid; gap: 1rem; background: #fff; }
.contact input, .contact textarea { width: 100%; padding: 0.75rem; border: 1px solid #e5e7eb; border-radius: 0.5rem; font: inherit; }
.contact .send { background: var(--accent); border-radius: 0.5rem; width: 100%; }
.testimonials { background: #f8fafc; }
.stars { color: #facc15; margin-bottom: 1rem; }
.quote { font-style: italic; color: #4b5563; margin-bottom: 1rem; }
.author { display: flex; align-items: center; gap: 0.75rem; font-weight: 700; }
.author img { width: 2.5rem; height: 2.5rem; border-radius: 50%; }
.generic { text-align: center; }
.site-footer { padding: 3rem 0; background: #f9fafb; border-top: 1px solid #eee; }
.site-footer .container { display: grid; grid-template-columns: repeat(auto-fit, minmax(12rem, 1fr)); gap: 2rem; }
.site-footer ul { list-style: none; display: grid; gap: 0.5rem; font-size: 0.9rem; }
.site-footer a { color: #6b7280; text-decoration: none; }
.copyright { text-align: center; font-size: 0.75rem; color: #9ca3af; margin-top: 2rem; }
"#;

/// Serialize a rendered page into a standalone HTML document
pub fn to_html(page: &RenderedPage<'_>, options: &HtmlOptions) -> String {
    let palette = page.palette;
    let theme = format!(
        ":root {{ --primary: {}; --secondary: {}; --background: {}; --text: {}; --accent: {}; }}",
        css_value(&palette.primary),
        css_value(&palette.secondary),
        css_value(&palette.background),
        css_value(&palette.text),
        css_value(&palette.accent),
    );

    let nav_html: String = page
        .nav
        .iter()
        .map(|entry| {
            format!(
                r#"<a href="{}"{}>{}</a>"#,
                html_escape(&options.links.href(entry.slug)),
                if entry.active { r#" class="active""# } else { "" },
                html_escape(entry.title)
            )
        })
        .collect();

    let quick_links: String = page
        .nav
        .iter()
        .map(|entry| {
            format!(
                r#"<li><a href="{}">{}</a></li>"#,
                html_escape(&options.links.href(entry.slug)),
                html_escape(entry.title)
            )
        })
        .collect();

    let blocks_html: String = page.blocks.iter().map(block_html).collect();

    let site_name = html_escape(page.site_name);
    let initial = page
        .site_name
        .chars()
        .next()
        .map(|c| html_escape(&c.to_string()))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html dir="auto">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="{description}">
    <title>{title} | {site_name}</title>
    <style>{theme}{css}</style>
</head>
<body>
    <header class="site-header">
        <div class="container">
            <div class="brand"><span class="brand-mark">{initial}</span><span>{site_name}</span></div>
            <nav class="site-nav">{nav_html}</nav>
            {toolbar}
        </div>
    </header>
    <main>
{blocks_html}
    </main>
    <footer class="site-footer">
        <div class="container">
            <div>
                <h3>{site_name}</h3>
                <p class="muted">{description}</p>
            </div>
            <div>
                <h4>Quick links</h4>
                <ul>{quick_links}</ul>
            </div>
            <div>
                <h4>Contact us</h4>
                <ul><li>{email}</li><li>{phone}</li></ul>
            </div>
        </div>
        <p class="copyright">&copy; {year} {site_name}. All rights reserved.</p>
    </footer>
</body>
</html>"#,
        description = html_escape(page.description),
        title = html_escape(page.title),
        site_name = site_name,
        theme = theme,
        css = BASE_CSS,
        initial = initial,
        nav_html = nav_html,
        toolbar = options.toolbar.as_deref().unwrap_or(""),
        blocks_html = blocks_html,
        quick_links = quick_links,
        email = html_escape(&contact_email(page.site_name)),
        phone = CONTACT_PHONE,
        year = options.year,
    )
}

/// Palette values are emitted as-is, minus characters that could end the declaration
fn css_value(value: &str) -> String {
    value
        .chars()
        .filter(|c| !matches!(c, ';' | '{' | '}' | '<' | '>'))
        .collect()
}

/// `<tag class="...">text</tag>` or nothing when the field is absent
fn optional(tag: &str, class: &str, text: Option<&str>) -> String {
    match text {
        Some(text) => format!(
            r#"<{tag} class="{class}">{}</{tag}>"#,
            html_escape(text),
            tag = tag,
            class = class
        ),
        None => String::new(),
    }
}

fn block_html(block: &Block<'_>) -> String {
    match block {
        Block::Hero {
            headline,
            lead,
            cta,
            image_url,
        } => {
            let button = cta
                .map(|c| format!(r#"<div><button class="btn">{}</button></div>"#, html_escape(c)))
                .unwrap_or_default();
            format!(
                r#"<section class="hero"><div class="container"><div class="copy"><h1>{}</h1>{}{}</div><img src="{}" alt="Hero"></div></section>"#,
                html_escape(headline),
                optional("p", "muted", *lead),
                button,
                html_escape(image_url)
            )
        }
        Block::Features {
            headline,
            subheadline,
            cards,
        } => {
            let cards_html: String = cards
                .iter()
                .map(|card| {
                    format!(
                        r#"<div class="card"><div class="icon">{}</div><h3>{}</h3><p class="muted">{}</p></div>"#,
                        card.icon.glyph(),
                        html_escape(card.title),
                        html_escape(card.description)
                    )
                })
                .collect();
            format!(
                r#"<section class="features"><div class="container"><div class="center"><h2>{}</h2>{}</div><div class="grid">{}</div></div></section>"#,
                html_escape(headline),
                optional("p", "muted", *subheadline),
                cards_html
            )
        }
        Block::About {
            headline,
            body_text,
            subheadline,
            image_url,
        } => format!(
            r#"<section class="about"><div class="container"><img src="{}" alt="About"><div class="copy"><h2>{}</h2>{}{}</div></div></section>"#,
            html_escape(image_url),
            html_escape(headline),
            optional("p", "body", *body_text),
            optional("p", "muted", *subheadline)
        ),
        Block::Contact {
            headline,
            body_text,
            cta,
            email,
        } => format!(
            r#"<section class="contact"><div class="container"><div class="panel"><div class="info"><h2>{}</h2>{}<p>✉ {}</p><p>☎ {}</p></div><form onsubmit="return false"><label>Name<input type="text"></label><label>Email<input type="email"></label><label>Message<textarea rows="4"></textarea></label><button class="btn send">{}</button></form></div></div></section>"#,
            html_escape(headline),
            optional("p", "body", *body_text),
            html_escape(email),
            CONTACT_PHONE,
            html_escape(cta.unwrap_or("Send"))
        ),
        Block::Testimonials { headline, quotes } => {
            let quotes_html: String = quotes
                .iter()
                .map(|quote| {
                    format!(
                        r#"<div class="card"><div class="stars">★★★★★</div><p class="quote">"{}"</p><div class="author"><img src="{}" alt=""><span>{}</span></div></div>"#,
                        html_escape(quote.text),
                        html_escape(&quote.avatar_url),
                        html_escape(quote.author)
                    )
                })
                .collect();
            format!(
                r#"<section class="testimonials"><div class="container"><h2 class="center">{}</h2><div class="grid">{}</div></div></section>"#,
                html_escape(headline),
                quotes_html
            )
        }
        Block::Generic {
            headline,
            body_text,
        } => format!(
            r#"<section class="generic"><div class="container"><h2>{}</h2>{}</div></section>"#,
            html_escape(headline),
            optional("p", "body", *body_text)
        ),
    }
}
