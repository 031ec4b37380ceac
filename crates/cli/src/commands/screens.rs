use sitecraft_core::{FormInput, ProjectType};
use sitecraft_renderer::{HtmlOptions, PageLinks, html_escape, render, to_html};
use sitecraft_session::{PREVIEW_PRICE, Session, View};

const APP_CSS: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { font-family: system-ui, -apple-system, "Segoe UI", Roboto, sans-serif; background: #f8fafc; color: #0f172a; line-height: 1.6; }
header { background: #fff; border-bottom: 1px solid #e2e8f0; }
header .bar { max-width: 64rem; margin: 0 auto; padding: 0 1.5rem; height: 4rem; display: flex; align-items: center; justify-content: space-between; }
.logo { font-weight: 800; font-size: 1.25rem; color: #4f46e5; }
nav { display: flex; gap: 0.25rem; }
nav form { display: inline; }
nav button { background: none; border: none; padding: 0.5rem 0.9rem; border-radius: 0.5rem; font: inherit; color: #475569; cursor: pointer; }
nav button.active { background: #eef2ff; color: #4f46e5; font-weight: 600; }
main { max-width: 48rem; margin: 0 auto; padding: 3rem 1.5rem; }
h1 { font-size: 2.5rem; line-height: 1.2; margin-bottom: 1rem; }
h2 { margin-bottom: 1rem; }
.lead { color: #475569; font-size: 1.15rem; margin-bottom: 2rem; }
.actions { display: flex; gap: 1rem; flex-wrap: wrap; }
.btn { display: inline-block; padding: 0.8rem 1.8rem; border-radius: 999px; border: none; font: inherit; font-weight: 700; cursor: pointer; background: #4f46e5; color: #fff; }
.btn.secondary { background: #fff; color: #4f46e5; border: 1px solid #c7d2fe; }
.card { background: #fff; border: 1px solid #e2e8f0; border-radius: 1rem; padding: 2rem; }
ol.steps { display: grid; gap: 1rem; padding-left: 1.25rem; }
label { display: grid; gap: 0.35rem; font-weight: 600; margin-bottom: 1rem; }
input[type=text], input[type=email], textarea { font: inherit; padding: 0.7rem; border: 1px solid #cbd5e1; border-radius: 0.5rem; font-weight: 400; }
fieldset { border: none; margin-bottom: 1.5rem; }
.types { display: grid; grid-template-columns: repeat(auto-fit, minmax(10rem, 1fr)); gap: 0.5rem; }
.types label { font-weight: 400; display: flex; align-items: center; gap: 0.5rem; border: 1px solid #e2e8f0; border-radius: 0.5rem; padding: 0.6rem; margin: 0; }
.error { background: #fef2f2; color: #b91c1c; border: 1px solid #fecaca; border-radius: 0.5rem; padding: 0.8rem 1rem; margin-bottom: 1.5rem; }
.spinner { width: 3rem; height: 3rem; border: 4px solid #e0e7ff; border-top-color: #4f46e5; border-radius: 50%; animation: spin 1s linear infinite; margin: 0 auto 1.5rem; }
@keyframes spin { to { transform: rotate(360deg); } }
.center { text-align: center; }
.price { font-size: 2.5rem; font-weight: 800; margin: 1rem 0; }
.preview-bar { display: flex; gap: 0.5rem; align-items: center; }
"#;

/// Full HTML document for the session's current screen
pub fn render_screen(session: &Session) -> String {
    match session.view() {
        View::Preview => preview(session),
        view => shell(session, &body(session, view)),
    }
}

fn body(session: &Session, view: View) -> String {
    match view {
        View::Home => home(),
        View::Instructions => instructions(),
        View::Register => register(session.form(), session.error()),
        View::Loading => loading(),
        View::Payment => payment(session),
        View::Fun => fun(),
        View::Preview => String::new(),
    }
}

fn shell(session: &Session, body: &str) -> String {
    let nav = if session.is_nav_visible() {
        let items: String = [
            (View::Home, "Home"),
            (View::Instructions, "How it works"),
            (View::Register, "Build"),
            (View::Fun, "Fun"),
        ]
        .iter()
        .map(|(view, label)| {
            format!(
                r#"<form method="post" action="/nav/{}"><button{}>{}</button></form>"#,
                view,
                if *view == session.view() { r#" class="active""# } else { "" },
                label
            )
        })
        .collect();
        format!("<nav>{}</nav>", items)
    } else {
        String::new()
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sitecraft</title>
    <style>{css}</style>
</head>
<body>
    <header><div class="bar"><span class="logo">Sitecraft</span>{nav}</div></header>
    <main>
{body}
    </main>
</body>
</html>"#,
        css = APP_CSS,
        nav = nav,
        body = body
    )
}

fn home() -> String {
    r#"<h1>Your business deserves a website</h1>
<p class="lead">Describe your idea in a few words and get a complete multi-page marketing site, with copy, colors and layout, in under a minute.</p>
<div class="actions">
    <form method="post" action="/start"><button class="btn">Start building</button></form>
    <form method="post" action="/how-it-works"><button class="btn secondary">How it works</button></form>
</div>"#
        .to_string()
}

fn instructions() -> String {
    r#"<h1>How it works</h1>
<div class="card">
    <ol class="steps">
        <li><strong>Tell us about your idea.</strong> Pick the kind of project and describe what you do.</li>
        <li><strong>We generate your site.</strong> Pages, sections, copy and a color palette are written for you.</li>
        <li><strong>Unlock the preview.</strong> Confirm payment to browse every page of your new site.</li>
    </ol>
</div>
<div class="actions" style="margin-top: 2rem">
    <form method="post" action="/nav/register"><button class="btn">Get started</button></form>
</div>"#
        .to_string()
}

fn register(form: &FormInput, error: Option<&str>) -> String {
    let error_html = error
        .map(|e| format!(r#"<div class="error">{}</div>"#, html_escape(e)))
        .unwrap_or_default();

    let types: String = ProjectType::ALL
        .iter()
        .map(|t| {
            format!(
                r#"<label><input type="radio" name="project_type" value="{}"{}> {}</label>"#,
                t.id(),
                if *t == form.project_type { " checked" } else { "" },
                t.label()
            )
        })
        .collect();

    format!(
        r#"<h1>Tell us about your project</h1>
{error_html}
<form class="card" method="post" action="/register">
    <label>Your name<input type="text" name="name" value="{name}" required></label>
    <label>Email<input type="email" name="email" value="{email}" required></label>
    <fieldset>
        <legend>Project type</legend>
        <div class="types">{types}</div>
    </fieldset>
    <label>Your idea<textarea name="idea" rows="5" required placeholder="A neighborhood bakery with online pre-orders">{idea}</textarea></label>
    <button class="btn">Generate my site</button>
</form>"#,
        error_html = error_html,
        name = html_escape(&form.name),
        email = html_escape(&form.email),
        types = types,
        idea = html_escape(&form.idea)
    )
}

fn loading() -> String {
    r#"<div class="center card">
    <div class="spinner"></div>
    <h2>Building your site...</h2>
    <p class="lead">Writing pages, picking colors and laying out sections.</p>
</div>
<noscript><meta http-equiv="refresh" content="3"></noscript>
<script>
    const events = new EventSource("/_events");
    events.onmessage = () => { events.close(); location.reload(); };
    events.onerror = () => setTimeout(() => location.reload(), 3000);
</script>"#
        .to_string()
}

fn payment(session: &Session) -> String {
    let site_name = session
        .site()
        .map(|s| html_escape(&s.site_name))
        .unwrap_or_default();

    format!(
        r#"<div class="center card">
    <h2>Your site "{site_name}" is ready</h2>
    <p class="lead">Unlock the full preview of every page.</p>
    <div class="price">{price}</div>
    <div class="actions" style="justify-content: center">
        <form method="post" action="/payment" onsubmit="this.accepted.value = confirm('Pay {price} to unlock your site?')">
            <input type="hidden" name="accepted" value="false">
            <button class="btn">Pay and preview</button>
        </form>
        <form method="post" action="/payment/cancel"><button class="btn secondary">Cancel</button></form>
    </div>
</div>"#,
        site_name = site_name,
        price = PREVIEW_PRICE
    )
}

fn fun() -> String {
    r#"<h1>Just for fun</h1>
<div class="card">
    <p class="lead">Every site is written from scratch for your idea. Try the same idea twice and see what changes.</p>
</div>"#
        .to_string()
}

fn preview(session: &Session) -> String {
    let Some(site) = session.site() else {
        return shell(session, "");
    };

    let toolbar = r#"<div class="preview-bar"><form method="post" action="/reset"><button class="btn">Start over</button></form></div>"#;
    let options = HtmlOptions {
        links: PageLinks::Query("/".to_string()),
        toolbar: Some(toolbar.to_string()),
        ..HtmlOptions::default()
    };

    to_html(&render(site, session.active_page()), &options)
}
