use super::screens::render_screen;
use anyhow::{Context, Result};
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{
        Html, IntoResponse, Redirect, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use serde::Deserialize;
use sitecraft_client::{GeminiClient, SiteGenerator};
use sitecraft_core::{FormInput, ProjectType, Settings};
use sitecraft_session::{Session, SessionError, View};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tokio::sync::{Mutex, broadcast};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    session: Arc<Mutex<Session>>,
    generator: Arc<dyn SiteGenerator>,
    changed_tx: broadcast::Sender<()>,
}

impl AppState {
    pub fn new(generator: Arc<dyn SiteGenerator>) -> Self {
        let (changed_tx, _) = broadcast::channel::<()>(16);
        Self {
            session: Arc::new(Mutex::new(Session::new())),
            generator,
            changed_tx,
        }
    }

    /// Wake every open `/_events` stream
    fn notify(&self) {
        // No subscribers is fine
        let _ = self.changed_tx.send(());
    }
}

/// Start the site builder on localhost.
///
/// The API key is checked before binding, so a missing credential fails at
/// startup rather than on the first submission.
pub async fn run(config: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    println!("✨ Starting site builder...");

    let settings = Settings::load(config.as_deref()).context("Failed to load settings")?;
    let client = GeminiClient::new(&settings.provider).context(
        "Failed to create model client\nSet GEMINI_API_KEY or run 'sitecraft configure' first",
    )?;

    println!("   ✓ Model: {}", settings.provider.model);
    println!("   ✓ Content language: {}", settings.provider.language);

    let app = router(AppState::new(Arc::new(client)));

    let port = port.unwrap_or(settings.server.port);
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to port")?;

    println!("\n🚀 Ready at: http://localhost:{}", port);
    println!("   Press Ctrl+C to stop\n");
    info!(%addr, "site builder listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/start", post(start_handler))
        .route("/how-it-works", post(how_it_works_handler))
        .route("/nav/{view}", post(nav_handler))
        .route("/register", post(register_handler))
        .route("/payment", post(payment_handler))
        .route("/payment/cancel", post(cancel_payment_handler))
        .route("/reset", post(reset_handler))
        .route("/_events", get(sse_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Log a rejected transition and send the browser back to the current screen
fn redirect_after(result: Result<(), SessionError>) -> Response {
    if let Err(e) = result {
        warn!(error = %e, "transition rejected");
    }
    Redirect::to("/").into_response()
}

#[derive(Debug, Deserialize)]
struct PageQuery {
    page: Option<String>,
}

async fn index_handler(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let mut session = state.session.lock().await;
    if let Some(slug) = query.page.as_deref()
        && let Err(e) = session.select_page(slug)
    {
        warn!(error = %e, slug, "page selection ignored");
    }
    Html(render_screen(&session))
}

async fn start_handler(State(state): State<AppState>) -> Response {
    redirect_after(state.session.lock().await.start())
}

async fn how_it_works_handler(State(state): State<AppState>) -> Response {
    redirect_after(state.session.lock().await.how_it_works())
}

async fn nav_handler(State(state): State<AppState>, Path(view): Path<String>) -> Response {
    let target = match view.parse::<View>() {
        Ok(target) => target,
        Err(e) => {
            warn!(error = %e, "navigation to unknown screen");
            return Redirect::to("/").into_response();
        }
    };
    redirect_after(state.session.lock().await.navigate(target))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RegisterForm {
    name: String,
    email: String,
    idea: String,
    project_type: String,
}

impl RegisterForm {
    /// A missing project type means the default; an unknown one is an error
    fn into_input(self) -> sitecraft_core::Result<FormInput> {
        let project_type = match self.project_type.trim() {
            "" => ProjectType::default(),
            value => value.parse()?,
        };
        Ok(FormInput {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            idea: self.idea,
            project_type,
        })
    }
}

/// Store the form, then start generation in the background. The loading
/// screen waits on `/_events` for the result.
async fn register_handler(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> Response {
    let input = match form.into_input() {
        Ok(input) => input,
        Err(e) => {
            warn!(error = %e, "registration rejected");
            return Redirect::to("/").into_response();
        }
    };

    let ticket = {
        let mut session = state.session.lock().await;
        let submitted = session
            .update_form(input)
            .and_then(|()| session.submit());
        match submitted {
            Ok(ticket) => ticket,
            Err(e) => return redirect_after(Err(e)),
        }
    };

    let task_state = state.clone();
    tokio::spawn(async move {
        let result = task_state.generator.generate_site(&ticket.prompt).await;
        let applied = task_state.session.lock().await.complete(ticket.id, result);
        if applied.is_ok() {
            task_state.notify();
        }
    });

    Redirect::to("/").into_response()
}

#[derive(Debug, Default, Deserialize)]
struct PaymentForm {
    #[serde(default)]
    accepted: bool,
}

async fn payment_handler(State(state): State<AppState>, Form(form): Form<PaymentForm>) -> Response {
    redirect_after(state.session.lock().await.confirm_payment(form.accepted))
}

async fn cancel_payment_handler(State(state): State<AppState>) -> Response {
    redirect_after(state.session.lock().await.cancel_payment())
}

async fn reset_handler(State(state): State<AppState>) -> Response {
    state.session.lock().await.reset();
    state.notify();
    Redirect::to("/").into_response()
}

/// SSE endpoint the loading screen listens on.
///
/// A result that landed before the page subscribed is reported at once.
async fn sse_handler(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, std::convert::Infallible>>> {
    // Subscribe before reading the view so no change falls in between
    let mut rx = state.changed_tx.subscribe();
    let settled = state.session.lock().await.view() != View::Loading;

    let stream = async_stream::stream! {
        if settled {
            yield Ok(Event::default().data("reload"));
        }
        loop {
            match rx.recv().await {
                Ok(()) | Err(broadcast::error::RecvError::Lagged(_)) => {
                    yield Ok(Event::default().data("reload"));
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use futures::StreamExt;
    use sitecraft_client::GenerationError;
    use sitecraft_core::GeneratedSite;
    use std::time::Duration;
    use tower::ServiceExt;

    struct FixedGenerator(Option<GeneratedSite>);

    /// Never answers, so the session stays on the loading screen
    struct StalledGenerator;

    #[async_trait]
    impl SiteGenerator for StalledGenerator {
        async fn generate_site(&self, _prompt: &str) -> Result<GeneratedSite, GenerationError> {
            std::future::pending().await
        }
    }

    #[async_trait]
    impl SiteGenerator for FixedGenerator {
        async fn generate_site(&self, _prompt: &str) -> Result<GeneratedSite, GenerationError> {
            self.0.clone().ok_or(GenerationError::EmptyResponse)
        }
    }

    fn bakery() -> GeneratedSite {
        GeneratedSite::from_json(
            r##"{
            "siteName": "Sweet Crumbs",
            "tagline": "Baked fresh daily",
            "palette": { "primary": "#c2410c", "secondary": "#fed7aa", "background": "#fff7ed", "text": "#431407", "accent": "#ea580c" },
            "pages": [
                { "title": "Home", "slug": "home", "sections": [ { "type": "hero", "content": { "headline": "Warm bread every morning" } } ] },
                { "title": "Menu", "slug": "menu", "sections": [ { "type": "features", "content": { "headline": "Our menu" } } ] }
            ]
        }"##,
        )
        .unwrap()
    }

    async fn post(app: &Router, uri: &str, body: &str) -> StatusCode {
        let response = app
            .clone()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    async fn get_page(app: &Router, uri: &str) -> String {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    /// First chunk of the `/_events` stream, if one arrives within `within`
    async fn first_event(app: &Router, within: Duration) -> Option<String> {
        let response = app
            .clone()
            .oneshot(Request::get("/_events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let mut body = response.into_body().into_data_stream();
        let chunk = tokio::time::timeout(within, body.next()).await.ok()??;
        Some(String::from_utf8(chunk.unwrap().to_vec()).unwrap())
    }

    async fn wait_for(state: &AppState, view: View) {
        for _ in 0..100 {
            if state.session.lock().await.view() == view {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("session never reached {}", view);
    }

    const SARA: &str = "name=Sara&email=s%40x.com&idea=bakery+website&project_type=business";

    #[tokio::test]
    async fn test_full_flow() {
        let state = AppState::new(Arc::new(FixedGenerator(Some(bakery()))));
        let app = router(state.clone());

        assert_eq!(post(&app, "/start", "").await, StatusCode::SEE_OTHER);
        assert!(get_page(&app, "/").await.contains(r#"action="/register""#));

        assert_eq!(post(&app, "/register", SARA).await, StatusCode::SEE_OTHER);
        wait_for(&state, View::Payment).await;
        assert!(get_page(&app, "/").await.contains("Sweet Crumbs"));

        // declined confirmation stays on payment
        post(&app, "/payment", "accepted=false").await;
        assert_eq!(state.session.lock().await.view(), View::Payment);

        post(&app, "/payment", "accepted=true").await;
        let html = get_page(&app, "/").await;
        assert!(html.contains("Warm bread every morning"));
        assert!(html.contains(r#"action="/reset""#));

        let html = get_page(&app, "/?page=menu").await;
        assert!(html.contains("Our menu"));
        assert_eq!(state.session.lock().await.active_page(), Some("menu"));

        post(&app, "/reset", "").await;
        let session = state.session.lock().await;
        assert_eq!(session.view(), View::Home);
        assert!(session.site().is_none());
    }

    #[tokio::test]
    async fn test_failed_generation_shows_error() {
        let state = AppState::new(Arc::new(FixedGenerator(None)));
        let app = router(state.clone());

        post(&app, "/start", "").await;
        post(&app, "/register", SARA).await;
        wait_for(&state, View::Register).await;

        let html = get_page(&app, "/").await;
        assert!(html.contains(r#"class="error""#));
        assert!(html.contains(r#"value="Sara""#));
    }

    #[tokio::test]
    async fn test_incomplete_form_stays_on_register() {
        let state = AppState::new(Arc::new(FixedGenerator(Some(bakery()))));
        let app = router(state.clone());

        post(&app, "/start", "").await;
        assert_eq!(
            post(&app, "/register", "name=Sara&email=&idea=").await,
            StatusCode::SEE_OTHER
        );
        assert_eq!(state.session.lock().await.view(), View::Register);
    }

    #[tokio::test]
    async fn test_navigation_routes() {
        let state = AppState::new(Arc::new(FixedGenerator(Some(bakery()))));
        let app = router(state.clone());

        post(&app, "/nav/fun", "").await;
        assert_eq!(state.session.lock().await.view(), View::Fun);

        // unknown and non-navigable targets are ignored
        post(&app, "/nav/checkout", "").await;
        post(&app, "/nav/preview", "").await;
        assert_eq!(state.session.lock().await.view(), View::Fun);

        post(&app, "/nav/home", "").await;
        post(&app, "/how-it-works", "").await;
        assert_eq!(state.session.lock().await.view(), View::Instructions);
    }

    #[tokio::test]
    async fn test_events_report_result_that_landed_before_subscribing() {
        let state = AppState::new(Arc::new(FixedGenerator(Some(bakery()))));
        let app = router(state.clone());

        post(&app, "/start", "").await;
        post(&app, "/register", SARA).await;
        wait_for(&state, View::Payment).await;

        let event = first_event(&app, Duration::from_secs(2)).await;
        assert!(event.unwrap().contains("data: reload"));
    }

    #[tokio::test]
    async fn test_events_wait_while_loading() {
        let state = AppState::new(Arc::new(StalledGenerator));
        let app = router(state.clone());

        post(&app, "/start", "").await;
        post(&app, "/register", SARA).await;
        assert_eq!(state.session.lock().await.view(), View::Loading);

        assert_eq!(first_event(&app, Duration::from_millis(200)).await, None);
    }

    #[tokio::test]
    async fn test_unknown_project_type_redirects() {
        let state = AppState::new(Arc::new(FixedGenerator(Some(bakery()))));
        let app = router(state.clone());

        post(&app, "/start", "").await;
        let status = post(
            &app,
            "/register",
            "name=Sara&email=s%40x.com&idea=bakery&project_type=spaceship",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(state.session.lock().await.view(), View::Register);

        // a missing type falls back to the default
        post(&app, "/register", "name=Sara&email=s%40x.com&idea=bakery").await;
        wait_for(&state, View::Payment).await;
        assert_eq!(state.session.lock().await.form().project_type, ProjectType::Business);
    }
}
