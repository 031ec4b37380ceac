pub mod view;

use sitecraft_client::{GenerationError, SiteGenerator, compose_prompt};
use sitecraft_core::{FormInput, GeneratedSite, ProjectType};
use thiserror::Error;
use tracing::{debug, info, warn};

pub use view::View;

/// Shown on the registration screen after any generation failure
pub const GENERATION_FAILED_MESSAGE: &str =
    "Something went wrong while generating your site. Please try again.";

/// Price shown on the (simulated) payment screen
pub const PREVIEW_PRICE: &str = "$50.00";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("'{action}' is not allowed on the {view} screen")]
    InvalidTransition { action: &'static str, view: View },

    #[error("Name, email and idea are required")]
    IncompleteForm,

    #[error("Generation result does not belong to the pending request")]
    StaleTicket,
}

/// One outstanding generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub id: u64,
    pub prompt: String,
}

/// Screen state for one user: form input, generated site and current view.
///
/// Generation runs outside the session. `submit` hands out a
/// [`GenerationTicket`] and `complete` applies the result only while that
/// ticket is still the pending one.
#[derive(Debug, Clone, Default)]
pub struct Session {
    view: View,
    form: FormInput,
    site: Option<GeneratedSite>,
    error: Option<String>,
    active_page: Option<String>,
    pending: Option<u64>,
    next_ticket: u64,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn form(&self) -> &FormInput {
        &self.form
    }

    pub fn site(&self) -> Option<&GeneratedSite> {
        self.site.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn active_page(&self) -> Option<&str> {
        self.active_page.as_deref()
    }

    /// Whether the top navigation is offered on the current screen
    pub fn is_nav_visible(&self) -> bool {
        self.view.is_navigable()
    }

    /// Home → Register
    pub fn start(&mut self) -> Result<(), SessionError> {
        self.expect_view("start", &[View::Home])?;
        self.go(View::Register);
        Ok(())
    }

    /// Home → Instructions
    pub fn how_it_works(&mut self) -> Result<(), SessionError> {
        self.expect_view("how_it_works", &[View::Home])?;
        self.go(View::Instructions);
        Ok(())
    }

    /// Move between the screens reachable from the top navigation
    pub fn navigate(&mut self, target: View) -> Result<(), SessionError> {
        if !self.view.is_navigable() || !target.is_navigable() {
            return Err(SessionError::InvalidTransition {
                action: "navigate",
                view: self.view,
            });
        }
        self.go(target);
        Ok(())
    }

    /// Replace the form fields while the form is on screen
    pub fn update_form(&mut self, form: FormInput) -> Result<(), SessionError> {
        self.expect_view("update_form", &[View::Register])?;
        self.form = form;
        Ok(())
    }

    pub fn select_project_type(&mut self, project_type: ProjectType) -> Result<(), SessionError> {
        self.expect_view("select_project_type", &[View::Register])?;
        self.form.project_type = project_type;
        Ok(())
    }

    /// Register → Loading. The returned ticket must be passed to [`Session::complete`].
    ///
    /// An incomplete form leaves the session untouched.
    pub fn submit(&mut self) -> Result<GenerationTicket, SessionError> {
        self.expect_view("submit", &[View::Register])?;
        if !self.form.is_complete() {
            return Err(SessionError::IncompleteForm);
        }

        self.next_ticket += 1;
        let ticket = GenerationTicket {
            id: self.next_ticket,
            prompt: compose_prompt(self.form.project_type.id(), &self.form.idea),
        };
        self.pending = Some(ticket.id);
        self.error = None;
        self.go(View::Loading);
        info!(ticket = ticket.id, project_type = %self.form.project_type, "site generation requested");
        Ok(ticket)
    }

    /// Apply the outcome of the request identified by `ticket`.
    ///
    /// Success stores the site and moves to Payment; failure stores the generic
    /// error message and returns to Register with the form intact.
    pub fn complete(
        &mut self,
        ticket: u64,
        result: Result<GeneratedSite, GenerationError>,
    ) -> Result<(), SessionError> {
        if self.view != View::Loading || self.pending != Some(ticket) {
            debug!(ticket, "discarding result of stale generation request");
            return Err(SessionError::StaleTicket);
        }
        self.pending = None;

        match result {
            Ok(site) => {
                info!(ticket, site = %site.site_name, pages = site.pages.len(), "site generated");
                self.site = Some(site);
                self.go(View::Payment);
            }
            Err(err) => {
                warn!(ticket, error = %err, "site generation failed");
                self.site = None;
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.go(View::Register);
            }
        }
        Ok(())
    }

    /// Submit, run exactly one generation call, and apply its result
    pub async fn submit_with(&mut self, generator: &dyn SiteGenerator) -> Result<(), SessionError> {
        let ticket = self.submit()?;
        let result = generator.generate_site(&ticket.prompt).await;
        self.complete(ticket.id, result)
    }

    /// Answer the payment confirmation prompt. Declining keeps the payment screen.
    pub fn confirm_payment(&mut self, accepted: bool) -> Result<(), SessionError> {
        self.expect_view("confirm_payment", &[View::Payment])?;
        if accepted {
            self.active_page = self
                .site
                .as_ref()
                .and_then(|s| s.pages.first())
                .map(|p| p.slug.clone());
            self.go(View::Preview);
        } else {
            debug!("payment declined");
        }
        Ok(())
    }

    /// Payment → Register. The unpaid site is discarded.
    pub fn cancel_payment(&mut self) -> Result<(), SessionError> {
        self.expect_view("cancel_payment", &[View::Payment])?;
        self.site = None;
        self.go(View::Register);
        Ok(())
    }

    /// Choose which generated page the preview shows
    pub fn select_page(&mut self, slug: &str) -> Result<(), SessionError> {
        self.expect_view("select_page", &[View::Preview])?;
        self.active_page = Some(slug.to_string());
        Ok(())
    }

    /// Back to Home with everything cleared. Any pending request is orphaned.
    pub fn reset(&mut self) {
        if let Some(ticket) = self.pending.take() {
            debug!(ticket, "reset while generation pending");
        }
        self.site = None;
        self.form = FormInput::default();
        self.error = None;
        self.active_page = None;
        self.go(View::Home);
    }

    fn expect_view(&self, action: &'static str, allowed: &[View]) -> Result<(), SessionError> {
        if allowed.contains(&self.view) {
            Ok(())
        } else {
            Err(SessionError::InvalidTransition {
                action,
                view: self.view,
            })
        }
    }

    fn go(&mut self, next: View) {
        if self.view != next {
            debug!(from = %self.view, to = %next, "view transition");
        }
        self.view = next;
    }
}
