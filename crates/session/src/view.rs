use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Screens of the site builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Instructions,
    Register,
    Loading,
    Payment,
    Preview,
    Fun,
}

impl View {
    pub const ALL: [View; 7] = [
        View::Home,
        View::Instructions,
        View::Register,
        View::Loading,
        View::Payment,
        View::Preview,
        View::Fun,
    ];

    /// Screens that show the top navigation and can be reached from it
    pub fn is_navigable(&self) -> bool {
        matches!(
            self,
            View::Home | View::Instructions | View::Register | View::Fun
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Home => "home",
            View::Instructions => "instructions",
            View::Register => "register",
            View::Loading => "loading",
            View::Payment => "payment",
            View::Preview => "preview",
            View::Fun => "fun",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view '{0}'")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}
