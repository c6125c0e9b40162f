use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The top-level pages a session can be on. Navigation dispatches on
/// this exhaustively; there is no stringly-typed page switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Skills,
    Projects,
    Certificates,
    Progress,
}

impl View {
    pub fn title(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Skills => "Skills",
            View::Projects => "Projects",
            View::Certificates => "Certificates",
            View::Progress => "Progress",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown page '{0}'. Pages: home, skills, projects, certificates, progress")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(View::Home),
            "skills" => Ok(View::Skills),
            "projects" => Ok(View::Projects),
            "certificates" => Ok(View::Certificates),
            "progress" => Ok(View::Progress),
            _ => Err(UnknownView(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_parses_by_name() {
        for (input, expected) in [
            ("home", View::Home),
            ("Skills", View::Skills),
            ("PROJECTS", View::Projects),
            ("certificates", View::Certificates),
            ("progress", View::Progress),
        ] {
            assert_eq!(input.parse::<View>().ok(), Some(expected));
        }
    }

    #[test]
    fn unknown_page_is_an_error() {
        assert!("settings".parse::<View>().is_err());
    }
}
