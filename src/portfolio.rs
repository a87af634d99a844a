//! Static portfolio content rendered by the read-only commands.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Palette;
use crate::{flog_debug, Error, Result};

const EMBEDDED: &str = include_str!("../assets/portfolio.toml");

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct About {
    pub name: String,
    pub role: String,
    pub bio: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Skills {
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub frameworks: Vec<String>,
    #[serde(default)]
    pub cloud: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Job {
    pub role: String,
    pub company: String,
    pub period: String,
    pub link: Option<String>,
    #[serde(default)]
    pub details: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub year: String,
    #[serde(default)]
    pub details: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Award {
    pub title: String,
    pub year: Option<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Volunteer {
    pub role: String,
    pub organization: String,
    pub event: String,
    pub description: String,
    #[serde(default)]
    pub details: Vec<String>,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Interest {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub email: String,
    /// Host and path without scheme, e.g. `github.com/example`.
    pub github: String,
    pub linkedin: String,
}

impl Contact {
    pub fn github_url(&self) -> String {
        format!("https://{}", self.github)
    }

    pub fn linkedin_url(&self) -> String {
        format!("https://{}", self.linkedin)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectImage {
    pub src: String,
    pub caption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    /// Short name for the list view.
    pub name: String,
    /// Full formal title for the detail view.
    pub title: String,
    pub description: String,
    pub stack: Vec<String>,
    pub overview: String,
    #[serde(default)]
    pub objectives: Vec<String>,
    pub challenges: Option<String>,
    pub results: Option<String>,
    pub github: Option<String>,
    pub report_url: Option<String>,
    pub link: Option<String>,
    pub app_store_url: Option<String>,
    pub play_store_url: Option<String>,
    #[serde(default)]
    pub images: Vec<ProjectImage>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Portfolio {
    pub about: About,
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Job>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub volunteer: Vec<Volunteer>,
    #[serde(default)]
    pub interests: Vec<Interest>,
    pub contact: Contact,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub themes: Vec<String>,
    pub fortunes: Vec<String>,
}

impl Portfolio {
    /// The content compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::parse(EMBEDDED)
    }

    /// Load from `path` when given, otherwise the embedded content.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                flog_debug!("Portfolio::load path={}", path.display());
                Self::parse(&fs::read_to_string(path)?)
            }
            None => Self::embedded(),
        }
    }

    pub fn parse(source: &str) -> Result<Self> {
        let portfolio: Self = toml::from_str(source)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    fn validate(&self) -> Result<()> {
        if self.themes.is_empty() {
            return Err(Error::Validation("at least one theme is required".into()));
        }
        for required in ["default", "matrix"] {
            if !self.has_theme(required) {
                return Err(Error::Validation(format!("theme '{required}' is required")));
            }
        }
        let unknown = self
            .themes
            .iter()
            .find(|t| !Palette::NAMES.contains(&t.as_str()));
        if let Some(unknown) = unknown {
            return Err(Error::Validation(format!(
                "unknown theme '{unknown}' (known: {})",
                Palette::NAMES.join(", ")
            )));
        }
        if self.fortunes.is_empty() {
            return Err(Error::Validation("at least one fortune is required".into()));
        }
        let mut seen = HashSet::new();
        for project in &self.projects {
            if !seen.insert(project.id.to_lowercase()) {
                return Err(Error::Validation(format!(
                    "duplicate project id '{}'",
                    project.id
                )));
            }
        }
        Ok(())
    }

    /// Case-insensitive exact match on the project id.
    pub fn project(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id.eq_ignore_ascii_case(id))
    }

    pub fn has_theme(&self, name: &str) -> bool {
        self.themes.iter().any(|t| t == name)
    }
}
