//! Scrollback line types shared by the interpreter, the session model and
//! the renderer.

use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::markup::Markup;

/// Classification of a history line; drives its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineKind {
    Input,
    #[default]
    Output,
    System,
    Error,
}

/// Unique within one session, e.g. `boot-17` or `output-42`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineId(String);

impl LineId {
    pub fn new(prefix: &str, n: u64) -> Self {
        Self(format!("{prefix}-{n}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Two-state handle for the lazily prepared résumé export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeState {
    Loading,
    Ready(PathBuf),
    Failed(String),
}

/// What a line displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Markup(Markup),
    Resume(ResumeState),
}

impl Body {
    pub fn to_plain(&self) -> String {
        match self {
            Body::Markup(m) => m.to_plain(),
            Body::Resume(ResumeState::Loading) => "Loading PDF Engine...".to_string(),
            Body::Resume(ResumeState::Ready(path)) => {
                format!("Resume ready: {}", path.display())
            }
            Body::Resume(ResumeState::Failed(reason)) => {
                format!("Resume export failed: {reason}")
            }
        }
    }
}

impl From<Markup> for Body {
    fn from(markup: Markup) -> Self {
        Body::Markup(markup)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Markup(Markup::text(text))
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Markup(Markup::text(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalLine {
    pub id: LineId,
    pub kind: LineKind,
    pub body: Body,
    pub timestamp: Option<DateTime<Local>>,
}

impl TerminalLine {
    pub fn to_plain(&self) -> String {
        self.body.to_plain()
    }
}
