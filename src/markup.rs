//! Lightweight styled text for command output.
//!
//! The interpreter produces `Markup` without knowing anything about the
//! renderer; `ui` maps each `Tone` onto the active theme palette.

/// Semantic role of a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Names, labels and highlighted identifiers.
    Accent,
    /// Section headings.
    Heading,
    /// Secondary information (periods, hints, stacks).
    Dim,
    /// Something openable: URLs and e-mail addresses.
    Link,
    /// Fortunes and other quoted text.
    Quote,
    /// Pre-formatted ASCII art, never wrapped.
    Art,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub text: String,
    pub tone: Tone,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupLine {
    pub fragments: Vec<Fragment>,
}

impl MarkupLine {
    pub fn push(mut self, tone: Tone, text: impl Into<String>) -> Self {
        self.fragments.push(Fragment {
            text: text.into(),
            tone,
        });
        self
    }

    pub fn plain(self, text: impl Into<String>) -> Self {
        self.push(Tone::Plain, text)
    }

    pub fn accent(self, text: impl Into<String>) -> Self {
        self.push(Tone::Accent, text)
    }

    pub fn heading(self, text: impl Into<String>) -> Self {
        self.push(Tone::Heading, text)
    }

    pub fn dim(self, text: impl Into<String>) -> Self {
        self.push(Tone::Dim, text)
    }

    pub fn link(self, text: impl Into<String>) -> Self {
        self.push(Tone::Link, text)
    }

    pub fn to_plain(&self) -> String {
        self.fragments.iter().map(|f| f.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Markup {
    pub lines: Vec<MarkupLine>,
}

impl Markup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unstyled text; embedded newlines become separate lines.
    pub fn text(text: impl AsRef<str>) -> Self {
        Self::toned(Tone::Plain, text)
    }

    pub fn toned(tone: Tone, text: impl AsRef<str>) -> Self {
        let lines = text
            .as_ref()
            .lines()
            .map(|l| MarkupLine::default().push(tone, l))
            .collect();
        Self { lines }
    }

    pub fn line(mut self, line: MarkupLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Build a line in place: `markup.with(|l| l.accent("x").plain(" y"))`.
    pub fn with(self, build: impl FnOnce(MarkupLine) -> MarkupLine) -> Self {
        self.line(build(MarkupLine::default()))
    }

    pub fn blank(self) -> Self {
        self.line(MarkupLine::default())
    }

    pub fn append(mut self, other: Markup) -> Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.fragments.is_empty())
    }

    /// Flatten to newline-separated text (headless output, tests, logs).
    pub fn to_plain(&self) -> String {
        self.lines
            .iter()
            .map(MarkupLine::to_plain)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl From<&str> for Markup {
    fn from(text: &str) -> Self {
        Markup::text(text)
    }
}

impl From<String> for Markup {
    fn from(text: String) -> Self {
        Markup::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_splits_lines() {
        let m = Markup::text("one\ntwo");
        assert_eq!(m.lines.len(), 2);
        assert_eq!(m.to_plain(), "one\ntwo");
    }

    #[test]
    fn test_builder_keeps_tones() {
        let m = Markup::new().with(|l| l.accent("help").dim(" - list commands"));
        let frags = &m.lines[0].fragments;
        assert_eq!(frags[0].tone, Tone::Accent);
        assert_eq!(frags[1].tone, Tone::Dim);
        assert_eq!(m.to_plain(), "help - list commands");
    }

    #[test]
    fn test_blank_lines_are_empty() {
        assert!(Markup::new().blank().is_empty());
        assert!(!Markup::text("x").is_empty());
    }
}
