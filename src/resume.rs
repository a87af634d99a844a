//! Résumé export.
//!
//! `resume` hands back a loading placeholder; the runtime then writes a
//! plain-text résumé next to the config and reports where it landed.

use std::path::PathBuf;
use std::sync::Arc;

use crate::interpreter::render;
use crate::markup::Markup;
use crate::portfolio::Portfolio;
use crate::{flog_debug, Result};

/// Assemble the résumé from the portfolio sections.
pub fn render_text(p: &Portfolio) -> String {
    let sections = [
        ("ABOUT", render::about(p)),
        ("SKILLS", render::skills(p)),
        ("EXPERIENCE", render::experience(p)),
        ("EDUCATION", render::education(p)),
        ("PROJECTS", render::projects(p)),
        ("AWARDS", render::awards(p)),
        ("VOLUNTEERING", render::volunteer(p)),
        ("CONTACT", render::contact(p)),
    ];

    let mut out = String::new();
    for (title, body) in sections {
        if body.is_empty() {
            continue;
        }
        out.push_str(&heading(title));
        out.push_str(&body.to_plain());
        out.push_str("\n\n");
    }
    out
}

fn heading(title: &str) -> String {
    let rule = "=".repeat(title.len());
    Markup::new()
        .with(|l| l.plain(title))
        .with(|l| l.plain(rule))
        .to_plain()
        + "\n"
}

/// `jane-doe-resume.txt` from the display name.
pub fn file_name(p: &Portfolio) -> String {
    let slug: String = p
        .about
        .name
        .split_whitespace()
        .map(|w| {
            w.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if slug.is_empty() {
        "resume.txt".to_string()
    } else {
        format!("{slug}-resume.txt")
    }
}

pub async fn export(portfolio: Arc<Portfolio>, dir: PathBuf) -> Result<PathBuf> {
    tokio::fs::create_dir_all(&dir).await?;
    let path = dir.join(file_name(&portfolio));
    flog_debug!("resume::export path={}", path.display());
    tokio::fs::write(&path, render_text(&portfolio)).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_name_slug() {
        let mut p = Portfolio::embedded().unwrap();
        p.about.name = "Jane  O'Doe".to_string();
        assert_eq!(file_name(&p), "jane-odoe-resume.txt");
        p.about.name = "  ".to_string();
        assert_eq!(file_name(&p), "resume.txt");
    }

    #[test]
    fn test_render_text_has_sections() {
        let p = Portfolio::embedded().unwrap();
        let text = render_text(&p);
        assert!(text.starts_with("ABOUT\n=====\n"));
        assert!(text.contains("EXPERIENCE"));
        assert!(text.contains(&p.contact.email));
    }

    #[tokio::test]
    async fn test_export_writes_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("export");
        let p = Arc::new(Portfolio::embedded().unwrap());

        let path = export(p.clone(), dir.clone()).await.unwrap();
        assert_eq!(path, dir.join(file_name(&p)));
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, render_text(&p));
    }
}
