//! Markup renderings of the static portfolio collections.

use crate::markup::{Markup, MarkupLine, Tone};
use crate::portfolio::{Portfolio, Project};
use crate::registry::Registry;

pub const ASCII_HELLO: &str = r"
  _          _ _
 | |__   ___| | | ___
 | '_ \ / _ \ | |/ _ \
 | | | |  __/ | | (_) |
 |_| |_|\___|_|_|\___/
";

pub const ASCII_CAT: &str = r#"
  /\_/\  (
 ( ^.^ ) _)
   \"/  (
 ( | | )
(__d b__)
"#;

fn bullet(text: &str) -> MarkupLine {
    MarkupLine::default().dim("  - ").plain(text)
}

pub fn help(registry: &Registry) -> Markup {
    let mut out = Markup::new().with(|l| l.heading("Available commands:"));
    for entry in registry.visible() {
        out = out.with(|mut l| {
            l = l.plain("  ").accent(entry.name);
            if !entry.synonyms.is_empty() {
                l = l.dim(format!(" ({})", entry.synonyms.join(", ")));
            }
            l.plain(" - ").dim(entry.description)
        });
    }
    out
}

pub fn about(p: &Portfolio) -> Markup {
    Markup::new()
        .with(|l| l.heading(&p.about.name))
        .with(|l| l.accent(&p.about.role))
        .blank()
        .append(Markup::text(&p.about.bio))
        .blank()
        .with(|l| l.dim("Type 'skills' or 'experience' to learn more."))
}

pub fn skills(p: &Portfolio) -> Markup {
    let groups = [
        ("Languages:", &p.skills.languages),
        ("Frameworks:", &p.skills.frameworks),
        ("Cloud:", &p.skills.cloud),
        ("Tools & Platforms:", &p.skills.tools),
        ("Professional:", &p.skills.soft),
    ];
    groups
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
        .fold(Markup::new(), |out, (label, items)| {
            out.with(|l| l.accent(label).plain(" ").plain(items.join(", ")))
        })
}

pub fn experience(p: &Portfolio) -> Markup {
    let mut out = Markup::new();
    for (i, job) in p.experience.iter().enumerate() {
        if i > 0 {
            out = out.blank();
        }
        out = out
            .with(|l| l.heading(&job.role).plain("  ").dim(&job.period))
            .with(|mut l| {
                l = l.accent(format!("@ {}", job.company));
                if let Some(link) = &job.link {
                    l = l.plain(" ").link(link);
                }
                l
            });
        for detail in &job.details {
            out = out.line(bullet(detail));
        }
        out = out.with(|l| l.dim(format!("Stack: {}", job.tech.join(", "))));
    }
    out
}

pub fn education(p: &Portfolio) -> Markup {
    let mut out = Markup::new();
    for (i, edu) in p.education.iter().enumerate() {
        if i > 0 {
            out = out.blank();
        }
        out = out
            .with(|l| l.heading(&edu.school).plain("  ").dim(&edu.year))
            .with(|l| l.plain(&edu.degree));
        if !edu.details.is_empty() {
            out = out.with(|l| l.dim(&edu.details));
        }
    }
    out
}

pub fn awards(p: &Portfolio) -> Markup {
    p.awards.iter().fold(Markup::new(), |out, award| {
        out.with(|mut l| {
            l = l.dim("- ").accent(&award.title);
            if let Some(year) = &award.year {
                l = l.dim(format!(" ({year})"));
            }
            if let Some(link) = &award.link {
                l = l.plain(" ").link(link);
            }
            l
        })
    })
}

pub fn volunteer(p: &Portfolio) -> Markup {
    let mut out = Markup::new();
    for (i, vol) in p.volunteer.iter().enumerate() {
        if i > 0 {
            out = out.blank();
        }
        out = out
            .with(|mut l| {
                l = l
                    .heading(&vol.role)
                    .plain(format!(" - {}", vol.organization));
                if let Some(link) = &vol.link {
                    l = l.plain(" ").link(link);
                }
                l
            })
            .with(|l| l.dim(&vol.event))
            .with(|l| l.plain(&vol.description));
        for detail in &vol.details {
            out = out.line(bullet(detail));
        }
    }
    out
}

pub fn interests(p: &Portfolio) -> Markup {
    p.interests.iter().fold(Markup::new(), |out, interest| {
        out.with(|l| {
            l.accent(format!("{}:", interest.title))
                .plain(" ")
                .dim(&interest.description)
        })
    })
}

pub fn projects(p: &Portfolio) -> Markup {
    let mut out = Markup::new().with(|l| l.heading("PROJECT_REGISTRY_V1.0")).blank();
    for project in &p.projects {
        out = out
            .with(|l| {
                l.accent(format!("[{}]", project.id))
                    .plain(" ")
                    .heading(&project.name)
            })
            .with(|l| l.plain("    ").plain(&project.description))
            .with(|l| l.plain("    ").dim(format!("Stack: {}", project.stack.join(", "))));
    }
    let example = p.projects.first().map(|p| p.id.as_str()).unwrap_or("id");
    out.blank().with(|l| {
        l.dim(format!(
            "Usage: type 'project <id>' to load data shard (e.g., 'project {example}')"
        ))
    })
}

pub fn project(project: &Project) -> Markup {
    let mut out = Markup::new()
        .with(|l| l.heading(&project.title))
        .with(|l| l.dim(format!("[ {} ]", project.stack.join(" | "))))
        .blank()
        .with(|l| l.accent("OVERVIEW"))
        .append(Markup::text(&project.overview));

    if !project.objectives.is_empty() {
        out = out.blank().with(|l| l.accent("OBJECTIVES"));
        for objective in &project.objectives {
            out = out.line(bullet(objective));
        }
    }
    if let Some(challenges) = &project.challenges {
        out = out
            .blank()
            .with(|l| l.accent("CHALLENGES"))
            .append(Markup::text(challenges));
    }
    if let Some(results) = &project.results {
        out = out
            .blank()
            .with(|l| l.accent("RESULTS"))
            .append(Markup::text(results));
    }

    let links = [
        ("[SOURCE CODE]", &project.github),
        ("[LIVE]", &project.link),
        ("[DOWNLOAD REPORT PDF]", &project.report_url),
        ("App Store", &project.app_store_url),
        ("Google Play", &project.play_store_url),
    ];
    let links: Vec<_> = links
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|url| (label, url)))
        .collect();
    if !links.is_empty() || !project.images.is_empty() {
        out = out.blank().with(|l| l.accent("EXTERNAL LINKS:"));
        for (label, url) in links {
            out = out.with(|l| l.plain("  ").plain(label).plain(" ").link(url));
        }
        if !project.images.is_empty() {
            out = out.with(|l| l.dim("  Available Figures:"));
            for image in &project.images {
                out = out.with(|l| {
                    l.plain(format!("    - {} ", image.caption))
                        .link(&image.src)
                });
            }
        }
    }
    out
}

pub fn contact(p: &Portfolio) -> Markup {
    Markup::new()
        .with(|l| l.plain("Email: ").link(format!("mailto:{}", p.contact.email)))
        .with(|l| l.plain("GitHub: ").link(p.contact.github_url()))
        .with(|l| l.plain("LinkedIn: ").link(p.contact.linkedin_url()))
}

pub fn fortune(text: &str) -> Markup {
    Markup::toned(Tone::Quote, format!("\"{text}\""))
}

pub fn art(text: &str) -> Markup {
    Markup::toned(Tone::Art, text.trim_matches('\n'))
}
