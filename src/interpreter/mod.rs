//! Command interpreter: one raw input line in, one `CommandResponse` out.
//!
//! The interpreter never fails. Every problem becomes a response whose
//! kind is `error` (or `system` for blocked sabotage) and whose output
//! explains what went wrong. Randomness is passed in by the caller so a
//! seeded generator gives reproducible fortunes.

pub mod destructive;
pub mod render;

use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::error::{CommandError, Missing};
use crate::markup::Markup;
use crate::opener::Opener;
use crate::portfolio::Portfolio;
use crate::registry::{self, CommandName, Registry};
use crate::terminal::{Body, LineKind, ResumeState};
use crate::{flog_debug, flog_warn};

use destructive::Destruction;

/// One-shot instruction for the session controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Clear,
    SetTheme(String),
    ConfirmDestruction,
    TriggerMeltdown,
    TriggerMatrixAnimation,
    ExitSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResponse {
    pub output: Option<Body>,
    /// Overrides the default `output` classification.
    pub kind: Option<LineKind>,
    pub action: Option<Action>,
}

impl CommandResponse {
    pub fn output(body: impl Into<Body>) -> Self {
        Self {
            output: Some(body.into()),
            ..Self::default()
        }
    }

    pub fn action(action: Action) -> Self {
        Self {
            action: Some(action),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: LineKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Classification of the output line.
    pub fn line_kind(&self) -> LineKind {
        self.kind.unwrap_or(LineKind::Output)
    }

    pub fn is_error(&self) -> bool {
        self.kind == Some(LineKind::Error)
    }
}

impl From<CommandError> for CommandResponse {
    fn from(err: CommandError) -> Self {
        CommandResponse::output(err.to_string()).with_kind(err.kind())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpretOptions {
    /// Set for the rest of the session once a meltdown has been recovered.
    pub sabotage_proof: bool,
}

type Outcome = std::result::Result<CommandResponse, CommandError>;

pub struct Interpreter {
    portfolio: Arc<Portfolio>,
    registry: Registry,
    opener: Arc<dyn Opener>,
}

impl Interpreter {
    pub fn new(portfolio: Arc<Portfolio>, opener: Arc<dyn Opener>) -> Self {
        Self {
            portfolio,
            registry: Registry::new(),
            opener,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn portfolio(&self) -> &Arc<Portfolio> {
        &self.portfolio
    }

    pub fn interpret<R: Rng + ?Sized>(
        &self,
        raw: &str,
        options: InterpretOptions,
        rng: &mut R,
    ) -> CommandResponse {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CommandResponse::default().with_kind(LineKind::Input);
        }
        flog_debug!(
            "interpret input={:?} sabotage_proof={}",
            trimmed,
            options.sabotage_proof
        );
        self.dispatch(trimmed, options, rng)
            .unwrap_or_else(CommandResponse::from)
    }

    fn dispatch<R: Rng + ?Sized>(
        &self,
        input: &str,
        options: InterpretOptions,
        rng: &mut R,
    ) -> Outcome {
        if destructive::is_fork_bomb(input) {
            return destroy(Destruction::ForkBomb, options);
        }

        let Some(invocation) = registry::parse(input) else {
            return Ok(CommandResponse::default().with_kind(LineKind::Input));
        };
        let Some(entry) = self.registry.resolve(&invocation.command) else {
            return Err(CommandError::UnknownCommand(invocation.command));
        };
        let args = invocation.args.as_slice();
        let p = self.portfolio.as_ref();

        match entry.command {
            CommandName::Help => Ok(CommandResponse::output(render::help(&self.registry))),
            CommandName::About => Ok(CommandResponse::output(render::about(p))),
            CommandName::Skills => Ok(CommandResponse::output(render::skills(p))),
            CommandName::Experience => Ok(CommandResponse::output(render::experience(p))),
            CommandName::Education => Ok(CommandResponse::output(render::education(p))),
            CommandName::Awards => Ok(CommandResponse::output(render::awards(p))),
            CommandName::Volunteer => Ok(CommandResponse::output(render::volunteer(p))),
            CommandName::Interests => Ok(CommandResponse::output(render::interests(p))),
            CommandName::Contact => Ok(CommandResponse::output(render::contact(p))),
            CommandName::Projects => Ok(CommandResponse::output(render::projects(p))),
            CommandName::Project => self.project(args),
            CommandName::Resume => Ok(CommandResponse::output(Body::Resume(ResumeState::Loading))),
            CommandName::Open => self.open(args),
            CommandName::Clear => Ok(CommandResponse::action(Action::Clear)),
            CommandName::Theme => self.theme(args),
            CommandName::Matrix => Ok(CommandResponse::output("Entering the Matrix...")
                .with_action(Action::TriggerMatrixAnimation)),
            CommandName::Fortune => Ok(self.fortune(rng)),
            CommandName::Exit => Ok(CommandResponse::output("Terminating session... Goodbye.")
                .with_action(Action::ExitSession)),
            CommandName::Sudo => sudo(args, options),
            CommandName::Hello => Ok(CommandResponse::output(render::art(render::ASCII_HELLO))),
            CommandName::Cat => cat(args),
            CommandName::Rm => {
                if destructive::is_rm_wipe(args) {
                    destroy(Destruction::Rm, options)
                } else {
                    Ok(CommandResponse::output(
                        "usage: rm [-rf] <path> (Be careful what you wish for...)",
                    ))
                }
            }
            CommandName::Format => {
                if destructive::is_format_wipe(args) {
                    destroy(Destruction::Format, options)
                } else {
                    Err(CommandError::Usage("format: missing operand or drive"))
                }
            }
        }
    }

    fn project(&self, args: &[&str]) -> Outcome {
        let Some(id) = args.first() else {
            return Err(CommandError::Usage(
                "Usage: project <id>. Type 'projects' to see list.",
            ));
        };
        let project = self
            .portfolio
            .project(id)
            .ok_or_else(|| Missing::Project(id.to_string()))?;
        Ok(CommandResponse::output(render::project(project)))
    }

    fn open(&self, args: &[&str]) -> Outcome {
        let Some(resource) = args.first() else {
            return Err(CommandError::Usage(
                "Usage: open <resource>. Available: 'github', 'linkedin'",
            ));
        };
        let contact = &self.portfolio.contact;
        let (label, url) = match resource.to_lowercase().as_str() {
            "github" => ("GitHub", contact.github_url()),
            "linkedin" => ("LinkedIn", contact.linkedin_url()),
            _ => return Err(Missing::Resource(resource.to_string()).into()),
        };

        let mut out = Markup::new().with(|l| l.plain(format!("Opening {label}: ")).link(&url));
        if let Err(e) = self.opener.open(&url) {
            flog_warn!("open {} failed: {}", url, e);
            out = out.with(|l| l.dim("Could not launch a browser; copy the link above."));
        }
        Ok(CommandResponse::output(out))
    }

    fn theme(&self, args: &[&str]) -> Outcome {
        let themes = &self.portfolio.themes;
        match args.first().map(|s| s.to_lowercase()).as_deref() {
            Some("list") => Ok(CommandResponse::output(format!(
                "Available themes: {}",
                themes.join(", ")
            ))),
            Some("set") => {
                let Some(name) = args.get(1) else {
                    return Err(CommandError::Usage("Usage: theme set <name>"));
                };
                if !self.portfolio.has_theme(name) {
                    return Err(Missing::Theme {
                        name: name.to_string(),
                        available: themes.join(", "),
                    }
                    .into());
                }
                Ok(CommandResponse::output(format!("Theme set to: {name}"))
                    .with_action(Action::SetTheme(name.to_string())))
            }
            _ => Err(CommandError::Usage(
                "Usage: 'theme list' or 'theme set <name>'",
            )),
        }
    }

    fn fortune<R: Rng + ?Sized>(&self, rng: &mut R) -> CommandResponse {
        let text = self
            .portfolio
            .fortunes
            .choose(rng)
            .map(String::as_str)
            .unwrap_or("The future is unclear.");
        CommandResponse::output(render::fortune(text))
    }
}

fn destroy(kind: Destruction, options: InterpretOptions) -> Outcome {
    if options.sabotage_proof {
        return Err(CommandError::SabotageBlocked);
    }
    let action = if kind.needs_confirmation() {
        Action::ConfirmDestruction
    } else {
        Action::TriggerMeltdown
    };
    Ok(CommandResponse::output(kind.warning())
        .with_kind(LineKind::Error)
        .with_action(action))
}

fn sudo(args: &[&str], options: InterpretOptions) -> Outcome {
    match args.split_first() {
        Some((first, rest))
            if first.eq_ignore_ascii_case("rm")
                && rest.iter().any(|a| destructive::is_recursive_force_flag(a)) =>
        {
            destroy(Destruction::SudoRm, options)
        }
        _ => Err(CommandError::PermissionDenied),
    }
}

fn cat(args: &[&str]) -> Outcome {
    match args.first() {
        None | Some(&"cat.jpg") => Ok(CommandResponse::output(render::art(render::ASCII_CAT))),
        Some(file) => Err(Missing::File(file.to_string()).into()),
    }
}
