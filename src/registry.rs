//! Command table and synonym resolution.
//!
//! The table is static: every command the interpreter can dispatch has an
//! entry here, which keeps the command surface enumerable for `help`,
//! autocomplete and tests.

use std::collections::{BTreeSet, HashMap};

/// Canonical command identities the interpreter dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandName {
    Help,
    About,
    Skills,
    Experience,
    Education,
    Awards,
    Volunteer,
    Interests,
    Projects,
    Project,
    Contact,
    Resume,
    Theme,
    Open,
    Matrix,
    Fortune,
    Clear,
    Exit,
    Sudo,
    Hello,
    Cat,
    Rm,
    Format,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub command: CommandName,
    pub name: &'static str,
    pub description: &'static str,
    pub synonyms: &'static [&'static str],
    /// Dispatchable, but left out of `help` and autocomplete.
    pub hidden: bool,
}

const fn spec(
    command: CommandName,
    name: &'static str,
    description: &'static str,
    synonyms: &'static [&'static str],
) -> CommandSpec {
    CommandSpec {
        command,
        name,
        description,
        synonyms,
        hidden: false,
    }
}

const fn hidden(command: CommandName, name: &'static str) -> CommandSpec {
    CommandSpec {
        command,
        name,
        description: "",
        synonyms: &[],
        hidden: true,
    }
}

pub const COMMANDS: &[CommandSpec] = &[
    spec(CommandName::Help, "help", "List available commands", &[]),
    spec(CommandName::About, "about", "Display information about me", &["whoami"]),
    spec(CommandName::Skills, "skills", "List technical skills", &[]),
    spec(CommandName::Experience, "experience", "Show work history", &[]),
    spec(CommandName::Education, "education", "Show education", &[]),
    spec(CommandName::Awards, "awards", "List awards and recognition", &[]),
    spec(CommandName::Volunteer, "volunteer", "Show volunteering", &[]),
    spec(CommandName::Interests, "interests", "Things I do for fun", &[]),
    spec(CommandName::Projects, "projects", "View project portfolio", &["ls", "list"]),
    spec(
        CommandName::Project,
        "project",
        "Shows details for a specific project",
        &["cd"],
    ),
    spec(CommandName::Contact, "contact", "Display contact information", &[]),
    spec(CommandName::Resume, "resume", "Download resume", &[]),
    spec(
        CommandName::Theme,
        "theme",
        "Change terminal theme (try \"theme list\")",
        &[],
    ),
    spec(
        CommandName::Open,
        "open",
        "Open a resource (e.g., github, linkedin)",
        &[],
    ),
    spec(CommandName::Matrix, "matrix", "Wake up, Neo...", &[]),
    spec(CommandName::Fortune, "fortune", "Print a random fortune", &[]),
    spec(CommandName::Clear, "clear", "Clear terminal screen", &["cls"]),
    spec(CommandName::Exit, "exit", "Close the session", &["quit", "logout"]),
    hidden(CommandName::Sudo, "sudo"),
    hidden(CommandName::Hello, "hello"),
    hidden(CommandName::Cat, "cat"),
    hidden(CommandName::Rm, "rm"),
    hidden(CommandName::Format, "format"),
];

/// Extra aliases beyond the ones declared on entries.
const EXTRA_SYNONYMS: &[(&str, &str)] = &[("hi", "hello")];

/// A tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// First token, lowercased.
    pub command: String,
    pub args: Vec<&'a str>,
}

/// Split trimmed input into a lowercased command token and raw arguments.
pub fn parse(input: &str) -> Option<Invocation<'_>> {
    let mut tokens = input.split_whitespace();
    let command = tokens.next()?.to_lowercase();
    Some(Invocation {
        command,
        args: tokens.collect(),
    })
}

#[derive(Debug, Clone)]
pub struct Registry {
    by_name: HashMap<&'static str, &'static CommandSpec>,
    /// synonym -> canonical name
    synonyms: HashMap<&'static str, &'static str>,
    completions: Vec<String>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        let by_name: HashMap<_, _> = COMMANDS.iter().map(|c| (c.name, c)).collect();

        let mut synonyms = HashMap::new();
        for entry in COMMANDS {
            for synonym in entry.synonyms {
                synonyms.insert(*synonym, entry.name);
            }
        }
        for (synonym, target) in EXTRA_SYNONYMS {
            synonyms.insert(*synonym, *target);
        }

        let mut completions = BTreeSet::new();
        for entry in COMMANDS.iter().filter(|c| !c.hidden) {
            completions.insert(entry.name.to_string());
            completions.extend(entry.synonyms.iter().map(|s| s.to_string()));
        }
        completions.extend(
            synonyms
                .iter()
                .filter(|(_, target)| by_name.get(*target).is_some_and(|c| !c.hidden))
                .map(|(synonym, _)| synonym.to_string()),
        );

        Self {
            by_name,
            synonyms,
            completions: completions.into_iter().collect(),
        }
    }

    /// Canonical name for `token`; identity when it is not a synonym.
    pub fn canonical<'a>(&self, token: &'a str) -> &'a str {
        match self.synonyms.get(token) {
            Some(canonical) => *canonical,
            None => token,
        }
    }

    pub fn resolve(&self, token: &str) -> Option<&'static CommandSpec> {
        self.by_name.get(self.canonical(token)).copied()
    }

    /// Entries shown by `help`, in table order.
    pub fn visible(&self) -> impl Iterator<Item = &'static CommandSpec> {
        COMMANDS.iter().filter(|c| !c.hidden)
    }

    /// Every completable name, deduplicated and sorted.
    pub fn completions(&self) -> &[String] {
        &self.completions
    }

    /// Completable names starting with `prefix` (compared lowercased).
    pub fn complete(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        self.completions
            .iter()
            .filter(|c| c.starts_with(&prefix))
            .cloned()
            .collect()
    }
}
