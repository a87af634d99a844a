//! Recognition of the commands that start the meltdown.
//!
//! Matching is token-set based and order independent: `rm` needs one
//! combined recursive+force flag token (`-rf`, `-fr`, `-Rf`, ...) and one
//! target token of `/`, `/*` or `*` anywhere among its arguments.
//! `sudo rm` only needs the flag.

const FORK_BOMB: &str = ":(){:|:&};:";
const WIPE_TARGETS: &[&str] = &["/", "/*", "*"];

/// Which destructive pattern was typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destruction {
    ForkBomb,
    Rm,
    SudoRm,
    Format,
}

impl Destruction {
    /// Text shown when the pattern is accepted (prompt or alarm).
    pub fn warning(&self) -> &'static str {
        match self {
            Destruction::ForkBomb => "Fork bomb detected. System resources critical.",
            Destruction::Rm => {
                "Warning: You are about to delete critical system files. This action is irreversible. Proceed? [y/N]"
            }
            Destruction::SudoRm => {
                "Nice try, but even root needs to confirm this. Proceed with destruction? [y/N]"
            }
            Destruction::Format => {
                "Warning: Formatting drive C: will destroy the universe. Proceed? [y/N]"
            }
        }
    }

    /// The fork bomb escalates at once; the rest ask first.
    pub fn needs_confirmation(&self) -> bool {
        !matches!(self, Destruction::ForkBomb)
    }
}

/// `:(){ :|:& };:` with any whitespace layout.
pub fn is_fork_bomb(input: &str) -> bool {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    compact == FORK_BOMB
}

pub(crate) fn is_recursive_force_flag(token: &str) -> bool {
    let Some(letters) = token.strip_prefix('-') else {
        return false;
    };
    if letters.is_empty() || !letters.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    letters.contains(['r', 'R']) && letters.contains('f')
}

/// Arguments of `rm` that wipe the system.
pub fn is_rm_wipe(args: &[&str]) -> bool {
    let has_flag = args.iter().any(|a| is_recursive_force_flag(a));
    let has_target = args.iter().any(|a| WIPE_TARGETS.contains(a));
    has_flag && has_target
}

/// Arguments of `format` that target drive C.
pub fn is_format_wipe(args: &[&str]) -> bool {
    args.first()
        .is_some_and(|drive| drive.to_lowercase().starts_with('c'))
}
