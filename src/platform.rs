//! AireOS WLC command-line grammar.
//!
//! The controller CLI authenticates in-band after the SSH session opens:
//! it prints `User:` and `Password:` prompts on the shell channel and, once
//! authenticated, settles at the `(Cisco Controller) >` prompt.
//!
//! # Prompt Examples
//!
//! ```text
//! User:
//! Password:
//! (Cisco Controller) >
//! (Cisco Controller) >show flexconnect group summary
//! ```

use regex::bytes::Regex;

/// CLI grammar for one controller family: login markers, the authenticated
/// prompt, and the fixed command sequence.
#[derive(Debug, Clone)]
pub struct CliGrammar {
    /// Grammar name, for logs.
    pub name: &'static str,

    /// Literal marker that requests the username.
    pub username_prompt: &'static str,

    /// Literal marker that requests the password.
    pub password_prompt: &'static str,

    /// Authenticated-prompt pattern; matching it signals command completion.
    pub prompt: Regex,

    /// Commands run once after login, before collection.
    pub on_open_commands: &'static [&'static str],

    /// Commands whose output feeds the table parser.
    pub collect_commands: &'static [&'static str],

    /// Final command; the remote side is expected to close after it.
    pub close_command: &'static str,
}

/// Create the AireOS WLC grammar.
pub fn aireos() -> CliGrammar {
    CliGrammar {
        name: "cisco_aireos",
        username_prompt: "User:",
        password_prompt: "Password:",
        prompt: Regex::new(r"\(Cisco Controller\)\s*>").unwrap(),
        on_open_commands: &["config paging disable"],
        collect_commands: &["show flexconnect group summary"],
        close_command: "logout",
    }
}
