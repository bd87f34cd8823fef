// src/exec/template.rs

//! Command template with a changed-path placeholder.

use std::fmt;

use crate::errors::{Result, WhenChangedError};

/// Default placeholder substituted with the changed path.
pub const DEFAULT_PLACEHOLDER: &str = "$1";

/// A tokenised command line.
///
/// The first token is the program, the rest are arguments. Every occurrence of
/// the placeholder inside any token is replaced at render time, so
/// `--file=$1` works as well as a bare `$1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    tokens: Vec<String>,
    placeholder: String,
}

/// A rendered command ready to spawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

impl CommandTemplate {
    /// Build a template from command-line words.
    ///
    /// A single word is split on whitespace (`"make test $1"`); several words
    /// are taken verbatim so arguments containing spaces survive.
    pub fn parse<S: AsRef<str>>(words: &[S], placeholder: &str) -> Result<Self> {
        let tokens: Vec<String> = match words {
            [single] => single
                .as_ref()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            many => many.iter().map(|w| w.as_ref().to_string()).collect(),
        };

        if tokens.first().is_none_or(|program| program.trim().is_empty()) {
            return Err(WhenChangedError::InvalidCommand(
                "command must not be empty".to_string(),
            ));
        }

        Ok(Self {
            tokens,
            placeholder: placeholder.to_string(),
        })
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Substitute `changed` for the placeholder in every token.
    pub fn render(&self, changed: &str) -> Invocation {
        let mut rendered = self
            .tokens
            .iter()
            .map(|token| token.replace(&self.placeholder, changed));

        // `parse` guarantees at least one token.
        let program = rendered.next().unwrap_or_default();
        Invocation {
            program,
            args: rendered.collect(),
        }
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_is_split_on_whitespace() {
        let t = CommandTemplate::parse(&["make  test $1"], DEFAULT_PLACEHOLDER).unwrap();
        assert_eq!(t.tokens(), ["make", "test", "$1"]);
    }

    #[test]
    fn several_words_are_kept_verbatim() {
        let t = CommandTemplate::parse(&["echo", "hello world", "$1"], DEFAULT_PLACEHOLDER)
            .unwrap();
        let inv = t.render("/tmp/a.txt");
        assert_eq!(inv.program, "echo");
        assert_eq!(inv.args, vec!["hello world", "/tmp/a.txt"]);
    }

    #[test]
    fn placeholder_replaced_inside_tokens() {
        let t = CommandTemplate::parse(&["lint --file=$1 --quiet"], DEFAULT_PLACEHOLDER).unwrap();
        let inv = t.render("/src/main.rs");
        assert_eq!(inv.args, vec!["--file=/src/main.rs", "--quiet"]);
    }

    #[test]
    fn program_is_not_repeated_in_args() {
        let t = CommandTemplate::parse(&["cargo build"], DEFAULT_PLACEHOLDER).unwrap();
        let inv = t.render("x");
        assert_eq!(inv.program, "cargo");
        assert_eq!(inv.args, vec!["build"]);
        assert_eq!(inv.to_string(), "cargo build");
    }

    #[test]
    fn forced_run_substitutes_empty_path() {
        let t = CommandTemplate::parse(&["echo [$1]"], DEFAULT_PLACEHOLDER).unwrap();
        assert_eq!(t.render("").args, vec!["[]"]);
    }

    #[test]
    fn custom_placeholder() {
        let t = CommandTemplate::parse(&["cat {file} $1"], "{file}").unwrap();
        assert_eq!(t.render("a").args, vec!["a", "$1"]);
    }

    #[test]
    fn empty_command_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            CommandTemplate::parse(&empty, DEFAULT_PLACEHOLDER),
            Err(WhenChangedError::InvalidCommand(_))
        ));
        assert!(matches!(
            CommandTemplate::parse(&["   "], DEFAULT_PLACEHOLDER),
            Err(WhenChangedError::InvalidCommand(_))
        ));
    }
}
