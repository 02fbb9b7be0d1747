use std::collections::HashSet;

use clap::{Arg, ArgAction, ArgMatches, Command};
use terminal_size::{terminal_size, Width};
use thiserror::Error;

use crate::api::InvalidCapture;
use crate::constant::*;
use crate::model::Requirement;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The program configuration was rejected at build time.
#[derive(Debug, Error)]
#[error("Config error: {0}")]
pub struct ConfigError(pub(crate) String);

/// The failure of a [`Program`](crate::Program) to produce its record.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The engine stopped the parse; its message has already been printed.
    /// Carries the exit status the engine prescribes (`0` for help/version).
    #[error("Parse error: exited with status {0}.")]
    Exit(i32),
    /// A matched token could not be converted.
    #[error(transparent)]
    Capture(#[from] InvalidCapture),
}

/// The grammar fragment of a single option, as handed to the engine.
#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionGrammar {
    name: String,
    short: Option<char>,
    description: String,
    placeholder: Option<String>,
    requirement: Requirement,
}

impl OptionGrammar {
    pub(crate) fn new(
        name: String,
        short: Option<char>,
        description: String,
        placeholder: Option<String>,
        requirement: Requirement,
    ) -> Self {
        Self {
            name,
            short,
            description,
            placeholder,
            requirement,
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub(crate) fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// The textual flag spelling, for example `-n, --num <arg>`.
    #[cfg_attr(not(any(test, feature = "tracing_debug")), allow(dead_code))]
    pub(crate) fn flags(&self) -> String {
        let short = match &self.short {
            Some(s) => format!("-{s}, "),
            None => "".to_string(),
        };
        let placeholder = match &self.placeholder {
            Some(p) => format!(" <{p}>"),
            None => "".to_string(),
        };

        format!("{short}--{n}{placeholder}", n = self.name)
    }

    fn help(&self) -> String {
        match &self.requirement {
            Requirement::Defaulted(label) if self.description.is_empty() => {
                format!("(default: {label})")
            }
            Requirement::Defaulted(label) => format!("{} (default: {label})", self.description),
            _ => self.description.clone(),
        }
    }
}

impl From<&OptionGrammar> for Arg {
    fn from(value: &OptionGrammar) -> Self {
        let mut arg = Arg::new(value.name.clone())
            .long(value.name.clone())
            .help(value.help());

        if let Some(short) = value.short {
            arg = arg.short(short);
        }

        match &value.placeholder {
            None => arg.action(ArgAction::SetTrue),
            Some(placeholder) => arg
                .action(ArgAction::Set)
                .value_name(placeholder.clone())
                .required(value.requirement.is_required())
                .allow_negative_numbers(true),
        }
    }
}

/// The grammar fragment of the variadic capture.
#[doc(hidden)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariadicGrammar {
    name: String,
    required: bool,
}

impl VariadicGrammar {
    pub(crate) fn new(name: String, required: bool) -> Self {
        Self { name, required }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn usage(&self) -> String {
        if self.required {
            format!("<{}>...", self.name)
        } else {
            format!("[{}]...", self.name)
        }
    }
}

impl From<&VariadicGrammar> for Arg {
    fn from(value: &VariadicGrammar) -> Self {
        Arg::new(value.name.clone())
            .value_name(value.name.clone())
            .action(ArgAction::Append)
            .num_args(1..)
    }
}

/// The engine's view of one invocation: per-option captures, plus the leftover positional tokens.
#[doc(hidden)]
#[derive(Debug)]
pub struct RawMatches {
    matches: ArgMatches,
}

impl RawMatches {
    /// Whether the flag `name` was present.
    pub(crate) fn present(&self, name: &str) -> bool {
        self.matches.get_flag(name)
    }

    /// The raw token captured for the option `name`, if any was supplied.
    pub(crate) fn raw(&self, name: &str) -> Option<&str> {
        self.matches.get_one::<String>(name).map(String::as_str)
    }

    /// The positional tokens captured under `name`, in encounter order.
    pub(crate) fn leftovers(&self, name: &str) -> Vec<String> {
        self.matches
            .get_many::<String>(name)
            .map(|values| values.cloned().collect())
            .unwrap_or_default()
    }
}

/// The compiled grammar; built once, then only read.
#[derive(Debug, Clone)]
pub(crate) struct Grammar {
    program: String,
    command: Command,
}

impl Grammar {
    /// Compile against the current terminal's width.
    pub(crate) fn terminal(
        program: &str,
        version: &str,
        about: Option<&str>,
        options: &[OptionGrammar],
        variadic: Option<&VariadicGrammar>,
    ) -> Result<Self, ConfigError> {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::compile(program, version, about, options, variadic, terminal_width)
    }

    pub(crate) fn compile(
        program: &str,
        version: &str,
        about: Option<&str>,
        options: &[OptionGrammar],
        variadic: Option<&VariadicGrammar>,
        terminal_width: Option<usize>,
    ) -> Result<Self, ConfigError> {
        validate(options, variadic)?;
        let usage = match variadic {
            Some(v) => format!("{program} {OPTIONS_USAGE} {}", v.usage()),
            None => format!("{program} {OPTIONS_USAGE}"),
        };
        let mut command = Command::new(program.to_string())
            .version(version.to_string())
            .override_usage(usage)
            .args_override_self(true);

        if let Some(about) = about {
            command = command.about(about.to_string());
        }

        if let Some(width) = terminal_width {
            command = command.term_width(width);
        }

        for option in options {
            command = command.arg(Arg::from(option));
        }

        if let Some(variadic) = variadic {
            command = command.arg(Arg::from(variadic));
        }

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Compiled grammar for '{program}': {:?}.",
                options.iter().map(OptionGrammar::flags).collect::<Vec<_>>()
            );
        }

        Ok(Self {
            program: program.to_string(),
            command,
        })
    }

    /// Hand the tokens (excluding the program name) to the engine.
    pub(crate) fn tokenize(&self, tokens: &[&str]) -> Result<RawMatches, clap::Error> {
        let argv = std::iter::once(self.program.as_str()).chain(tokens.iter().copied());
        self.command
            .clone()
            .try_get_matches_from(argv)
            .map(|matches| RawMatches { matches })
    }

    pub(crate) fn render_help(&self) -> String {
        self.command.clone().render_help().to_string()
    }
}

fn validate(options: &[OptionGrammar], variadic: Option<&VariadicGrammar>) -> Result<(), ConfigError> {
    let mut names: HashSet<&str> = HashSet::from([HELP_NAME, VERSION_NAME]);
    let mut shorts: HashSet<char> = HashSet::from([HELP_SHORT, VERSION_SHORT]);
    let all_names = options
        .iter()
        .map(OptionGrammar::name)
        .chain(variadic.map(VariadicGrammar::name));

    for name in all_names {
        if name.is_empty() {
            return Err(ConfigError("option name cannot be empty.".to_string()));
        }

        if name.starts_with('-') {
            return Err(ConfigError(format!(
                "option '{name}' cannot start with '-'."
            )));
        }

        if !names.insert(name) {
            return Err(ConfigError(format!(
                "option '{name}' is repeated or reserved."
            )));
        }
    }

    for option in options {
        if let Some(short) = option.short {
            if !short.is_alphanumeric() {
                return Err(ConfigError(format!(
                    "option '{}' has invalid short name '{short}'.",
                    option.name
                )));
            }

            if !shorts.insert(short) {
                return Err(ConfigError(format!(
                    "option '{}' has repeated or reserved short name '-{short}'.",
                    option.name
                )));
            }
        }
    }

    Ok(())
}
