use std::env;

use crate::api::{FieldSet, InvalidCapture};
use crate::parser::base::*;
use crate::parser::interface::UserInterface;
use crate::prelude::Record;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// The configured program.
/// Built via [`ProgramBuilder::build`](crate::ProgramBuilder::build).
///
/// The record shape `F::Output` mirrors the declarations made on the builder.
pub struct Program<F> {
    keys: Vec<String>,
    grammar: Grammar,
    fields: F,
    user_interface: Box<dyn UserInterface>,
}

impl<F> std::fmt::Debug for Program<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Program")
            .field("keys", &self.keys)
            .field("grammar", &self.grammar)
            .finish()
    }
}

impl<F> Program<F> {
    pub(crate) fn new(
        keys: Vec<String>,
        grammar: Grammar,
        fields: F,
        user_interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            keys,
            grammar,
            fields,
            user_interface,
        }
    }

    /// The record keys, in declaration order.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Render the help message.
    pub fn render_help(&self) -> String {
        self.grammar.render_help()
    }

    /// Check that the record `R` names precisely this program's keys, in order.
    ///
    /// Its field types are already checked at compile time by [`Program::parse_record`].
    pub fn ensure_record<R: Record>(&self) -> Result<(), ConfigError> {
        if R::KEYS.iter().copied().eq(self.keys.iter().map(String::as_str)) {
            Ok(())
        } else {
            Err(ConfigError(format!(
                "record {} names {:?}, but the program declares {:?}.",
                std::any::type_name::<R>(),
                R::KEYS,
                self.keys
            )))
        }
    }

    fn report(&self, error: clap::Error) -> i32 {
        let message = error.render().to_string().trim_end().to_string();

        if error.use_stderr() {
            self.user_interface.print_error(message);
        } else {
            self.user_interface.print(message);
        }

        error.exit_code()
    }
}

impl<F: FieldSet> Program<F> {
    /// Run the program against the input tokens (excluding the program name), returning any failure.
    ///
    /// Parsing happens in two phases:
    /// 1. Tokenizing, delegated to the engine.
    /// If the engine stops (ex: missing required option, unknown flag, help or version requested), its message is printed and `Err(ParseError::Exit(status))` is returned.
    /// 2. Translating, which settles each declared field in order: the converted token when supplied, otherwise the declared default.
    /// A converter failure is returned as `Err(ParseError::Capture(..))`.
    pub fn try_parse(&self, tokens: &[&str]) -> Result<F::Output, ParseError> {
        #[cfg(feature = "tracing_debug")]
        {
            debug!("Tokenizing {} tokens.", tokens.len());
        }

        let matches = match self.grammar.tokenize(tokens) {
            Ok(matches) => matches,
            Err(error) => return Err(ParseError::Exit(self.report(error))),
        };

        let output = self.fields.resolve_all(&matches)?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Resolved keys: {:?}.", self.keys);
        }

        Ok(output)
    }

    /// Run the program against the input tokens (excluding the program name).
    ///
    /// Behaves as [`Program::try_parse`], except when the engine stops the parse: then the process exits with the engine's status (via [`std::process::exit`]).
    /// Converter failures are returned to the caller.
    ///
    /// ### Example
    /// ```
    /// # use argshape_builder as argshape;
    /// use argshape::{ProgramBuilder, ValueOption};
    ///
    /// let program = ProgramBuilder::create("program", "1.0.0")
    ///     .option(ValueOption::<u8>::parsed("level", "The level."))
    ///     .build();
    ///
    /// let error = program.parse(&["--level", "300"]).unwrap_err();
    /// assert_eq!(
    ///     error.to_string(),
    ///     "cannot convert '300' for option '--level': number too large to fit in target type"
    /// );
    /// ```
    pub fn parse(&self, tokens: &[&str]) -> Result<F::Output, InvalidCapture> {
        match self.try_parse(tokens) {
            Ok(output) => Ok(output),
            Err(ParseError::Capture(error)) => Err(error),
            Err(ParseError::Exit(status)) => std::process::exit(status),
        }
    }

    /// Run the program against the Cli [`env::args`].
    ///
    /// See [`Program::parse`].
    pub fn parse_env(&self) -> Result<F::Output, InvalidCapture> {
        let command_input: Vec<String> = env::args().skip(1).collect();
        self.parse(
            command_input
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .as_slice(),
        )
    }

    /// Run the program (see [`Program::parse`]), assembling the flat record `R`.
    pub fn parse_record<R>(&self, tokens: &[&str]) -> Result<R, InvalidCapture>
    where
        R: Record<Fields = F::Output>,
    {
        self.parse(tokens).map(R::from_fields)
    }
}
