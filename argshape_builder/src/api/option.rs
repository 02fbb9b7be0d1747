use std::str::FromStr;

use crate::api::capture::*;
use crate::api::field::*;
use crate::constant::DEFAULT_ARG_NAME;
use crate::model::Requirement;
use crate::parser::{OptionGrammar, VariadicGrammar};

/// Behaviour to declare an option on a [`ProgramBuilder`](crate::ProgramBuilder).
///
/// A declaration splits into its untyped grammar fragment (handed to the engine) and its typed field
/// (which resolves the record value).
pub trait Declare {
    /// The typed field this declaration adds to the record.
    type Field: Field;

    /// Split the declaration into its grammar fragment and field.
    #[doc(hidden)]
    fn declare(self) -> (OptionGrammar, Self::Field);
}

/// A boolean option, triggered by presence (`--NAME`).
///
/// A flag takes no converter and no argument name; its record field is a `bool`.
///
/// ### Example
/// ```
/// # use argshape_builder as argshape;
/// use argshape::{Flag, ProgramBuilder};
///
/// let program = ProgramBuilder::create("program", "1.0.0")
///     .option(Flag::new("verbose", "Print more.").short('v'))
///     .build();
///
/// let ((), verbose) = program.parse(&["-v"]).unwrap();
/// assert!(verbose);
/// ```
#[derive(Debug, Clone)]
pub struct Flag {
    name: String,
    short: Option<char>,
    description: String,
    default: bool,
}

impl Flag {
    /// Create a flag, defaulting to `false`.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: None,
            description: description.into(),
            default: false,
        }
    }

    /// Specify the single character alias (`-N`).
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Specify the value used when the flag is not present.
    pub fn default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }
}

impl Declare for Flag {
    type Field = FlagField;

    fn declare(self) -> (OptionGrammar, Self::Field) {
        let Flag {
            name,
            short,
            description,
            default,
        } = self;
        let grammar = OptionGrammar::new(
            name.clone(),
            short,
            description,
            None,
            Requirement::Defaulted(default.to_string()),
        );
        (grammar, FlagField::new(name, default))
    }
}

/// An option that takes a single value (`--NAME VALUE` or `--NAME=VALUE`).
///
/// The value is converted by the declared converter.
/// The record field type depends on the defaulting outcome `D`:
/// * [`Absent`] (the initial state): `Option<T>`.
/// * [`Defaulted`] via [`ValueOption::default`]: `T`.
/// * [`Required`] via [`ValueOption::required`]: `T`.
///
/// Only an `Absent` value option may move to another outcome, so an option can never be both required and defaulted.
///
/// ### Example
/// ```
/// # use argshape_builder as argshape;
/// use argshape::{ProgramBuilder, ValueOption};
///
/// let program = ProgramBuilder::create("program", "1.0.0")
///     .option(ValueOption::parsed("port", "The port to bind.").default(8080u16))
///     .option(ValueOption::<String>::parsed("host", "The host to bind."))
///     .build();
///
/// let (((), port), host) = program.parse(&["--port=9000"]).unwrap();
/// assert_eq!(port, 9000);
/// assert_eq!(host, None);
/// ```
pub struct ValueOption<T, D = Absent> {
    name: String,
    short: Option<char>,
    description: String,
    arg_name: Option<String>,
    converter: Converter<T>,
    defaulting: D,
}

impl<T: 'static> ValueOption<T, Absent> {
    /// Create a value option with an explicit converter.
    pub fn new<E>(
        name: impl Into<String>,
        description: impl Into<String>,
        convert: impl Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    ) -> Self
    where
        E: Into<BoxError> + 'static,
    {
        Self {
            name: name.into(),
            short: None,
            description: description.into(),
            arg_name: None,
            converter: converter(convert),
            defaulting: Absent,
        }
    }

    /// Create a value option converted via [`std::str::FromStr`].
    pub fn parsed(name: impl Into<String>, description: impl Into<String>) -> Self
    where
        T: FromStr,
        <T as FromStr>::Err: Into<BoxError> + 'static,
    {
        Self::new(name, description, |token: &str| T::from_str(token))
    }

    /// Specify the value used when the option is not given.
    pub fn default(self, value: T) -> ValueOption<T, Defaulted<T>>
    where
        T: Clone + std::fmt::Debug,
    {
        self.settle_with(Defaulted::new(value))
    }

    /// Require the option; the engine rejects invocations that omit it.
    pub fn required(self) -> ValueOption<T, Required> {
        self.settle_with(Required)
    }

    fn settle_with<D>(self, defaulting: D) -> ValueOption<T, D> {
        let ValueOption {
            name,
            short,
            description,
            arg_name,
            converter,
            ..
        } = self;
        ValueOption {
            name,
            short,
            description,
            arg_name,
            converter,
            defaulting,
        }
    }
}

impl<T, D> ValueOption<T, D> {
    /// Specify the single character alias (`-N`).
    pub fn short(mut self, short: char) -> Self {
        self.short.replace(short);
        self
    }

    /// Specify the value placeholder shown in usage and help (defaults to `arg`).
    pub fn arg_name(mut self, arg_name: impl Into<String>) -> Self {
        self.arg_name.replace(arg_name.into());
        self
    }
}

impl<T, D> std::fmt::Debug for ValueOption<T, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueOption")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("type", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T, D> Declare for ValueOption<T, D>
where
    D: Defaulting<T>,
{
    type Field = ValueField<T, D>;

    fn declare(self) -> (OptionGrammar, Self::Field) {
        let ValueOption {
            name,
            short,
            description,
            arg_name,
            converter,
            defaulting,
        } = self;
        let grammar = OptionGrammar::new(
            name.clone(),
            short,
            description,
            Some(arg_name.unwrap_or_else(|| DEFAULT_ARG_NAME.to_string())),
            defaulting.requirement(),
        );
        (grammar, ValueField::new(name, converter, defaulting))
    }
}

/// The catch-all positional capture; its record field is a `Vec<String>` of the leftover tokens in order.
///
/// At most one may be declared, see [`ProgramBuilder::variadic`](crate::ProgramBuilder::variadic).
#[derive(Debug, Clone)]
pub struct Variadic {
    name: String,
    required: bool,
}

impl Variadic {
    /// Create an optional variadic capture.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }

    /// Show the capture as expected in the usage (`<name>...` rather than `[name]...`).
    ///
    /// This only affects the usage text; an empty capture is still accepted.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub(crate) fn declare(self) -> (VariadicGrammar, VariadicField) {
        let Variadic { name, required } = self;
        (
            VariadicGrammar::new(name.clone(), required),
            VariadicField::new(name),
        )
    }
}
