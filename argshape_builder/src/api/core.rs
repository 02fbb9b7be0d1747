use std::marker::PhantomData;

use crate::api::{Declare, FieldSet, Variadic, VariadicField};
use crate::parser::{
    ConfigError, ConsoleInterface, Grammar, OptionGrammar, Program, UserInterface,
    VariadicGrammar,
};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// Marks a [`ProgramBuilder`] that has not declared a variadic capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariadic;

/// Marks a [`ProgramBuilder`] that has declared its variadic capture.
#[derive(Debug, Clone, Copy, Default)]
pub struct WithVariadic;

/// The program builder (aka: accumulator of option declarations).
///
/// Each declaration consumes the builder and returns one whose record shape `F` is extended by the declared field.
/// The record shape is a chain of nested pairs in declaration order, so the built [`Program`] parses into exactly the declared types.
/// The variadic state `V` tracks (at compile time) whether [`ProgramBuilder::variadic`] has been used.
///
/// ### Example
/// ```
/// # use argshape_builder as argshape;
/// use argshape::{Flag, ProgramBuilder, ValueOption, Variadic};
///
/// let program = ProgramBuilder::create("my-app", "1.0.0")
///     .option(Flag::new("bool", "this is a boolean"))
///     .option(ValueOption::<i64>::parsed("num", "this is a number"))
///     .variadic(Variadic::new("positional").required())
///     .build();
///
/// let ((((), bool), num), positional) = program
///     .parse(&["--num=10", "positional", "--bool", "argument"])
///     .unwrap();
///
/// assert!(bool);
/// assert_eq!(num, Some(10));
/// assert_eq!(positional, vec!["positional", "argument"]);
/// ```
#[derive(Debug, Clone)]
pub struct ProgramBuilder<F = (), V = NoVariadic> {
    program: String,
    version: String,
    about: Option<String>,
    options: Vec<OptionGrammar>,
    variadic: Option<VariadicGrammar>,
    keys: Vec<String>,
    fields: F,
    _variadic: PhantomData<V>,
}

impl ProgramBuilder<(), NoVariadic> {
    /// Create an empty program builder.
    ///
    /// ### Example
    /// ```
    /// # use argshape_builder as argshape;
    /// use argshape::ProgramBuilder;
    ///
    /// let program = ProgramBuilder::create("program", "1.0.0")
    ///     .build();
    ///
    /// program.parse(&[]).unwrap();
    /// ```
    pub fn create(program: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            version: version.into(),
            about: None,
            options: Vec::default(),
            variadic: None,
            keys: Vec::default(),
            fields: (),
            _variadic: PhantomData,
        }
    }

    /// *Available using 'unit_test' crate feature only.*</br></br>
    /// Create a [`ProgramBuilder`] for use in testing.
    ///
    /// ### Example
    /// ```
    /// # use argshape_builder as argshape;
    /// use argshape::{Declare, Flag, ProgramBuilder};
    ///
    /// // Function under test.
    /// // We want to make sure the declaration is wired up correctly.
    /// pub fn verbosity() -> impl Declare {
    ///     Flag::new("verbose", "Print more.").short('v')
    /// }
    ///
    /// let program = ProgramBuilder::test_dummy().option(verbosity()).build_parser().unwrap();
    /// assert_eq!(program.keys(), &["verbose".to_string()]);
    /// ```
    #[cfg(feature = "unit_test")]
    pub fn test_dummy() -> Self {
        Self::create("test-dummy", "0.0.0")
    }
}

impl<F, V> ProgramBuilder<F, V> {
    /// Document the about message for this program.
    /// If repeated, only the final message will apply.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Declare an option ([`Flag`](crate::Flag) or [`ValueOption`](crate::ValueOption)).
    ///
    /// The declared name becomes the next key of the record.
    /// The order of options does not affect the command line semantics.
    ///
    /// ### Example
    /// ```
    /// # use argshape_builder as argshape;
    /// use argshape::{Flag, ProgramBuilder, ValueOption};
    ///
    /// let program = ProgramBuilder::create("program", "1.0.0")
    ///     .option(Flag::new("dry-run", "Only print the plan."))
    ///     .option(ValueOption::<u32>::parsed("jobs", "Worker count.").short('j').default(4))
    ///     .build();
    ///
    /// let (((), dry_run), jobs) = program.parse(&["-j", "8"]).unwrap();
    ///
    /// assert!(!dry_run);
    /// assert_eq!(jobs, 8);
    /// ```
    pub fn option<O: Declare>(self, option: O) -> ProgramBuilder<(F, O::Field), V> {
        let (grammar, field) = option.declare();
        let ProgramBuilder {
            program,
            version,
            about,
            mut options,
            variadic,
            mut keys,
            fields,
            _variadic,
        } = self;
        keys.push(grammar.name().to_string());
        options.push(grammar);

        ProgramBuilder {
            program,
            version,
            about,
            options,
            variadic,
            keys,
            fields: (fields, field),
            _variadic,
        }
    }
}

impl<F> ProgramBuilder<F, NoVariadic> {
    /// Declare the variadic capture: every positional token, in order.
    ///
    /// Only available once; the returned builder no longer offers `variadic`.
    ///
    /// ### Example
    /// ```
    /// # use argshape_builder as argshape;
    /// use argshape::{ProgramBuilder, Variadic};
    ///
    /// let program = ProgramBuilder::create("program", "1.0.0")
    ///     .variadic(Variadic::new("files"))
    ///     .build();
    ///
    /// let ((), files) = program.parse(&["a.txt", "b.txt"]).unwrap();
    /// assert_eq!(files, vec!["a.txt", "b.txt"]);
    /// ```
    ///
    /// ```compile_fail
    /// # use argshape_builder as argshape;
    /// use argshape::{ProgramBuilder, Variadic};
    ///
    /// ProgramBuilder::create("program", "1.0.0")
    ///     .variadic(Variadic::new("a"))
    ///     .variadic(Variadic::new("b"));
    /// ```
    pub fn variadic(
        self,
        variadic: Variadic,
    ) -> ProgramBuilder<(F, VariadicField), WithVariadic> {
        let (grammar, field) = variadic.declare();
        let ProgramBuilder {
            program,
            version,
            about,
            options,
            mut keys,
            fields,
            ..
        } = self;
        keys.push(grammar.name().to_string());

        ProgramBuilder {
            program,
            version,
            about,
            options,
            variadic: Some(grammar),
            keys,
            fields: (fields, field),
            _variadic: PhantomData,
        }
    }
}

impl<F: FieldSet, V> ProgramBuilder<F, V> {
    fn build_with_interface(
        self,
        user_interface: Box<dyn UserInterface>,
    ) -> Result<Program<F>, ConfigError> {
        let grammar = Grammar::terminal(
            &self.program,
            &self.version,
            self.about.as_deref(),
            &self.options,
            self.variadic.as_ref(),
        )?;

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Built program '{}' with keys: {:?}.",
                self.program, self.keys
            );
        }

        Ok(Program::new(self.keys, grammar, self.fields, user_interface))
    }

    /// Build the program as a Result.
    /// This compiles the grammar and checks for configuration errors (ex: a repeated option name).
    pub fn build_parser(self) -> Result<Program<F>, ConfigError> {
        self.build_with_interface(Box::new(ConsoleInterface::default()))
    }

    /// Build the program.
    /// This compiles the grammar and checks for configuration errors (ex: a repeated option name).
    /// If an error is encountered, exits with error code `1` (via [`std::process::exit`]).
    pub fn build(self) -> Program<F> {
        match self.build_parser() {
            Ok(program) => program,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::api::{Flag, InvalidCapture, ValueOption};
    use crate::parser::util::InMemoryInterface;
    use crate::parser::ParseError;
    use crate::test::{assert_contains, to_int};
    use rand::seq::SliceRandom;
    use rand::thread_rng;
    use rstest::rstest;

    fn sample() -> ProgramBuilder<
        (((), crate::api::FlagField), crate::api::ValueField<i64, crate::api::Absent>),
        NoVariadic,
    > {
        ProgramBuilder::create("my-app", "1.0.0")
            .option(Flag::new("bool", "this is a boolean"))
            .option(ValueOption::new("num", "this is a number", to_int).short('n'))
    }

    #[test]
    fn create_empty() {
        // Setup
        let interface = InMemoryInterface::default();
        let program = ProgramBuilder::create("program", "1.0.0")
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let () = program.try_parse(&[]).unwrap();

        // Verify
        assert!(program.keys().is_empty());
        let (message, error) = interface.consume();
        assert_eq!(message, None);
        assert_eq!(error, None);
    }

    #[cfg(feature = "unit_test")]
    #[test]
    fn test_dummy() {
        // Setup
        let builder = ProgramBuilder::test_dummy().option(Flag::new("verbose", "").short('v'));

        // Execute
        let program = builder.build_parser().unwrap();

        // Verify
        assert_eq!(program.keys(), &["verbose"]);
        let ((), verbose) = program.try_parse(&["-v"]).unwrap();
        assert!(verbose);
    }

    #[test]
    fn keys_follow_declarations() {
        // Setup
        let builder = sample()
            .variadic(Variadic::new("positional").required())
            .option(Flag::new("after", ""));

        // Execute
        let program = builder.build_parser().unwrap();

        // Verify
        assert_eq!(program.keys(), &["bool", "num", "positional", "after"]);
    }

    #[test]
    fn end_to_end() {
        // Setup
        let program = sample()
            .variadic(Variadic::new("positional").required())
            .build_parser()
            .unwrap();

        // Execute
        let ((((), bool), num), positional) = program
            .try_parse(&["--num=10", "positional", "--bool", "argument"])
            .unwrap();

        // Verify
        assert!(bool);
        assert_eq!(num, Some(10));
        assert_eq!(positional, vec!["positional", "argument"]);
    }

    #[test]
    fn defaults_without_flags() {
        // Setup
        let program = ProgramBuilder::create("program", "1.0.0")
            .option(Flag::new("quiet", ""))
            .option(Flag::new("color", "").default(true))
            .option(ValueOption::new("num", "", to_int).default(3))
            .option(ValueOption::<String>::parsed("name", ""))
            .build_parser()
            .unwrap();

        // Execute
        let (((((), quiet), color), num), name) = program.try_parse(&[]).unwrap();

        // Verify
        assert!(!quiet);
        assert!(color);
        assert_eq!(num, 3);
        assert_eq!(name, None);
    }

    #[rstest]
    #[case(vec!["--num=10"], Some(10))]
    #[case(vec!["--num", "10"], Some(10))]
    #[case(vec!["-n", "10"], Some(10))]
    #[case(vec!["-n=10"], Some(10))]
    #[case(vec!["--num=-4"], Some(-4))]
    #[case(vec!["--num", "-4"], Some(-4))]
    #[case(vec!["--num", "1", "--num", "2"], Some(2))]
    #[case(vec![], None)]
    fn value_conversion(#[case] tokens: Vec<&str>, #[case] expected: Option<i64>) {
        // Setup
        let program = ProgramBuilder::create("program", "1.0.0")
            .option(ValueOption::new("num", "", to_int).short('n'))
            .build_parser()
            .unwrap();

        // Execute
        let ((), num) = program.try_parse(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(num, expected);
    }

    #[rstest]
    #[case(vec!["--bool"], true)]
    #[case(vec!["-b"], true)]
    #[case(vec![], false)]
    fn flag_presence(#[case] tokens: Vec<&str>, #[case] expected: bool) {
        // Setup
        let program = ProgramBuilder::create("program", "1.0.0")
            .option(Flag::new("bool", "").short('b'))
            .build_parser()
            .unwrap();

        // Execute
        let ((), bool) = program.try_parse(tokens.as_slice()).unwrap();

        // Verify
        assert_eq!(bool, expected);
    }

    #[test]
    fn variadic_order() {
        // Setup
        let program = ProgramBuilder::create("program", "1.0.0")
            .option(Flag::new("bool", ""))
            .variadic(Variadic::new("positional").required())
            .build_parser()
            .unwrap();

        // Execute
        let (((), bool), positional) = program
            .try_parse(&["positional", "--bool", "argument"])
            .unwrap();

        // Verify
        assert!(bool);
        assert_eq!(positional, vec!["positional", "argument"]);
    }

    #[test]
    fn variadic_order_shuffled() {
        // Setup
        let program = ProgramBuilder::create("program", "1.0.0")
            .option(Flag::new("a", "").short('a'))
            .option(Flag::new("b", "").short('b'))
            .option(Flag::new("c", "").short('c'))
            .variadic(Variadic::new("items"))
            .build_parser()
            .unwrap();
        let items: Vec<String> = (0..10).map(|i| format!("item{i}")).collect();

        for _ in 0..20 {
            let mut flags = vec!["-a", "-b", "--c"];
            flags.shuffle(&mut thread_rng());
            let mut tokens: Vec<&str> = items.iter().map(AsRef::as_ref).collect();

            for flag in flags {
                let position = rand::random::<usize>() % (tokens.len() + 1);
                tokens.insert(position, flag);
            }

            // Execute
            let (((((), a), b), c), captured) = program.try_parse(tokens.as_slice()).unwrap();

            // Verify
            assert!(a && b && c);
            assert_eq!(captured, items, "tokens: {tokens:?}");
        }
    }

    #[test]
    fn variadic_optional_empty() {
        // Setup
        let program = ProgramBuilder::create("program", "1.0.0")
            .variadic(Variadic::new("files"))
            .build_parser()
            .unwrap();

        // Execute
        let ((), files) = program.try_parse(&[]).unwrap();

        // Verify
        assert!(files.is_empty());
    }

    #[test]
    fn required_missing() {
        // Setup
        let interface = InMemoryInterface::default();
        let program = ProgramBuilder::create("app", "1.0.0")
            .option(ValueOption::new("req", "a required field", to_int).required())
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let result = program.try_parse(&[]);

        // Verify
        assert_matches!(result, Err(ParseError::Exit(2)));
        let (message, error) = interface.consume();
        assert_eq!(message, None);
        assert_contains!(error.unwrap(), "--req <arg>");
    }

    #[test]
    fn required_present() {
        // Setup
        let program = ProgramBuilder::create("app", "1.0.0")
            .option(ValueOption::new("req", "a required field", to_int).required())
            .build_parser()
            .unwrap();

        // Execute
        let ((), req) = program.try_parse(&["--req=10"]).unwrap();

        // Verify
        assert_eq!(req, 10);
    }

    #[test]
    fn required_variadic_empty() {
        // Setup
        let interface = InMemoryInterface::default();
        let program = ProgramBuilder::create("app", "1.0.0")
            .variadic(Variadic::new("positional").required())
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let ((), positional) = program.try_parse(&[]).unwrap();

        // Verify
        assert!(positional.is_empty());
        assert_eq!(interface.consume(), (None, None));
        assert_contains!(program.render_help(), "Usage: app [options] <positional>...");
    }

    #[test]
    fn conversion_failure() {
        // Setup
        let program = sample().build_parser().unwrap();

        // Execute
        let result = program.try_parse(&["--num=ten"]);

        // Verify
        assert_matches!(
            result,
            Err(ParseError::Capture(InvalidCapture::InvalidConversion { name, token, .. }))
                if name == "num" && token == "ten"
        );
    }

    #[test]
    fn conversion_failure_parse() {
        // Setup
        let program = sample().build_parser().unwrap();

        // Execute
        let error = program.parse(&["--num", "ten"]).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "cannot convert 'ten' for option '--num': This is not an int"
        );
    }

    #[rstest]
    #[case(vec!["--unknown"])]
    #[case(vec!["unexpected"])]
    #[case(vec!["--num"])]
    fn engine_rejects(#[case] tokens: Vec<&str>) {
        // Setup
        let interface = InMemoryInterface::default();
        let program = sample()
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let result = program.try_parse(tokens.as_slice());

        // Verify
        assert_matches!(result, Err(ParseError::Exit(2)));
        let (message, error) = interface.consume();
        assert_eq!(message, None);
        assert_contains!(error.unwrap(), "error:");
    }

    #[test]
    fn engine_usage() {
        // Setup
        let interface = InMemoryInterface::default();
        let program = sample()
            .variadic(Variadic::new("positional"))
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let result = program.try_parse(&["--unknown"]);

        // Verify
        assert_matches!(result, Err(ParseError::Exit(2)));
        let (_, error) = interface.consume();
        assert_contains!(error.unwrap(), "Usage: my-app [options] [positional]...");
    }

    #[rstest]
    #[case(vec!["--help"])]
    #[case(vec!["-h"])]
    fn help(#[case] tokens: Vec<&str>) {
        // Setup
        let interface = InMemoryInterface::default();
        let program = sample()
            .about("An app.")
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let result = program.try_parse(tokens.as_slice());

        // Verify
        assert_matches!(result, Err(ParseError::Exit(0)));
        let (message, error) = interface.consume();
        assert_eq!(error, None);
        let message = message.unwrap();
        assert_contains!(message, "An app.");
        assert_contains!(message, "--num <arg>");
        assert_contains!(message, "this is a boolean (default: false)");
    }

    #[rstest]
    #[case(vec!["--version"])]
    #[case(vec!["-V"])]
    fn version(#[case] tokens: Vec<&str>) {
        // Setup
        let interface = InMemoryInterface::default();
        let program = sample()
            .build_with_interface(Box::new(interface.clone()))
            .unwrap();

        // Execute
        let result = program.try_parse(tokens.as_slice());

        // Verify
        assert_matches!(result, Err(ParseError::Exit(0)));
        let (message, error) = interface.consume();
        assert_eq!(error, None);
        assert_eq!(message.unwrap(), "my-app 1.0.0");
    }

    #[test]
    fn prior_builder_stays_usable() {
        // Setup
        let base = ProgramBuilder::create("program", "1.0.0").option(Flag::new("bool", ""));
        let extended = base
            .clone()
            .option(ValueOption::new("num", "", to_int).default(1));

        // Execute
        let base = base.build_parser().unwrap();
        let extended = extended.build_parser().unwrap();

        // Verify
        let ((), bool) = base.try_parse(&["--bool"]).unwrap();
        assert!(bool);
        let (((), bool), num) = extended.try_parse(&["--num=5"]).unwrap();
        assert!(!bool);
        assert_eq!(num, 5);
        assert_eq!(base.keys(), &["bool"]);
        assert_eq!(extended.keys(), &["bool", "num"]);
    }

    #[test]
    fn parse_repeatedly() {
        // Setup
        let program = sample().build_parser().unwrap();

        for i in 0..3 {
            let value = i.to_string();

            // Execute
            let (((), _), num) = program.try_parse(&["--num", value.as_str()]).unwrap();

            // Verify
            assert_eq!(num, Some(i));
        }
    }

    #[rstest]
    #[case(Flag::new("bool", ""), "'bool'")]
    #[case(Flag::new("other", "").short('n'), "'-n'")]
    #[case(Flag::new("help", ""), "'help'")]
    #[case(Flag::new("other", "").short('h'), "'-h'")]
    #[case(Flag::new("other", "").short('V'), "'-V'")]
    #[case(Flag::new("", ""), "empty")]
    #[case(Flag::new("other", "").short('-'), "'-'")]
    fn build_rejects(#[case] flag: Flag, #[case] expected: &str) {
        // Setup
        let builder = sample().option(flag);

        // Execute
        let result = builder.build_parser();

        // Verify
        let error = result.err().unwrap();
        assert_contains!(error.to_string(), expected);
    }

    #[test]
    fn build_rejects_variadic_clash() {
        // Setup
        let builder = sample().variadic(Variadic::new("num"));

        // Execute
        let result = builder.build_parser();

        // Verify
        assert_contains!(result.err().unwrap().to_string(), "'num'");
    }

    #[test]
    fn program_is_shareable() {
        fn shareable<T: Send + Sync>(_: &T) {}

        // Setup
        let program = sample().build_parser().unwrap();

        // Verify
        shareable(&program);
    }
}
