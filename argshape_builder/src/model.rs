/// How an option's value is settled when it is not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    /// The engine rejects the invocation when the option is missing.
    Required,
    /// The declared default applies; carries the rendered default for help output.
    Defaulted(String),
    /// No default; the record holds nothing for this option.
    Absent,
}

impl Requirement {
    /// Whether the engine must enforce presence of the option.
    pub fn is_required(&self) -> bool {
        matches!(self, Requirement::Required)
    }
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Required => write!(f, "required"),
            Requirement::Defaulted(label) => write!(f, "default: {label}"),
            Requirement::Absent => write!(f, "optional"),
        }
    }
}
