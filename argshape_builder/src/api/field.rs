use crate::api::capture::*;
use crate::model::Requirement;
use crate::parser::RawMatches;

/// Behaviour to settle an option's final value from what was (or was not) captured.
///
/// The three implementations are the three defaulting outcomes of a value option:
/// [`Defaulted`], [`Required`], and [`Absent`].
pub trait Defaulting<T> {
    /// The record field type produced for the option.
    type Value;

    /// Describe this outcome to the grammar.
    fn requirement(&self) -> Requirement;

    /// Settle the value, given the converted token if one was supplied.
    fn settle(&self, name: &str, captured: Option<T>) -> Result<Self::Value, InvalidCapture>;
}

/// No default and not required: the record holds an `Option<T>`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Absent;

/// Presence is enforced by the engine: the record holds a `T`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Required;

/// Falls back to a declared value: the record holds a `T`.
#[derive(Debug, Clone)]
pub struct Defaulted<T> {
    value: T,
    label: String,
}

impl<T: std::fmt::Debug> Defaulted<T> {
    pub(crate) fn new(value: T) -> Self {
        let label = format!("{value:?}");
        Self { value, label }
    }
}

impl<T> Defaulting<T> for Absent {
    type Value = Option<T>;

    fn requirement(&self) -> Requirement {
        Requirement::Absent
    }

    fn settle(&self, _name: &str, captured: Option<T>) -> Result<Self::Value, InvalidCapture> {
        Ok(captured)
    }
}

impl<T> Defaulting<T> for Required {
    type Value = T;

    fn requirement(&self) -> Requirement {
        Requirement::Required
    }

    fn settle(&self, name: &str, captured: Option<T>) -> Result<Self::Value, InvalidCapture> {
        // The engine rejects the invocation before we get here; only a mis-wired grammar lands in the error.
        captured.ok_or_else(|| InvalidCapture::MissingRequired {
            name: name.to_string(),
        })
    }
}

impl<T: Clone> Defaulting<T> for Defaulted<T> {
    type Value = T;

    fn requirement(&self) -> Requirement {
        Requirement::Defaulted(self.label.clone())
    }

    fn settle(&self, _name: &str, captured: Option<T>) -> Result<Self::Value, InvalidCapture> {
        Ok(captured.unwrap_or_else(|| self.value.clone()))
    }
}

/// Behaviour to resolve a single record field from the engine's matches.
#[doc(hidden)]
pub trait Field {
    /// The resolved value type.
    type Value;

    /// Resolve the value.
    fn resolve(&self, matches: &RawMatches) -> Result<Self::Value, InvalidCapture>;
}

/// The field of a [`Flag`](crate::Flag).
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct FlagField {
    name: String,
    default: bool,
}

impl FlagField {
    pub(crate) fn new(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            default,
        }
    }
}

impl Field for FlagField {
    type Value = bool;

    fn resolve(&self, matches: &RawMatches) -> Result<Self::Value, InvalidCapture> {
        if matches.present(&self.name) {
            Ok(true)
        } else {
            Ok(self.default)
        }
    }
}

/// The field of a [`ValueOption`](crate::ValueOption).
#[doc(hidden)]
pub struct ValueField<T, D> {
    name: String,
    converter: Converter<T>,
    defaulting: D,
}

impl<T, D> ValueField<T, D> {
    pub(crate) fn new(name: impl Into<String>, converter: Converter<T>, defaulting: D) -> Self {
        Self {
            name: name.into(),
            converter,
            defaulting,
        }
    }
}

// Not derived: T itself needn't be Clone, only the shared converter is.
impl<T, D: Clone> Clone for ValueField<T, D> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            converter: self.converter.clone(),
            defaulting: self.defaulting.clone(),
        }
    }
}

impl<T, D> Field for ValueField<T, D>
where
    D: Defaulting<T>,
{
    type Value = D::Value;

    fn resolve(&self, matches: &RawMatches) -> Result<Self::Value, InvalidCapture> {
        let captured = match matches.raw(&self.name) {
            Some(token) => Some((self.converter)(token).map_err(|source| {
                InvalidCapture::InvalidConversion {
                    name: self.name.clone(),
                    token: token.to_string(),
                    source,
                }
            })?),
            None => None,
        };

        self.defaulting.settle(&self.name, captured)
    }
}

/// The field of a [`Variadic`](crate::Variadic).
#[doc(hidden)]
#[derive(Debug, Clone)]
pub struct VariadicField {
    name: String,
}

impl VariadicField {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Field for VariadicField {
    type Value = Vec<String>;

    fn resolve(&self, matches: &RawMatches) -> Result<Self::Value, InvalidCapture> {
        Ok(matches.leftovers(&self.name))
    }
}

/// Behaviour to resolve every field of a program, producing the record shape.
///
/// Implemented over nested pairs so the compiler keeps each field's type:
/// `()` is the empty record and `(H, F)` extends `H` by the field `F`.
#[doc(hidden)]
pub trait FieldSet {
    /// The record shape; nested pairs of values in declaration order.
    type Output;

    /// Resolve each field in declaration order, stopping at the first failure.
    fn resolve_all(&self, matches: &RawMatches) -> Result<Self::Output, InvalidCapture>;
}

impl FieldSet for () {
    type Output = ();

    fn resolve_all(&self, _matches: &RawMatches) -> Result<Self::Output, InvalidCapture> {
        Ok(())
    }
}

impl<H, F> FieldSet for (H, F)
where
    H: FieldSet,
    F: Field,
{
    type Output = (H::Output, F::Value);

    fn resolve_all(&self, matches: &RawMatches) -> Result<Self::Output, InvalidCapture> {
        let head = self.0.resolve_all(matches)?;
        let value = self.1.resolve(matches)?;
        Ok((head, value))
    }
}
