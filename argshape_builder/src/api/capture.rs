use std::sync::Arc;
use thiserror::Error;

/// The error type a converter may fail with.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Behaviour to convert a raw token into the generic type T.
///
/// Shared between clones of an accumulator.
pub(crate) type Converter<T> = Arc<dyn Fn(&str) -> Result<T, BoxError> + Send + Sync>;

pub(crate) fn converter<T, E>(
    convert: impl Fn(&str) -> Result<T, E> + Send + Sync + 'static,
) -> Converter<T>
where
    T: 'static,
    E: Into<BoxError> + 'static,
{
    Arc::new(move |token: &str| convert(token).map_err(Into::into))
}

/// The failure to turn a matched token into its declared value.
#[derive(Debug, Error)]
pub enum InvalidCapture {
    /// The option's converter rejected the token.
    #[error("cannot convert '{token}' for option '--{name}': {source}")]
    InvalidConversion {
        /// The option name.
        name: String,
        /// The raw token supplied on the command line.
        token: String,
        /// The converter's error.
        #[source]
        source: BoxError,
    },
    /// A required option reached conversion without a value.
    #[error("no value captured for required option '--{name}'.")]
    MissingRequired {
        /// The option name.
        name: String,
    },
}
