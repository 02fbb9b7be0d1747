mod capture;
mod core;
mod field;
mod option;

pub use self::core::*;
pub use capture::{BoxError, InvalidCapture};
pub use field::*;
pub use option::*;
