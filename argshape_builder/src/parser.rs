mod base;
mod interface;
mod middleware;

pub use base::*;
pub(crate) use interface::*;
pub use middleware::*;
