pub(crate) const DEFAULT_ARG_NAME: &str = "arg";
pub(crate) const OPTIONS_USAGE: &str = "[options]";
pub(crate) const HELP_NAME: &str = "help";
pub(crate) const HELP_SHORT: char = 'h';
pub(crate) const VERSION_NAME: &str = "version";
pub(crate) const VERSION_SHORT: char = 'V';
