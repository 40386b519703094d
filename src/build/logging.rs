//! Console logging for the build entrypoint.

use log::{LevelFilter, SetLoggerError};

/// Output detail selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Phase progress and errors.
    #[default]
    Normal,
    /// Everything, including debug detail on errors.
    Verbose,
}

impl Verbosity {
    /// `--verbose` or `-v` anywhere in `args` selects [`Verbosity::Verbose`].
    pub fn from_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let verbose = args
            .into_iter()
            .any(|arg| matches!(arg.as_ref(), "--verbose" | "-v"));
        if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Default log filter for this verbosity.
    pub fn level(self) -> LevelFilter {
        match self {
            Verbosity::Normal => LevelFilter::Info,
            Verbosity::Verbose => LevelFilter::Debug,
        }
    }
}

/// Install `env_logger`. `RUST_LOG` still overrides the default level.
pub fn init(verbosity: Verbosity) -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(verbosity.level().as_str()),
    )
    .format_timestamp(None)
    .format_target(false)
    .try_init()
}
