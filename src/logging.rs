use env_logger::{Builder, Target};
use log::{Level, LevelFilter, Log, Record};
use std::{fmt, io::Write};

const TARGET: &str = "wf";
/// Records on this target are the ones still shown at `Critical` verbosity.
pub const CRITICAL_TARGET: &str = "wf::critical";

/// Verbosity names accepted by `--verbosity`, lowest to highest.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    NotSet,
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Critical,
}

impl Verbosity {
    /// Unknown names fall back to `Critical`, which keeps the output close to silent.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "NOTSET" => Verbosity::NotSet,
            "DEBUG" => Verbosity::Debug,
            "INFO" => Verbosity::Info,
            "WARNING" => Verbosity::Warning,
            "ERROR" => Verbosity::Error,
            _ => Verbosity::Critical,
        }
    }

    /// Filter for ordinary records. `Critical` hides all of them, only
    /// [`emit_critical`] records get through.
    pub fn level_filter(self) -> LevelFilter {
        match self {
            Verbosity::NotSet => LevelFilter::Trace,
            Verbosity::Debug => LevelFilter::Debug,
            Verbosity::Info => LevelFilter::Info,
            Verbosity::Warning => LevelFilter::Warn,
            Verbosity::Error => LevelFilter::Error,
            Verbosity::Critical => LevelFilter::Off,
        }
    }
}

fn level_name(level: Level, target: &str) -> &'static str {
    if target == CRITICAL_TARGET {
        return "CRITICAL";
    }

    match level {
        Level::Trace => "TRACE",
        Level::Debug => "DEBUG",
        Level::Info => "INFO",
        Level::Warn => "WARNING",
        Level::Error => "ERROR",
    }
}

/// Builds the stderr logger handed to the watch loop. Nothing is installed as
/// the global `log` logger.
pub fn stderr_logger(verbosity: Verbosity) -> Box<dyn Log> {
    let logger = Builder::new()
        .filter_level(verbosity.level_filter())
        .filter_module(CRITICAL_TARGET, LevelFilter::Error)
        .target(Target::Stderr)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}] {}",
                level_name(record.level(), record.target()),
                record.args()
            )
        })
        .build();

    Box::new(logger)
}

/// Sends one record to `logger`, which applies its own level filter.
pub fn emit(logger: &dyn Log, level: Level, args: fmt::Arguments<'_>) {
    record(logger, level, TARGET, args);
}

/// Fatal startup problems and the shutdown notice, printed at every verbosity.
pub fn emit_critical(logger: &dyn Log, args: fmt::Arguments<'_>) {
    record(logger, Level::Error, CRITICAL_TARGET, args);
}

fn record(logger: &dyn Log, level: Level, target: &str, args: fmt::Arguments<'_>) {
    logger.log(
        &Record::builder()
            .args(args)
            .level(level)
            .target(target)
            .module_path_static(Some(module_path!()))
            .build(),
    );
}


#[cfg(test)]
mod tests {
    use super::*;
    use log::Metadata;

    #[test]
    fn test_verbosity_names_are_case_insensitive() {
        assert_eq!(Verbosity::from_name("debug"), Verbosity::Debug);
        assert_eq!(Verbosity::from_name("Warning"), Verbosity::Warning);
        assert_eq!(Verbosity::from_name("NOTSET"), Verbosity::NotSet);
    }

    #[test]
    fn test_unknown_verbosity_falls_back_to_critical() {
        assert_eq!(Verbosity::from_name("loud"), Verbosity::Critical);
        assert_eq!(Verbosity::from_name(""), Verbosity::Critical);
        assert_eq!(Verbosity::from_name("loud").level_filter(), LevelFilter::Off);
    }

    #[test]
    fn test_level_filters() {
        assert_eq!(Verbosity::NotSet.level_filter(), LevelFilter::Trace);
        assert_eq!(Verbosity::default().level_filter(), LevelFilter::Info);
        assert_eq!(Verbosity::Warning.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_level_names_follow_verbosity_names() {
        assert_eq!(level_name(Level::Warn, TARGET), "WARNING");
        assert_eq!(level_name(Level::Error, TARGET), "ERROR");
        assert_eq!(level_name(Level::Error, CRITICAL_TARGET), "CRITICAL");
    }

    fn shown(logger: &dyn Log, level: Level, target: &str) -> bool {
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn test_critical_verbosity_only_shows_critical_records() {
        let logger = stderr_logger(Verbosity::Critical);
        assert!(shown(logger.as_ref(), Level::Error, CRITICAL_TARGET));
        assert!(!shown(logger.as_ref(), Level::Error, TARGET));
        assert!(!shown(logger.as_ref(), Level::Warn, TARGET));
    }

    #[test]
    fn test_critical_records_are_shown_at_every_verbosity() {
        for verbosity in [
            Verbosity::NotSet,
            Verbosity::Debug,
            Verbosity::Info,
            Verbosity::Warning,
            Verbosity::Error,
        ] {
            let logger = stderr_logger(verbosity);
            assert!(shown(logger.as_ref(), Level::Error, CRITICAL_TARGET));
            assert!(shown(logger.as_ref(), Level::Error, TARGET));
        }

        let logger = stderr_logger(Verbosity::Warning);
        assert!(!shown(logger.as_ref(), Level::Info, TARGET));
    }
}
