//! # Run configuration and demo argument parsing.
//!
//! [`RunConfig`] is built once at startup and read-only afterwards. The demo
//! binary parses it from `-d/-s/-v` style flags via [`parse_args`]; library
//! users construct it directly.
//!
//! ## Field semantics
//! - `domain_id`: broker domain the endpoints attach to
//! - `sample_count`: publish/receive budget (`u32::MAX` = effectively unbounded)
//! - `verbosity`: gates diagnostic output on stderr; sample output is always
//!   printed

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::ConfigError;

/// Immutable per-run settings shared by producer and subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Broker domain to attach to.
    pub domain_id: u32,
    /// Number of samples to publish (producer) or receive (subscriber).
    pub sample_count: u32,
    /// Diagnostic output level.
    pub verbosity: Verbosity,
}

impl Default for RunConfig {
    /// Defaults mirror the demo's historical behavior: domain 0, run until
    /// interrupted, errors only.
    fn default() -> Self {
        Self {
            domain_id: 0,
            sample_count: u32::MAX,
            verbosity: Verbosity::Error,
        }
    }
}

/// Diagnostic output level, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// No diagnostics at all.
    Silent,
    /// Fatal problems only.
    Error,
    /// Recoverable oddities (lag, fallback paths).
    Warn,
    /// Progress lines (endpoints created, counts reached).
    Info,
    /// Per-iteration detail.
    Debug,
}

impl FromStr for Verbosity {
    type Err = ConfigError;

    /// Accepts level names (case-insensitive) or the numerals 0-4.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "silent" | "0" => Ok(Verbosity::Silent),
            "error" | "1" => Ok(Verbosity::Error),
            "warn" | "2" => Ok(Verbosity::Warn),
            "info" | "3" => Ok(Verbosity::Info),
            "debug" | "4" => Ok(Verbosity::Debug),
            other => Err(ConfigError::InvalidValue {
                flag: "--verbosity".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Everything the demo binary needs after argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoArgs {
    /// Parsed run settings.
    pub config: RunConfig,
    /// Optional path to a fortunes resource (`-f`); `None` means the default
    /// `fortunes` file in the working directory.
    pub fortunes: Option<PathBuf>,
    /// `-h`/`--help` was given; print usage and exit successfully.
    pub help: bool,
}

/// Usage text for the demo binary.
pub const USAGE: &str = "\
usage: pubsub [options]
  -d, --domain <id>        broker domain id (default: 0)
  -s, --samples <count>    samples to publish/receive (default: unbounded)
  -v, --verbosity <level>  silent|error|warn|info|debug or 0-4 (default: error)
  -f, --fortunes <path>    fortunes file (default: ./fortunes)
  -h, --help               print this help and exit";

/// Parses demo arguments (without the program name).
///
/// Unknown flags, missing values, and unparsable values are configuration
/// errors; the caller prints [`USAGE`] and exits with failure status.
pub fn parse_args<I>(args: I) -> Result<DemoArgs, ConfigError>
where
    I: IntoIterator<Item = String>,
{
    let mut out = DemoArgs {
        config: RunConfig::default(),
        fortunes: None,
        help: false,
    };

    let mut it = args.into_iter();
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "-h" | "--help" => out.help = true,
            "-d" | "--domain" => out.config.domain_id = numeric(&arg, it.next())?,
            "-s" | "--samples" => out.config.sample_count = numeric(&arg, it.next())?,
            "-v" | "--verbosity" => {
                out.config.verbosity = required(&arg, it.next())?.parse()?;
            }
            "-f" | "--fortunes" => {
                out.fortunes = Some(PathBuf::from(required(&arg, it.next())?));
            }
            _ => {
                return Err(ConfigError::UnknownArgument { arg });
            }
        }
    }
    Ok(out)
}

fn required(flag: &str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingValue {
        flag: flag.to_string(),
    })
}

fn numeric(flag: &str, value: Option<String>) -> Result<u32, ConfigError> {
    let value = required(flag, value)?;
    value.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn defaults_when_no_arguments() {
        let parsed = parse_args(args(&[])).unwrap();
        assert_eq!(parsed.config, RunConfig::default());
        assert_eq!(parsed.fortunes, None);
        assert!(!parsed.help);
    }

    #[test]
    fn parses_all_flags() {
        let parsed = parse_args(args(&[
            "-d", "7", "--samples", "12", "-v", "debug", "-f", "my-fortunes",
        ]))
        .unwrap();
        assert_eq!(parsed.config.domain_id, 7);
        assert_eq!(parsed.config.sample_count, 12);
        assert_eq!(parsed.config.verbosity, Verbosity::Debug);
        assert_eq!(parsed.fortunes, Some(PathBuf::from("my-fortunes")));
    }

    #[test]
    fn verbosity_accepts_numerals() {
        let parsed = parse_args(args(&["-v", "3"])).unwrap();
        assert_eq!(parsed.config.verbosity, Verbosity::Info);
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let err = parse_args(args(&["--frobnicate"])).unwrap_err();
        assert_eq!(err.as_label(), "config_unknown_argument");
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = parse_args(args(&["-s"])).unwrap_err();
        assert_eq!(err.as_label(), "config_missing_value");
    }

    #[test]
    fn bad_numeral_is_rejected() {
        let err = parse_args(args(&["-d", "many"])).unwrap_err();
        assert_eq!(err.as_label(), "config_invalid_value");
    }

    #[test]
    fn help_short_circuits_nothing_else() {
        let parsed = parse_args(args(&["-h", "-s", "5"])).unwrap();
        assert!(parsed.help);
        assert_eq!(parsed.config.sample_count, 5);
    }

    #[test]
    fn verbosity_levels_are_ordered() {
        assert!(Verbosity::Debug > Verbosity::Info);
        assert!(Verbosity::Info > Verbosity::Warn);
        assert!(Verbosity::Warn > Verbosity::Error);
        assert!(Verbosity::Error > Verbosity::Silent);
    }
}
