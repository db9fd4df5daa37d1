use std::{
    env,
    path::{Path, PathBuf},
};

use log::LevelFilter;
use tour_perm_derive::{CliOptions, CliValue, KvDisplay};

use crate::{
    Error, Result, permutation::DEFAULT_MAX_INTERIOR, refine::DEFAULT_MAX_ITERATIONS,
};

const DEFAULT_INPUT: &str = "useCase.json";

/// Runtime options for a permutation run.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct RunOptions {
    /// Use-case JSON file.
    #[cli(long = "input")]
    #[kv(fmt = "path")]
    pub input: PathBuf,
    /// Refinement budget applied to every permutation.
    #[cli(long = "max-iterations")]
    pub max_iterations: usize,
    /// Largest interior stop count accepted before enumeration is refused.
    #[cli(long = "max-interior")]
    pub max_interior: usize,
    /// Seed for the shared generator. `0` draws one from OS entropy.
    #[cli(long = "seed")]
    pub seed: u64,
    /// Overrides the use-case `TimesliceLength` when non-zero.
    #[cli(long = "segment-length")]
    pub segment_length: u64,
    /// Which entry point drives the run.
    #[cli(long = "mode", parse_with = "RunMode::parse")]
    pub mode: RunMode,
    /// Report destination. Empty means stdout.
    #[cli(long = "output")]
    pub output: String,
    /// Optional JSON artifact of the frequency table or itinerary.
    #[cli(long = "results-json")]
    pub results_json: String,
    /// Optional JSON dump of the dense travel matrix.
    #[cli(long = "matrix-output")]
    pub matrix_output: String,
    #[cli(long = "log-level", parse_with = "LogLevel::parse")]
    pub log_level: LogLevel,
    #[cli(long = "log-format", parse_with = "LogFormat::parse")]
    pub log_format: LogFormat,
    pub log_timestamp: bool,
    /// Log file. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-level")]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning")]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "log-format")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
#[cli_value(option = "mode")]
pub enum RunMode {
    /// Enumerate every interior ordering and report the duration histogram.
    #[cli(alias = "enumerate")]
    Histogram,
    /// Refine the stop list once and report the timed itinerary.
    #[cli(alias = "explain")]
    Itinerary,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_interior: DEFAULT_MAX_INTERIOR,
            seed: 0,
            segment_length: 0,
            mode: RunMode::Histogram,
            output: String::new(),
            results_json: String::new(),
            matrix_output: String::new(),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl RunOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let Some(raw_name) = arg.strip_prefix("--") else {
                return Err(Error::configuration(format!(
                    "Unexpected argument: {arg}\n\n{}",
                    Self::usage()
                )));
            };

            if raw_name.is_empty() {
                return Err(Error::configuration(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);

            if options.apply_cli_option(&name, value.clone())? {
                continue;
            }

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::configuration(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    return Err(Error::configuration(format!(
                        "Unknown option: --{name}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        Ok(options)
    }

    pub fn usage() -> String {
        let mut usage = String::from("Usage:\n  tour-perm [options]\n\nOptions:\n");
        for flag in Self::CLI_FLAGS {
            let hint = match *flag {
                "mode" => RunMode::CLI_CHOICES,
                "log-level" => LogLevel::CLI_CHOICES,
                "log-format" => LogFormat::CLI_CHOICES,
                "max-iterations" | "max-interior" => "usize",
                "seed" | "segment-length" => "u64",
                _ => "path",
            };
            usage.push_str(&format!("  --{flag} <{hint}>\n"));
        }
        usage.push_str(concat!(
            "  --log-timestamp[=<bool>]\n",
            "  --no-log-timestamp\n",
            "  --help\n",
            "\n",
            "Examples:\n",
            "  tour-perm --input useCase.json --log-level=info\n",
            "  tour-perm --mode=itinerary --seed=42 --results-json=itinerary.json\n",
            "  tour-perm --max-iterations=0 --matrix-output=adjustedMatrix.json\n",
        ));
        usage
    }

    pub fn input_path(&self) -> &Path {
        &self.input
    }

    pub fn output_path(&self) -> Option<&Path> {
        optional_path(&self.output)
    }

    pub fn results_json_path(&self) -> Option<&Path> {
        optional_path(&self.results_json)
    }

    pub fn matrix_output_path(&self) -> Option<&Path> {
        optional_path(&self.matrix_output)
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        optional_path(&self.log_output)
    }

    /// `None` when the shared generator should be seeded from entropy.
    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }

    /// `None` when the use-case value should be kept.
    pub fn segment_length_override(&self) -> Option<u64> {
        (self.segment_length != 0).then_some(self.segment_length)
    }
}

fn optional_path(raw: &str) -> Option<&Path> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "-" {
        None
    } else {
        Some(Path::new(raw))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::configuration(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
