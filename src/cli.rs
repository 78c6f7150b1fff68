//! Command-line interface for exproto.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Input C file; None or "-" reads stdin
    pub input: Option<PathBuf>,

    /// Output file; None writes to stdout
    pub output: Option<PathBuf>,

    /// Run the external preprocessor over the input first
    pub use_cpp: bool,

    /// Include each prototype's associated comment in the output
    pub comments: bool,

    /// Include prototypes of static functions
    pub statics: bool,

    /// Preprocessor executable (overrides config)
    pub cpp_command: Option<String>,

    /// Extra arguments passed to the preprocessor verbatim (after `--`)
    pub cpp_extra_args: Vec<String>,

    /// Config file path (overrides auto-discovery)
    pub config: Option<PathBuf>,

    /// Enable debug output
    pub debug: bool,

    /// Silent mode (no output besides errors and prototypes)
    pub silent: bool,
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("exproto")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Extracts function prototypes from C files")
        .arg(
            Arg::new("input")
                .help("Input C file ('-' or absent reads stdin)")
                .value_name("FILE")
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Send output to this file instead of stdout")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("cpp")
                .short('p')
                .long("cpp")
                .help("Run the C preprocessor over the input first")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("comments")
                .short('c')
                .long("comments")
                .help("Include function comments in the output")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("statics")
                .short('s')
                .long("statics")
                .help("Include static functions")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cpp-command")
                .long("cpp-command")
                .help("Preprocessor executable [default: cpp]")
                .value_name("CMD"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output on stderr")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (suppress progress messages)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cpp-args")
                .help("Arguments after -- are passed to the preprocessor verbatim")
                .value_name("CPP-ARGS")
                .num_args(0..)
                .last(true)
                .allow_hyphen_values(true),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        input: matches.get_one::<PathBuf>("input").cloned(),
        output: matches.get_one::<PathBuf>("output").cloned(),
        use_cpp: matches.get_flag("cpp"),
        comments: matches.get_flag("comments"),
        statics: matches.get_flag("statics"),
        cpp_command: matches.get_one::<String>("cpp-command").cloned(),
        cpp_extra_args: matches
            .get_many::<String>("cpp-args")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        config: matches.get_one::<PathBuf>("config").cloned(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
    }
}
