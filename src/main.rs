//! exproto - Prototype extractor for C source files

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::Context;
use exproto::{extract_prototypes, parse_args, CliArgs, Config, Result};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = parse_args();

    // If no input and running interactively, print usage; otherwise read from stdin
    if args.input.is_none() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    let config = build_config(&args)?;

    // An input of "-" means stdin, same as no input at all
    let input_path: Option<PathBuf> = args
        .input
        .clone()
        .filter(|p| p.as_os_str() != "-");
    let input_name = input_path
        .as_ref()
        .map_or_else(|| "<stdin>".to_string(), |p| p.display().to_string());

    let mut writer = open_output(&args)?;

    if config.use_cpp {
        run_with_preprocessor(
            &args,
            &config,
            input_path.as_deref(),
            &input_name,
            &mut *writer,
        )?;
    } else {
        run_direct(&config, input_path.as_deref(), &input_name, &mut *writer)?;
    }

    writer.flush()?;

    if !args.silent {
        if let Some(output) = &args.output {
            eprintln!(
                "Extracted prototypes from {} to {}.",
                input_name,
                output.display()
            );
        }
    }

    Ok(())
}

/// Build configuration from CLI args and optional config file
fn build_config(args: &CliArgs) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        // Explicit config file specified
        if args.debug {
            eprintln!(
                "[DEBUG] Using explicit config file: {}",
                config_path.display()
            );
        }
        Config::from_toml_file(config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else {
        // Auto-discover config files from the input's directory (or cwd for stdin)
        let start = args
            .input
            .clone()
            .filter(|p| p.as_os_str() != "-")
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_default();
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    // Override with CLI arguments
    if args.comments {
        config.include_comments = true;
    }
    if args.statics {
        config.include_statics = true;
    }
    if args.use_cpp {
        config.use_cpp = true;
    }
    if let Some(cmd) = &args.cpp_command {
        config.cpp_command.clone_from(cmd);
    }
    if args.debug {
        config.debug = true;
    }

    // Print final config in debug mode
    if args.debug {
        print_config_debug(&config);
    }

    // Validate configuration
    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   include_comments: {}", config.include_comments);
    eprintln!("[DEBUG]   include_statics: {}", config.include_statics);
    eprintln!("[DEBUG]   use_cpp: {}", config.use_cpp);
    eprintln!("[DEBUG]   cpp_command: {}", config.cpp_command);
    eprintln!("[DEBUG]   cpp_args: {:?}", config.cpp_args);
}

/// Open the output stream: a file when `-o` was given, stdout otherwise
fn open_output(args: &CliArgs) -> Result<Box<dyn Write>> {
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout()))),
    }
}

/// Scan the input directly, without preprocessing
fn run_direct(
    config: &Config,
    input_path: Option<&Path>,
    input_name: &str,
    mut writer: &mut dyn Write,
) -> Result<()> {
    match input_path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            extract_prototypes(BufReader::new(file), &mut writer, config, input_name)
        }
        None => {
            let stdin = io::stdin();
            extract_prototypes(stdin.lock(), &mut writer, config, input_name)
        }
    }
}

/// Scan the output of the external preprocessor
///
/// The preprocessor gets the base arguments from the config, then any
/// passthrough arguments from the command line, then the input path. For
/// stdin input the child inherits our stdin instead.
fn run_with_preprocessor(
    args: &CliArgs,
    config: &Config,
    input_path: Option<&Path>,
    input_name: &str,
    mut writer: &mut dyn Write,
) -> Result<()> {
    let mut command = Command::new(&config.cpp_command);
    command.args(&config.cpp_args);
    command.args(&args.cpp_extra_args);

    match input_path {
        Some(path) => {
            command.arg(path);
            command.stdin(Stdio::null());
        }
        None => {
            command.stdin(Stdio::inherit());
        }
    }
    command.stdout(Stdio::piped());

    if config.debug {
        eprintln!("[DEBUG] Running preprocessor: {command:?}");
    }

    let mut child = command
        .spawn()
        .with_context(|| format!("failed to start preprocessor '{}'", config.cpp_command))?;
    let stdout = child
        .stdout
        .take()
        .context("preprocessor stdout was not captured")?;

    extract_prototypes(BufReader::new(stdout), &mut writer, config, input_name)?;

    let status = child.wait().context("failed to wait for preprocessor")?;
    if !status.success() && !args.silent {
        eprintln!("Warning: preprocessor exited with {status}");
    }

    Ok(())
}

fn print_usage() {
    println!(
        "exproto v{} - C prototype extractor",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Extracts function prototypes from C files.");
    println!();
    println!("Usage:");
    println!("  exproto [OPTIONS] <FILE>");
    println!("  exproto [OPTIONS] -           # Read from stdin");
    println!("  cat file.c | exproto          # Pipe input");
    println!("  exproto -p file.c -- -DFOO    # Preprocess first, passing -DFOO to cpp");
    println!();
    println!("Options:");
    println!("  -o, --output <FILE>     Send output to this file");
    println!("  -p, --cpp               Run the C preprocessor over the input first");
    println!("  -c, --comments          Include function comments in the output");
    println!("  -s, --statics           Include static functions");
    println!("      --cpp-command <CMD> Preprocessor executable [default: cpp]");
    println!("      --config <FILE>     Config file path (overrides auto-discovery)");
    println!("  -D, --debug             Enable debug output");
    println!("  -S, --silent            Silent mode");
    println!("  -h, --help              Print help");
    println!();
    println!("Arguments after -- are passed to the preprocessor as-is.");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for exproto.toml in parent directories");
    println!("  starting from the input file up to the root directory.");
    println!("  Also checks exproto.toml in the home directory.");
    println!("  More specific configs (closer to the input) override less specific ones.");
}
