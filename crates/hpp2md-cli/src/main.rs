//! hpp2md: CLI tool to generate Markdown API pages from C++ headers

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};

use hpp2md_core::{
    DescriptionOptions, DescriptionScope, ExternalFormatter, Formatter, PageOptions, PathMapping,
    Verbatim, build_documentation_for_file,
};

use config::{CONFIG_FILE_NAME, Config};

#[derive(Parser, Debug)]
#[command(name = "hpp2md")]
#[command(about = "Generate Markdown API pages from C++ headers")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(subcommand_negates_reqs = true)]
#[command(after_help = "Examples:
  hpp2md include/mk/logger.hpp          # Write doc/api/logger.md
  hpp2md include/mk/*.hpp               # One page per header
  hpp2md --no-format include/mk/safe.hpp # Skip clang-format
  hpp2md init                           # Write a sample _hpp2md.toml
  hpp2md -- init                        # Document a header file named `init`

A leading `init` runs the subcommand; put `--` before file names to
document a file of that name.")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Header files to document
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Configuration file (defaults to ./_hpp2md.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Formatter command line used for the synopsis (e.g. "clang-format -style=LLVM")
    #[arg(long, value_name = "CMD", conflicts_with = "no_format")]
    formatter: Option<String>,

    /// Use the code body verbatim instead of running a formatter
    #[arg(long)]
    no_format: bool,

    /// Number of banner lines skipped before reading the description
    #[arg(long, value_name = "N")]
    banner_lines: Option<usize>,

    /// Collect every comment in the file, not just the leading block
    #[arg(long)]
    all_comments: bool,

    /// Text of the LIBRARY section
    #[arg(long, value_name = "TEXT")]
    library: Option<String>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only show errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write a sample configuration file
    Init {
        /// Output path of the configuration file
        #[arg(short, long, default_value = CONFIG_FILE_NAME)]
        output: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,

        /// Print the JSON schema of the configuration file instead
        #[arg(long)]
        schema: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init {
        output,
        force,
        schema,
    }) = &cli.command
    {
        return init_config(output, *force, *schema);
    }

    let config = load_config(cli.config.as_deref())?;
    let options = page_options(&cli, &config)?;
    let formatter = formatter(&cli, &config)?;

    if cli.verbose {
        eprintln!("Documenting {} header(s)", cli.files.len());
    }

    // The first failure stops the run; earlier pages stay written.
    for input in &cli.files {
        generate_page(input, formatter.as_ref(), &options, cli.verbose, cli.quiet)?;
    }

    Ok(())
}

/// Generate the page for a single header
fn generate_page(
    input: &Path,
    formatter: &dyn Formatter,
    options: &PageOptions,
    verbose: bool,
    quiet: bool,
) -> Result<()> {
    if verbose {
        let (_, output_path) = options.paths.map_path(input)?;
        eprintln!(
            "Generating: {} -> {}",
            input.display(),
            output_path.display()
        );
    }

    let output_path = build_documentation_for_file(input, formatter, options)
        .with_context(|| format!("Failed to document: {}", input.display()))?;

    if !quiet {
        println!("{}", output_path.display());
    }

    Ok(())
}

/// Load the explicit config file, or `_hpp2md.toml` from the current directory
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Ok(Config::load_from_dir(Path::new("."))?.unwrap_or_default()),
    }
}

/// Merge defaults, config file and command line flags (flags win)
fn page_options(cli: &Cli, config: &Config) -> Result<PageOptions> {
    let defaults = PageOptions::default();
    let default_paths = PathMapping::default();
    let default_description = DescriptionOptions::default();

    let scope = if cli.all_comments {
        DescriptionScope::File
    } else {
        match &config.description.scope {
            Some(scope) => scope
                .parse::<DescriptionScope>()
                .map_err(|e: String| anyhow::anyhow!("Invalid [description] scope: {}", e))?,
            None => default_description.scope,
        }
    };

    Ok(PageOptions {
        library: cli
            .library
            .clone()
            .or_else(|| config.page.library.clone())
            .unwrap_or(defaults.library),
        language: config.page.language.clone().unwrap_or(defaults.language),
        description: DescriptionOptions {
            banner_lines: cli
                .banner_lines
                .or(config.description.banner_lines)
                .unwrap_or(default_description.banner_lines),
            scope,
        },
        paths: PathMapping {
            strip_prefix: config
                .paths
                .strip_prefix
                .clone()
                .unwrap_or(default_paths.strip_prefix),
            source_prefix: config
                .paths
                .source_prefix
                .clone()
                .unwrap_or(default_paths.source_prefix),
            output_prefix: config
                .paths
                .output_prefix
                .clone()
                .unwrap_or(default_paths.output_prefix),
            output_extension: config
                .paths
                .output_extension
                .clone()
                .unwrap_or(default_paths.output_extension),
        },
    })
}

/// Pick the synopsis formatter
fn formatter(cli: &Cli, config: &Config) -> Result<Box<dyn Formatter>> {
    if cli.no_format {
        return Ok(Box::new(Verbatim));
    }

    if let Some(command) = &cli.formatter {
        let external = ExternalFormatter::from_command_line(command)
            .with_context(|| format!("Invalid formatter command: {:?}", command))?;
        return Ok(Box::new(external));
    }

    if config.formatter.enabled == Some(false) {
        return Ok(Box::new(Verbatim));
    }

    let mut external = ExternalFormatter::default();
    if let Some(command) = &config.formatter.command {
        external.program = command.clone();
    }
    if let Some(args) = &config.formatter.args {
        external.args = args.clone();
    }
    Ok(Box::new(external))
}

/// Write a sample configuration file, or print the JSON schema
fn init_config(output: &Path, force: bool, schema: bool) -> Result<()> {
    if schema {
        println!("{}", Config::json_schema_string()?);
        return Ok(());
    }

    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            output.display()
        );
    }

    let content = Config::sample().to_toml_with_schema()?;
    fs::write(output, content)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    eprintln!("Wrote {}", output.display());

    Ok(())
}
