//! list → show, plus the markup tools on their own.
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use snooper::{
    display_runs, render_runs, InspectOptions, Inspector, ModuleManifest, OutputMode,
    SnooperConfig, Theme,
};
use snooper_markup::{simplify, ColorizeOptions};

/// browse visual-control types and print the default styles assigned to them
#[derive(Parser, Debug)]
#[command(name = "snooper", version)]
pub struct CommandLineInterface {
    /// config file (falls back to $SNOOPER_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// log more; repeat for debug output
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// output mode: auto, term, text, term-debug or json
    #[arg(
        long,
        global = true,
        value_name = "MODE",
        default_value = "auto",
        value_parser = OutputMode::from_str
    )]
    output: OutputMode,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// list the styles a module offers
    List(ModuleArgs),
    /// print one style
    Show(ShowArgs),
    /// print the simplified form of a markup file ('-' reads stdin)
    Simplify {
        file: PathBuf,
    },
    /// print a markup file with syntax coloring ('-' reads stdin)
    Colorize(ColorizeArgs),
}

#[derive(Args, Debug, Clone)]
struct ModuleArgs {
    /// module manifest to browse instead of the built-in framework module
    #[arg(long, value_name = "PATH")]
    module: Option<PathBuf>,

    /// module to switch to after startup; if it has nothing to show, the
    /// first module stays loaded
    #[arg(long, value_name = "PATH")]
    alternate: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// display name from `snooper list` (defaults to the configured initial selection)
    name: Option<String>,

    #[command(flatten)]
    modules: ModuleArgs,

    /// skip the simplification rewrites
    #[arg(long)]
    raw: bool,

    /// put each attribute on its own line
    #[arg(long)]
    align_attributes: bool,
}

#[derive(Args, Debug)]
struct ColorizeArgs {
    file: PathBuf,

    /// skip the simplification rewrites
    #[arg(long)]
    raw: bool,

    /// put each attribute on its own line
    #[arg(long)]
    align_attributes: bool,
}

pub fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

impl CommandLineInterface {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }

    pub fn run(self) -> Result<()> {
        let config = SnooperConfig::locate(self.config.as_deref())
            .context("failed to load configuration")?;
        let theme = config.adaptive_theme().resolve();
        log::debug!("output mode {:?}", self.output);

        let output = match self.cmd {
            Command::List(modules) => {
                let inspector = modules.open(&config)?;
                list(&inspector, self.output)?
            }
            Command::Show(args) => show(&args, &config, &theme, self.output)?,
            Command::Simplify { file } => {
                let markup = read_input(&file)?;
                let mut simplified = simplify(&markup)
                    .with_context(|| format!("cannot simplify {}", file.display()))?;
                simplified.push('\n');
                simplified
            }
            Command::Colorize(args) => {
                let markup = read_input(&args.file)?;
                let options = InspectOptions {
                    simplify: !args.raw,
                    colorize: ColorizeOptions {
                        align_attributes: args.align_attributes || config.align_attributes,
                    },
                };
                let runs = display_runs(&markup, options)
                    .with_context(|| format!("cannot colorize {}", args.file.display()))?;
                render_runs(&runs, &theme, self.output)?
            }
        };

        print!("{output}");
        if !output.is_empty() && !output.ends_with('\n') {
            println!();
        }
        Ok(())
    }
}

impl ModuleArgs {
    fn open(&self, config: &SnooperConfig) -> Result<Inspector> {
        let module = match &self.module {
            Some(path) => ModuleManifest::load(path)?,
            None => ModuleManifest::builtin().context("built-in module is corrupt")?,
        };
        let mut inspector = Inspector::new(module, config.catalog_options())?;

        if let Some(path) = &self.alternate {
            // A failed switch is a notice, not an error.
            if let Err(err) = inspector.load_path(path) {
                eprintln!("{}", console::style(err).yellow());
            }
        }
        Ok(inspector)
    }
}

fn list(inspector: &Inspector, mode: OutputMode) -> Result<String> {
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(inspector.descriptors())?);
    }
    let use_color = mode.should_use_color();
    let mut output = String::new();
    for descriptor in inspector.descriptors() {
        let name = match descriptor.display_name.split_once('.') {
            // Auxiliary keys are dimmed down to their owner prefix.
            Some((owner, member)) if use_color => format!(
                "{}.{}",
                console::style(owner).dim().force_styling(true),
                member
            ),
            _ => descriptor.display_name.clone(),
        };
        output.push_str(&name);
        output.push('\n');
    }
    Ok(output)
}

fn show(args: &ShowArgs, config: &SnooperConfig, theme: &Theme, mode: OutputMode) -> Result<String> {
    let inspector = args.modules.open(config)?;
    let name = args
        .name
        .clone()
        .unwrap_or_else(|| config.initial_selection.clone());
    let descriptor = inspector.find(&name).with_context(|| {
        format!("no style named '{name}' in {}; see `snooper list`", inspector.module().name)
    })?;

    let mut options = config.inspect_options();
    if args.raw {
        options.simplify = false;
    }
    if args.align_attributes {
        options.colorize.align_attributes = true;
    }

    let inspection = inspector.inspect(descriptor, options);
    if mode == OutputMode::Json {
        return Ok(serde_json::to_string_pretty(&inspection)?);
    }
    Ok(render_runs(&inspection.runs, theme, mode)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut source = String::new();
        std::io::stdin()
            .read_to_string(&mut source)
            .context("failed to read stdin")?;
        return Ok(source);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
