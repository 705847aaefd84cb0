use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use vtex_css_sanitizer::analysis::{Analysis, RuleCandidate};
use vtex_css_sanitizer::config::Config;
use vtex_css_sanitizer::discovery::{FileFinder, ProjectFiles};
use vtex_css_sanitizer::refactor::{AcceptAll, FixEngine, FixPrompt, TerminalPrompt};
use vtex_css_sanitizer::report::{ReportFormat, ReportWriter, Reporter, TerminalReporter};

/// vtex-css-sanitizer - Find and remove orphaned CSS in VTEX IO store themes
#[derive(Parser, Debug)]
#[command(name = "vtex-css-sanitizer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Report CSS suffixes and blockClass values that have no counterpart
    Analyze(AnalyzeArgs),

    /// Review orphaned CSS rules one by one and delete them
    Fix(FixArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    /// Root of the store theme
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: ReportFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not write a markdown report
    #[arg(long)]
    no_report: bool,
}

#[derive(Args, Debug)]
struct FixArgs {
    /// Root of the store theme
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Delete every candidate rule without asking
    #[arg(short, long)]
    yes: bool,

    /// Dry run - list the rules that would be offered for deletion
    #[arg(long)]
    dry_run: bool,

    /// Generate undo script
    #[arg(long, value_name = "FILE")]
    undo_script: Option<PathBuf>,

    /// Do not write a markdown report
    #[arg(long)]
    no_report: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    info!("vtex-css-sanitizer v{}", env!("CARGO_PKG_VERSION"));

    match &cli.command {
        Command::Analyze(args) => run_analyze(&cli, args),
        Command::Fix(args) => run_fix(&cli, args),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli, root: &Path) -> Result<Config> {
    if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
    } else {
        Config::from_default_locations(root)
    }
}

fn check_root(path: &Path) -> Result<()> {
    if !path.is_dir() {
        return Err(miette::miette!(
            "Project directory not found: {}",
            path.display()
        ));
    }
    Ok(())
}

/// Discover files and run the two-way comparison behind a spinner
fn scan(config: &Config, root: &Path, show_progress: bool) -> Result<(ProjectFiles, Analysis)> {
    let start_time = Instant::now();

    let spinner = if show_progress {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .into_diagnostic()?,
        );
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    } else {
        ProgressBar::hidden()
    };

    spinner.set_message("Discovering files...");
    let files = FileFinder::new(config).find(root)?;
    info!(
        "Found {} block files and {} stylesheets",
        files.config_files.len(),
        files.stylesheets.len()
    );

    spinner.set_message("Cross-referencing blockClass values and CSS suffixes...");
    let analysis = Analysis::run(&files);
    spinner.finish_and_clear();
    let analysis = analysis?;

    info!("Analysis finished in {:.2}s", start_time.elapsed().as_secs_f64());
    Ok((files, analysis))
}

fn run_analyze(cli: &Cli, args: &AnalyzeArgs) -> Result<()> {
    check_root(&args.path)?;
    let config = load_config(cli, &args.path)?;

    let show_progress = !cli.quiet && args.format == ReportFormat::Terminal;
    let (files, analysis) = scan(&config, &args.path, show_progress)?;

    Reporter::new(args.format, args.output.clone(), &files.root)
        .with_config(&config.report)
        .report(&analysis)?;

    if config.report.enabled && !args.no_report {
        match ReportWriter::new(&files.root, &config.report).write_analysis(&analysis) {
            Ok(path) => {
                if args.format == ReportFormat::Terminal && !cli.quiet {
                    println!("{} {}", "Report saved to".dimmed(), path.display());
                }
            }
            Err(e) => warn!("Could not write the analysis report: {:?}", e),
        }
    }

    Ok(())
}

fn run_fix(cli: &Cli, args: &FixArgs) -> Result<()> {
    check_root(&args.path)?;
    let config = load_config(cli, &args.path)?;

    let (files, analysis) = scan(&config, &args.path, !cli.quiet)?;
    let orphans = analysis.orphan_suffixes();
    info!("{} orphaned CSS suffixes", orphans.len());

    let engine = FixEngine::new().with_undo_script(args.undo_script.is_some());

    if args.dry_run {
        let candidates = engine.preview(&files.stylesheets, orphans)?;
        print_dry_run(&files, &candidates);
        return Ok(());
    }

    let mut prompt: Box<dyn FixPrompt> = if args.yes {
        Box::new(AcceptAll)
    } else {
        Box::new(TerminalPrompt::new(&files.root))
    };

    let mut outcome = engine.run(&files.stylesheets, orphans, prompt.as_mut())?;

    if let (Some(path), Some(undo)) = (&args.undo_script, &outcome.undo_script) {
        if !undo.is_empty() {
            undo.write(path)
                .wrap_err_with(|| format!("Failed to write undo script {}", path.display()))?;
            println!(
                "{}",
                format!("Undo script written to: {}", path.display()).cyan()
            );
        }
    }

    TerminalReporter::new(&files.root).report_fix(&outcome);

    // A report failure never turns an applied fix into a failed run
    if outcome.has_entries() && config.report.enabled && !args.no_report {
        match ReportWriter::new(&files.root, &config.report).write_fix(&outcome) {
            Ok(path) => println!("{} {}", "Report saved to".dimmed(), path.display()),
            Err(e) => warn!("Could not write the fix report: {:?}", e),
        }
    }

    // Undo script and report go out first so already rewritten files stay recoverable
    match outcome.failure.take() {
        Some(error) => Err(error.wrap_err("Cleanup stopped before every stylesheet was reviewed")),
        None => Ok(()),
    }
}

fn print_dry_run(files: &ProjectFiles, candidates: &[RuleCandidate]) {
    println!();
    if candidates.is_empty() {
        println!(
            "{}",
            "✓ No CSS rules to delete. The project is already clean!".green().bold()
        );
        return;
    }

    println!("{}", "Dry run - no files will be modified".yellow().bold());
    println!();

    let mut current: Option<&Path> = None;
    for candidate in candidates {
        if current != Some(candidate.file.as_path()) {
            current = Some(candidate.file.as_path());
            println!("{}", files.relative(&candidate.file).display().to_string().cyan().bold());
        }
        println!("  {} {}", "-".red(), candidate.selectors.join(", "));
    }

    println!();
    println!(
        "{}",
        format!(
            "{} rule(s) would be offered for deletion. Run without --dry-run to review them.",
            candidates.len()
        )
        .dimmed()
    );
}
