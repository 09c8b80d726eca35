//! Email Forge - plausible email addresses from a person's name
//!
//! Generates one email, a batch, or duplicate statistics for a name pair.

use anyhow::Context;
use email_forge::{
    batch::{BatchConfig, BatchGenerator, BatchOutput},
    EmailForgeError, EmailSynthesizer, Settings, VERSION,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Log filter variable for the binary
const LOG_ENV_VAR: &str = "EMAIL_FORGE_LOG";

/// Parsed command line
#[derive(Debug, Default)]
struct CliArgs {
    names: Vec<String>,
    count: Option<usize>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    workers: Option<usize>,
    stats: bool,
    json: bool,
    print_settings: bool,
    output: Option<PathBuf>,
}

enum Command {
    Help,
    Version,
    Run(CliArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize the library
    if let Err(e) = email_forge::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args) {
        Ok(Command::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Command::Version) => {
            println!("email-forge {}", VERSION);
            return Ok(());
        }
        Ok(Command::Run(cli)) => cli,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(2);
        }
    };

    if let Err(e) = run_email_forge(cli).await {
        match e.downcast_ref::<EmailForgeError>() {
            Some(err) => eprintln!("{}", err.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn parse_args(args: &[String]) -> email_forge::Result<Command> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-V" | "--version" => return Ok(Command::Version),
            "-n" | "--count" => cli.count = Some(parse_value(arg, iter.next())?),
            "--seed" => cli.seed = Some(parse_value(arg, iter.next())?),
            "--workers" => cli.workers = Some(parse_value(arg, iter.next())?),
            "--config" => cli.config = Some(PathBuf::from(require_value(arg, iter.next())?)),
            "--output" | "-o" => cli.output = Some(PathBuf::from(require_value(arg, iter.next())?)),
            "--stats" => cli.stats = true,
            "--json" => cli.json = true,
            "--print-settings" => cli.print_settings = true,
            flag if flag.starts_with('-') => {
                return Err(EmailForgeError::cli(format!("Unknown option '{}'", flag)));
            }
            word => cli.names.push(word.to_string()),
        }
    }

    if cli.count == Some(0) {
        return Err(EmailForgeError::cli("--count must be at least 1"));
    }
    if cli.workers == Some(0) {
        return Err(EmailForgeError::cli("--workers must be at least 1"));
    }

    Ok(Command::Run(cli))
}

fn require_value<'a>(flag: &str, value: Option<&'a String>) -> email_forge::Result<&'a str> {
    value
        .map(String::as_str)
        .ok_or_else(|| EmailForgeError::cli(format!("Option '{}' needs a value", flag)))
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> email_forge::Result<T> {
    let raw = require_value(flag, value)?;
    raw.parse()
        .map_err(|_| EmailForgeError::cli(format!("Invalid value '{}' for '{}'", raw, flag)))
}

/// Main email forge workflow
async fn run_email_forge(cli: CliArgs) -> anyhow::Result<()> {
    let settings = match &cli.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::from_env()?,
    };

    if cli.print_settings {
        println!("{}", settings.to_json_pretty()?);
        return Ok(());
    }

    let (name, surname) = resolve_names(&cli.names)?;
    let synthesizer = EmailSynthesizer::new(settings)?;

    let mut config = BatchConfig {
        count: cli.count.unwrap_or(1),
        seed: cli.seed,
        ..Default::default()
    };
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }
    let count = config.count;
    let generator = BatchGenerator::new(synthesizer, config);

    let bar = if count > 1 {
        let bar = ProgressBar::new(count as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let sink = bar.clone();
    let output = generator
        .run(&name, &surname, move |done| sink.set_position(done))
        .await?;
    bar.finish_and_clear();

    if let Some(path) = &cli.output {
        output
            .save(path)
            .with_context(|| format!("saving batch to {}", path.display()))?;
        eprintln!("💾 Saved {} emails to {}", output.emails.len(), path.display());
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&output.report)?);
    } else if cli.stats {
        display_stats(&output);
    } else if cli.output.is_none() {
        for email in &output.emails {
            println!("{}", email);
        }
    }

    Ok(())
}

/// Take names from the command line, prompting for whatever is missing
fn resolve_names(words: &[String]) -> anyhow::Result<(String, String)> {
    let name = match words.first() {
        Some(name) => name.clone(),
        None => inquire::Text::new("First name:").prompt()?,
    };

    let surname = if words.len() > 1 {
        words[1..].join(" ")
    } else {
        inquire::Text::new("Last name:").prompt()?
    };

    Ok((name, surname))
}

/// Display batch statistics
fn display_stats(output: &BatchOutput) {
    let report = &output.report;
    eprintln!("📊 {} {}", report.name, report.surname);
    eprintln!("   📧 Generated: {}", report.count);
    eprintln!("   ✨ Unique: {}", report.unique);
    eprintln!("   🔁 Duplicates: {}", report.duplicates);
    eprintln!("   ⏱️  Time: {}ms ({:.0} emails/s)", report.elapsed_ms, report.emails_per_second());
    println!("{:.2}% duplicates", report.duplicate_proportion * 100.0);
}

/// Print help information
fn print_help() {
    println!("📧 Email Forge - plausible email addresses from a name");
    println!("═══════════════════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    email-forge [FIRST] [LAST...] [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --count <N>      Number of emails to generate (default: 1)");
    println!("        --seed <S>       Seed for reproducible output");
    println!("        --config <FILE>  Settings file (JSON)");
    println!("        --workers <W>    Concurrent batch workers");
    println!("        --stats          Print duplicate statistics instead of emails");
    println!("        --json           Print the batch report as JSON");
    println!("    -o, --output <FILE>  Save emails and report as JSON");
    println!("        --print-settings Print the effective settings as JSON and exit");
    println!("    -h, --help           Print help");
    println!("    -V, --version        Print version");
    println!();
    println!("EXAMPLES:");
    println!("    email-forge maria carreras                # One email");
    println!("    email-forge john de la cruz -n 20         # Twenty emails, multi-part surname");
    println!("    email-forge maria carreras -n 100000 --stats --seed 7");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    EMAIL_FORGE_CONFIG  Default settings file");
    println!("    EMAIL_FORGE_LOG     Log filter (default: warn)");
}
