use clap::{Parser, ValueEnum};
use colored::Colorize;
use env_logger::Env;
use log::{debug, info};
use monkeytest::app::{sanitize_config, CliFrontend, Frontend, QuietFrontend, TuiFrontend};
use monkeytest::config::{BenchmarkConfig, Settings};
use monkeytest::error::user_friendly_message;
use monkeytest::{MonkeyError, Result};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Measure sequential write and random read speed of the disk holding a
/// scratch file
#[derive(Debug, Parser)]
#[command(name = "monkeytest", version, about)]
struct Args {
    /// The file to read/write to
    #[arg(short, long)]
    file: Option<String>,

    /// Total MB to write
    #[arg(short, long, allow_negative_numbers = true)]
    size: Option<i64>,

    /// The block size for writing in KB
    #[arg(short, long, allow_negative_numbers = true)]
    write_block_size: Option<i64>,

    /// The block size for reading in bytes
    #[arg(short, long, allow_negative_numbers = true)]
    read_block_size: Option<i64>,

    /// Export the results to a JSON file instead of printing them
    #[arg(short, long)]
    json: Option<PathBuf>,

    /// How to show progress and results
    #[arg(short, long, value_enum, default_value_t = Mode::Cli)]
    mode: Mode,

    /// Overwrite an existing file without asking
    #[arg(short, long)]
    yes: bool,

    /// Hide progress output
    #[arg(long)]
    no_progress: bool,

    /// Store the resulting settings as the defaults for later runs
    #[arg(long)]
    save_settings: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    Cli,
    Tui,
    Quiet,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "Error:".red().bold(), user_friendly_message(&err));
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let mut settings = Settings::load()?;
    apply_overrides(&mut settings, &args);
    if args.save_settings {
        settings.save()?;
        info!("Settings saved");
    }

    let (config, substitutions) = sanitize_config(&settings);
    for s in &substitutions {
        let message = if s.field == "Scratch file path" {
            format!("{} is empty, assuming default value of ({})", s.field, s.replacement)
        } else {
            format!(
                "{} is smaller than or equal to 0, assuming default value of ({})",
                s.field, s.replacement
            )
        };
        eprintln!("{}", message.yellow());
    }

    if config.file_path.exists() && !args.yes && !confirm_overwrite(&config.file_path)? {
        println!("Terminated");
        return Ok(());
    }

    let json = args.json.as_deref();
    match args.mode {
        Mode::Cli => drive(CliFrontend::new(settings.show_progress), config, json).await,
        Mode::Tui => drive(TuiFrontend::new()?, config, json).await,
        Mode::Quiet => drive(QuietFrontend::new(), config, json).await,
    }
}

fn apply_overrides(settings: &mut Settings, args: &Args) {
    if let Some(file) = &args.file {
        settings.file = file.clone();
    }
    if let Some(size) = args.size {
        settings.size_mb = size;
    }
    if let Some(kb) = args.write_block_size {
        settings.write_block_kb = kb;
    }
    if let Some(bytes) = args.read_block_size {
        settings.read_block_bytes = bytes;
    }
    if args.no_progress || args.mode == Mode::Quiet {
        settings.show_progress = false;
    }
}

fn confirm_overwrite(path: &Path) -> Result<bool> {
    print!(
        "The file {} already exists and will be overwritten. Continue? [y/N] ",
        path.display()
    );
    io::stdout()
        .flush()
        .map_err(MonkeyError::io("writing the prompt"))?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(MonkeyError::io("reading the confirmation"))?;
    Ok(matches!(answer.trim(), "y" | "Y"))
}

async fn drive<F: Frontend>(
    mut frontend: F,
    config: BenchmarkConfig,
    json: Option<&Path>,
) -> Result<()> {
    let scratch = config.file_path.clone();
    let outcome = frontend.execute(config).await;
    remove_scratch(&scratch);
    let result = outcome?;

    match json {
        Some(path) => {
            frontend.finish()?;
            result.export_json(path)?;
            info!("Results exported to {}", path.display());
            eprintln!("{} {}", "Results saved to".green(), path.display());
            Ok(())
        }
        None => frontend.present(&result),
    }
}

fn remove_scratch(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!("Removed scratch file {}", path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => eprintln!(
            "{}",
            format!("Could not remove {}: {}", path.display(), e).yellow()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let args = Args::parse_from([
            "monkeytest",
            "-f",
            "/var/tmp/bench",
            "-s",
            "-3",
            "-w",
            "256",
            "--no-progress",
            "--save-settings",
        ]);
        assert!(args.save_settings);

        let mut settings = Settings::default();
        apply_overrides(&mut settings, &args);
        assert_eq!(settings.file, "/var/tmp/bench");
        assert_eq!(settings.size_mb, -3);
        assert_eq!(settings.write_block_kb, 256);
        assert_eq!(settings.read_block_bytes, Settings::default().read_block_bytes);
        assert!(!settings.show_progress);
    }

    #[test]
    fn test_save_settings_defaults_off() {
        let args = Args::parse_from(["monkeytest", "-m", "quiet"]);
        assert!(!args.save_settings);
        assert_eq!(args.mode, Mode::Quiet);
    }
}
