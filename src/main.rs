use anyhow::Result;
use dotenvy::dotenv;
use serde_json::json;
use std::path::Path;
use std::process::ExitCode;

use filegate::cli::{Cli, Commands};
use filegate::core::{AppResult, UploadConfig, init_logger, log_upload_configuration};
use filegate::files::{UploadGate, UploadReport};
use filegate::ValidationError;

/// Entry point for the upload gate CLI
///
/// # Errors
/// Returns an error if configuration or logger initialization fails.
fn main() -> Result<ExitCode> {
    let cli = Cli::parse_args();

    // Load environment variables from .env if present
    let _ = dotenv();

    let config = UploadConfig::from_env()?;
    init_logger(&config.log_level, config.log_file_path.as_deref())?;

    let gate = UploadGate::new(&config);
    log_upload_configuration(&config, gate.classifier());

    let code = match cli.command {
        Commands::Check { names, size, json } => run_check(&gate, &names, size, json)?,
        Commands::Formats { blocked, json } => run_formats(&gate, blocked, json)?,
    };
    Ok(code)
}

/// Resolves the name the platform would report and the size to check.
///
/// A local file contributes its basename and, unless `--size` was given,
/// its length on disk.
fn resolve_upload(name: &str, size: Option<u64>) -> AppResult<(String, Option<u64>)> {
    let path = Path::new(name);
    if !path.is_file() {
        return Ok((name.to_string(), size));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| name.to_string());
    let size = match size {
        Some(size) => Some(size),
        None => Some(fs_err::metadata(path)?.len()),
    };
    Ok((file_name, size))
}

fn run_check(gate: &UploadGate, names: &[String], size: Option<u64>, as_json: bool) -> AppResult<ExitCode> {
    let mut rejected = 0usize;

    for name in names {
        let (file_name, size_bytes) = resolve_upload(name, size)?;
        let outcome = match size_bytes {
            Some(bytes) => gate.inspect(&file_name, bytes),
            None => gate.inspect_name(&file_name),
        };

        if outcome.is_err() {
            rejected += 1;
        }

        if as_json {
            println!("{}", serde_json::to_string(&outcome_json(&file_name, &outcome))?);
        } else {
            print_outcome(&file_name, &outcome);
        }
    }

    log::info!("Checked {} upload(s), {} rejected", names.len(), rejected);

    Ok(if rejected == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn outcome_json(name: &str, outcome: &Result<UploadReport, ValidationError>) -> serde_json::Value {
    match outcome {
        Ok(report) => json!({
            "name": name,
            "accepted": true,
            "report": report,
        }),
        Err(err) => json!({
            "name": name,
            "accepted": false,
            "blocked": err.is_blocked(),
            "reason": err.to_string(),
        }),
    }
}

fn print_outcome(name: &str, outcome: &Result<UploadReport, ValidationError>) {
    match outcome {
        Ok(report) => {
            println!(
                "✅ {}: {} ({}) -> stored as {}",
                name, report.category, report.extension, report.stored_name
            );
            if report.is_archive {
                println!("   ⚠️  archive contents are not scanned for dangerous files");
            }
        }
        Err(err) if err.is_blocked() => println!("🚫 {}: {}", name, err),
        Err(err) => println!("❌ {}: {}", name, err),
    }
}

fn run_formats(gate: &UploadGate, blocked: bool, as_json: bool) -> AppResult<ExitCode> {
    let classifier = gate.classifier();
    let extensions = if blocked {
        classifier.list_blocked()
    } else {
        classifier.list_allowed()
    };

    if as_json {
        println!("{}", serde_json::to_string(&extensions)?);
    } else {
        let title = if blocked { "Blocked formats" } else { "Accepted formats" };
        println!("{} ({}):", title, extensions.len());
        println!("{}", extensions.join(", "));
        if !blocked {
            println!("Max upload size: {} MB", gate.max_file_size_mb());
        }
    }

    Ok(ExitCode::SUCCESS)
}
