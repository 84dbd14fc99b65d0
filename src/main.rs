//! `splinex FILENAME [OPTIONS]`
//!
//! Extracts every body of a B-rep model into a NURBS surface document.
//! OPTIONS is a `key=value;key=value` string, run without arguments to list them.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use splinex::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_target(false)
        .init();

    match run() {
        Ok(code) => code,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} FILENAME OPTIONS\n", program);
    eprintln!("Available options:");
    Config::options().iter().for_each(|option| {
        eprintln!(
            "  - {}: {} (default: '{}')",
            option.key, option.description, option.default
        );
    });
    eprintln!(
        "\nExample: {} my_model.json \"normalize=false;trims=true\"",
        program
    );
}

fn run() -> anyhow::Result<ExitCode> {
    let args: Vec<String> = std::env::args().collect();
    log::info!("splinex {}: spline geometry extractor", env!("CARGO_PKG_VERSION"));

    if !(2..=3).contains(&args.len()) {
        print_usage(args.first().map(String::as_str).unwrap_or("splinex"));
        return Ok(ExitCode::FAILURE);
    }
    let input = PathBuf::from(&args[1]);
    let config = match args.get(2) {
        Some(options) => Config::parse(options).context("Invalid options")?,
        None => Config::default(),
    };
    if config.show_config {
        log::info!("Using configuration:\n{}", config);
    }

    let mut kernel = MemoryKernel::open(&input)
        .with_context(|| format!("Cannot load model '{}'", input.display()))?;

    if let Some(license) = config.license()? {
        match kernel.unlock(&license)? {
            UnlockStatus::Pass => {}
            UnlockStatus::PassWithWarning(message) => {
                if config.acis_warnings {
                    log::warn!("License warning: {}", message);
                }
            }
            UnlockStatus::Fail(message) => {
                log::error!("License error: {}", message);
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    let mut assembler = Assembler::new(&mut kernel, &config)?;
    let entity_count = assembler.entity_count();
    let mut failed = false;
    for body_index in 0..entity_count {
        let document = assembler
            .assemble_body(body_index)
            .with_context(|| format!("Kernel encountered a critical error on Body #{}", body_index))?;

        let path = output_path(&input, body_index, entity_count);
        match write_document(&path, &document) {
            Ok(()) => log::info!(
                "Data was extracted to file '{}' successfully",
                path.display()
            ),
            Err(err) => {
                log::error!("{}", err);
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
