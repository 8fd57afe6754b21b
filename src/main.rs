/*!
 * Command-line interface for repodump
 */

use std::io::{self, Write};
use std::process;
use std::time::Instant;

use clap::{CommandFactory, Parser};

use repodump::clipboard::copy_to_clipboard;
use repodump::config::{Args, Config};
use repodump::report::{ReportFormat, Reporter, ScanReport};
use repodump::writer::open_sink;
use repodump::{dump, RepoDumpError, Result};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "repodump", &mut io::stdout());
        return;
    }

    setup_logging(args.quiet, args.verbose);

    if let Err(e) = run(Config::from_args(args)) {
        log::debug!("Run failed: {:?}", e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
}

fn run(config: Config) -> Result<()> {
    // Nothing is written before the target is known to be usable
    config.validate()?;

    let start_time = Instant::now();
    log::info!("Dumping {}", config.target_dir.display());

    // Opened before the walk so the output file can be recognized and skipped
    let mut sink = open_sink(config.output_file.as_deref())?;

    let summary = if config.clip {
        let mut buffer = Vec::new();
        let summary = dump(&config, &mut buffer)?;
        sink.write_all(&buffer)?;
        sink.flush()?;

        let text = String::from_utf8_lossy(&buffer);
        if let Err(e) = copy_to_clipboard(&text).map_err(RepoDumpError::from) {
            log::warn!("{}", e);
        }
        summary
    } else {
        dump(&config, &mut sink)?
    };
    drop(sink);

    let duration = start_time.elapsed();
    log::info!(
        "Wrote {} files in {:.2?}",
        summary.files.len(),
        duration
    );

    if let Some(output_file) = &config.output_file {
        if !config.quiet {
            let report = ScanReport {
                output_file: output_file.display().to_string(),
                duration,
                summary,
            };
            Reporter::new(ReportFormat::ConsoleTable).print_report(&report);
        }
    }

    Ok(())
}
