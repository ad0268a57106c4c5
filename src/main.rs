use anyhow::{Context, Result};
use clap::Parser;
use psched_tick::{
    calculator::TickCalculator,
    cli::{Cli, OutputFormat},
    convert::{format_time, UNDEFINED_TIME},
    report::TickReport,
};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn print_text(report: &TickReport, ticks: Option<u32>) {
    println!("{}", report);
    if let Some(ticks) = ticks {
        let time = report
            .ticks_to_usec(ticks)
            .map_or_else(|| UNDEFINED_TIME.to_string(), format_time);
        println!("ticks={},time={}", ticks, time);
    }
}

fn print_json(report: &TickReport, ticks: Option<u32>) -> Result<()> {
    let json = report
        .to_json(ticks)
        .context("Failed to serialize tick report")?;
    println!("{}", json);
    Ok(())
}

fn run(args: Cli) -> Result<()> {
    let calculator = TickCalculator::new(args.source);
    let report = calculator
        .compute()
        .with_context(|| format!("Failed to derive tick from {}", calculator.source().display()))?;

    match args.format {
        OutputFormat::Text => print_text(&report, args.ticks),
        OutputFormat::Json => print_json(&report, args.ticks)?,
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Cli::parse();

    init_tracing(args.debug);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Nothing has reached stdout on this path
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<psched_tick::error::TickError>()
                .map_or(1, |err| err.exit_code());
            ExitCode::from(code)
        }
    }
}
