//! CLI entry point for the `goplus` binary.

use std::env;

use anyhow::{Context, Result};
use goplus::cli::{parse_args, Command, Invocation, ParseResult, USAGE_TEXT};
use goplus::midi::{list_ports, MidiTransport};
use goplus::Session;
use midir as _;
#[cfg(test)]
use rstest as _;
use sysex_core::{FieldValue, TransactionEngine};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GOPLUS_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_values(values: &[(&str, FieldValue)]) {
    for (name, value) in values {
        println!("{name}: {value}");
    }
}

fn run(invocation: Invocation) -> Result<()> {
    let Invocation { options, command } = invocation;
    if !command.needs_device() {
        let ports = list_ports()?;
        println!("Inputs:");
        for name in &ports.inputs {
            println!("  {name}");
        }
        println!("Outputs:");
        for name in &ports.outputs {
            println!("  {name}");
        }
        return Ok(());
    }

    let transport = MidiTransport::open(options.port.as_deref()).context("opening MIDI ports")?;
    debug!(
        "connected to `{}` / `{}`",
        transport.input_name(),
        transport.output_name()
    );
    let engine = TransactionEngine::with_config(transport, options.engine_config());
    let mut session = Session::open(engine, options.model)?;

    match command {
        Command::Ports => {}
        Command::SysShow => print_values(&session.sys_show()?),
        Command::PartGet(part) => print_values(&session.part_get(part)?),
        Command::PartShow(parts) => print!("{}", session.part_show(&parts)?),
        Command::PartSet(part, settings) => {
            println!("Configuring part {part} on {}", session.device());
            session.part_set(part, &settings)?;
        }
        Command::PartPreview { part, duration } => {
            println!("Playing {}", session.patch_info(part)?);
            session.part_preview(part, duration)?;
        }
        Command::ZoneShow(zones) => print!("{}", session.zone_show(&zones)?),
        Command::ZoneSet(zone, settings) => session.zone_set(zone, &settings)?,
        Command::LoopmixSelect(style) => println!("Selected {}", session.loopmix_select(style)?),
        Command::LoopmixPlay { part, pattern } => session.loopmix_play(part, pattern)?,
        Command::LoopmixStop(part) => session.loopmix_stop(part)?,
        Command::LoopmixKey(key) => session.loopmix_key(&key)?,
        Command::LoopmixTempo(None | Some(0)) => {
            println!("Loop mix tempo: {} bpm", session.loopmix_tempo()?);
        }
        Command::LoopmixTempo(Some(delta)) => {
            let (before, after) = session.loopmix_nudge_tempo(delta)?;
            println!("Tempo changed from {before} to {after} bpm.");
        }
        Command::LoopmixExit => session.loopmix_exit()?,
    }
    Ok(())
}

fn main() {
    let exit_code = match parse_args(env::args_os().skip(1)) {
        Ok(ParseResult::Help) => {
            println!("{USAGE_TEXT}");
            0
        }
        Ok(ParseResult::Run(invocation)) => {
            init_logging(invocation.options.verbose);
            match run(invocation) {
                Ok(()) => 0,
                Err(error) => {
                    eprintln!("error: {error:#}");
                    1
                }
            }
        }
        Err(error) => {
            eprintln!("error: {error}");
            eprintln!("{USAGE_TEXT}");
            1
        }
    };

    std::process::exit(exit_code);
}
