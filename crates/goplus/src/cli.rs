//! Command-line parsing for the `goplus` binary.

use std::ffi::OsString;
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

use sysex_core::{DeviceKind, EngineConfig};

use crate::commands::{
    PartSettings, PatchSelection, ZoneSettings, DEFAULT_PREVIEW, LOOPMIX_PARTS, LOOPMIX_PATTERNS,
};
use crate::tables::{key_index, loopmix_key_index, LOOPMIX_STYLES};

/// Help text printed for `-h`/`--help`.
pub const USAGE_TEXT: &str = "\
Usage: goplus [options] <command> [<subcommand>] [args]

GO:KEYS and GO:PIANO sound management tool.

Commands:
  ports                                   List MIDI input and output ports
  sys show                                Show setup and system parameters
  part get <PART>                         Show every parameter of a part
  part show [<PART>...]                   Summarise parts (default: all)
  part set <PART> [--patch MSB,LSB,PC] [--channel CHAN] [--level LEVEL]
           [--octave-shift SHIFT]         Change part settings
  part preview <PART> [--duration SECS]   Play a part's demo sound
  zone show [<ZONE>...]                   Summarise zones (default: all)
  zone set <ZONE> [--octave-shift SHIFT] [--on|--off] [--low-key KEY]
           [--high-key KEY]               Change zone settings
  loopmix select <STYLE>                  Select loop-mix style (1-22)
  loopmix play <PART> <PATTERN>           Play a loop-mix part (1-5) pattern (1-11)
  loopmix stop [<PART>]                   Stop one loop-mix part, or all
  loopmix key <KEY>                       Set loop-mix key (C, C#, D, Eb, ...)
  loopmix tempo [<DELTA>]                 Show or nudge the loop-mix tempo
  loopmix exit                            Leave loop-mix mode

Options:
  -p, --port <NAME>     MIDI port name substring (default: first available)
      --model <GK|GP>   Device model (default: auto-detect)
      --timeout-ms <MS> Reply timeout, 0 waits forever (default: 2000)
  -v, --verbose         Log every SysEx transaction
  -h, --help            Show this help message

Examples:
  goplus part show 1 2 3
  goplus --model GK part set 1 --patch 87,64,1 --level 100
  goplus zone set 2 --on --low-key C4 --high-key G9
";

/// Options accepted before the command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalOptions {
    /// MIDI port name substring.
    pub port: Option<String>,
    /// Model, or `None` to auto-detect.
    pub model: Option<DeviceKind>,
    /// Reply timeout override; `Some(None)` waits forever.
    pub timeout: Option<Option<Duration>>,
    /// Debug logging.
    pub verbose: bool,
}

impl GlobalOptions {
    /// Engine configuration implied by the options.
    #[must_use]
    pub fn engine_config(&self) -> EngineConfig {
        self.timeout.map_or_else(EngineConfig::default, |reply_timeout| EngineConfig {
            reply_timeout,
        })
    }
}

/// Operation selected on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List MIDI ports.
    Ports,
    /// Show system blocks.
    SysShow,
    /// Show every parameter of one part.
    PartGet(u32),
    /// Summarise parts.
    PartShow(Vec<u32>),
    /// Change part settings.
    PartSet(u32, PartSettings),
    /// Play a part's demo sound.
    PartPreview {
        /// Part number.
        part: u32,
        /// Preview length.
        duration: Duration,
    },
    /// Summarise zones.
    ZoneShow(Vec<u32>),
    /// Change zone settings.
    ZoneSet(u32, ZoneSettings),
    /// Select a loop-mix style.
    LoopmixSelect(u8),
    /// Play a loop-mix pattern.
    LoopmixPlay {
        /// Loop-mix part.
        part: u8,
        /// Pattern variation.
        pattern: u8,
    },
    /// Stop one or all loop-mix parts.
    LoopmixStop(Option<u8>),
    /// Change the loop-mix key.
    LoopmixKey(String),
    /// Show or nudge the loop-mix tempo.
    LoopmixTempo(Option<i32>),
    /// Leave loop-mix mode.
    LoopmixExit,
}

impl Command {
    /// Whether the command talks to a device at all.
    #[must_use]
    pub const fn needs_device(&self) -> bool {
        !matches!(self, Self::Ports)
    }
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Global options.
    pub options: GlobalOptions,
    /// Selected command.
    pub command: Command,
}

/// Outcome of argument parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseResult {
    /// Run a command.
    Run(Invocation),
    /// Print help and exit.
    Help,
}

/// Parses arguments, excluding the program name.
///
/// # Errors
///
/// Returns a message describing the first invalid argument.
pub fn parse_args(args: impl Iterator<Item = OsString>) -> Result<ParseResult, String> {
    let args: Vec<String> = args.map(|arg| arg.to_string_lossy().into_owned()).collect();
    let mut args = args.into_iter().peekable();
    let mut options = GlobalOptions::default();

    while let Some(arg) = args.next_if(|arg| arg.starts_with('-')) {
        match arg.as_str() {
            "-h" | "--help" => return Ok(ParseResult::Help),
            "-v" | "--verbose" => options.verbose = true,
            "-p" | "--port" => options.port = Some(value_of(&arg, args.next())?),
            "--model" => {
                let value = value_of(&arg, args.next())?;
                options.model = Some(value.parse::<DeviceKind>()?);
            }
            "--timeout-ms" => {
                let value = value_of(&arg, args.next())?;
                let millis: u64 = parse_in("timeout", &value, 0..=u64::MAX)?;
                options.timeout = Some((millis > 0).then(|| Duration::from_millis(millis)));
            }
            other => return Err(format!("unknown option: {other}")),
        }
    }

    let command = args.next().ok_or_else(|| "missing command".to_string())?;
    let rest: Vec<String> = args.collect();
    if rest.iter().any(|arg| arg == "-h" || arg == "--help") {
        return Ok(ParseResult::Help);
    }

    let command = match command.as_str() {
        "ports" => {
            no_more(&rest)?;
            Command::Ports
        }
        "sys" => parse_sys(&rest)?,
        "part" => parse_part(&rest)?,
        "zone" => parse_zone(&rest)?,
        "loopmix" => parse_loopmix(&rest)?,
        other => return Err(format!("unknown command: {other}")),
    };
    Ok(ParseResult::Run(Invocation { options, command }))
}

fn parse_sys(args: &[String]) -> Result<Command, String> {
    match split_subcommand("sys", args)? {
        ("show", rest) => no_more(rest).map(|()| Command::SysShow),
        (other, _) => Err(format!("unknown sys subcommand: {other}")),
    }
}

fn parse_part(args: &[String]) -> Result<Command, String> {
    let (subcommand, rest) = split_subcommand("part", args)?;
    match subcommand {
        "get" => {
            let (part, rest) = unit_argument("part", rest)?;
            no_more(rest)?;
            Ok(Command::PartGet(part))
        }
        "show" => unit_list("part", rest).map(Command::PartShow),
        "set" => {
            let (part, rest) = unit_argument("part", rest)?;
            let mut settings = PartSettings::default();
            let mut options = rest.iter();
            while let Some(option) = options.next() {
                let value = value_of(option, options.next().cloned())?;
                match option.as_str() {
                    "--patch" => settings.patch = Some(value.parse::<PatchSelection>()?),
                    "--channel" => settings.channel = Some(parse_in("channel", &value, 1..=16)?),
                    "--level" => settings.level = Some(parse_in("level", &value, 0..=127)?),
                    "--octave-shift" => {
                        settings.octave_shift = Some(parse_in("octave shift", &value, -3..=3)?);
                    }
                    other => return Err(format!("unknown option: {other}")),
                }
            }
            Ok(Command::PartSet(part, settings))
        }
        "preview" => {
            let (part, rest) = unit_argument("part", rest)?;
            let mut duration = DEFAULT_PREVIEW;
            let mut options = rest.iter();
            while let Some(option) = options.next() {
                let value = value_of(option, options.next().cloned())?;
                match option.as_str() {
                    "--duration" => {
                        duration = Duration::from_secs(parse_in("duration", &value, 0..=3600)?);
                    }
                    other => return Err(format!("unknown option: {other}")),
                }
            }
            Ok(Command::PartPreview { part, duration })
        }
        other => Err(format!("unknown part subcommand: {other}")),
    }
}

fn parse_zone(args: &[String]) -> Result<Command, String> {
    let (subcommand, rest) = split_subcommand("zone", args)?;
    match subcommand {
        "show" => unit_list("zone", rest).map(Command::ZoneShow),
        "set" => {
            let (zone, rest) = unit_argument("zone", rest)?;
            let mut settings = ZoneSettings::default();
            let mut options = rest.iter();
            while let Some(option) = options.next() {
                match option.as_str() {
                    "--on" | "--off" => {
                        if settings.enabled.is_some() {
                            return Err("--on and --off are mutually exclusive".to_string());
                        }
                        settings.enabled = Some(option == "--on");
                    }
                    "--octave-shift" => {
                        let value = value_of(option, options.next().cloned())?;
                        settings.octave_shift = Some(parse_in("octave shift", &value, -3..=3)?);
                    }
                    "--low-key" | "--high-key" => {
                        let value = value_of(option, options.next().cloned())?;
                        if key_index(&value).is_none() {
                            return Err(format!("unknown key: {value}"));
                        }
                        if option == "--low-key" {
                            settings.low_key = Some(value);
                        } else {
                            settings.high_key = Some(value);
                        }
                    }
                    other => return Err(format!("unknown option: {other}")),
                }
            }
            Ok(Command::ZoneSet(zone, settings))
        }
        other => Err(format!("unknown zone subcommand: {other}")),
    }
}

fn parse_loopmix(args: &[String]) -> Result<Command, String> {
    let (subcommand, rest) = split_subcommand("loopmix", args)?;
    let max_style = u8::try_from(LOOPMIX_STYLES.len()).unwrap_or(u8::MAX);
    match (subcommand, rest) {
        ("select", [style]) => parse_in("style", style, 1..=max_style).map(Command::LoopmixSelect),
        ("play", [part, pattern]) => Ok(Command::LoopmixPlay {
            part: parse_in("loop-mix part", part, 1..=LOOPMIX_PARTS)?,
            pattern: parse_in("pattern", pattern, 1..=LOOPMIX_PATTERNS)?,
        }),
        ("stop", []) => Ok(Command::LoopmixStop(None)),
        ("stop", [part]) => parse_in("loop-mix part", part, 1..=LOOPMIX_PARTS)
            .map(|part| Command::LoopmixStop(Some(part))),
        ("key", [key]) => {
            if loopmix_key_index(key).is_none() {
                return Err(format!("unknown loop-mix key: {key}"));
            }
            Ok(Command::LoopmixKey(key.clone()))
        }
        ("tempo", []) => Ok(Command::LoopmixTempo(None)),
        ("tempo", [delta]) => parse_in("tempo delta", delta, -200..=200)
            .map(|delta| Command::LoopmixTempo(Some(delta))),
        ("exit", []) => Ok(Command::LoopmixExit),
        ("select" | "play" | "stop" | "key" | "tempo" | "exit", _) => {
            Err(format!("wrong number of arguments for loopmix {subcommand}"))
        }
        (other, _) => Err(format!("unknown loopmix subcommand: {other}")),
    }
}

fn split_subcommand<'a>(
    command: &str,
    args: &'a [String],
) -> Result<(&'a str, &'a [String]), String> {
    args.split_first()
        .map(|(first, rest)| (first.as_str(), rest))
        .ok_or_else(|| format!("missing {command} subcommand"))
}

fn unit_argument<'a>(unit: &str, args: &'a [String]) -> Result<(u32, &'a [String]), String> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| format!("missing {unit} number"))?;
    Ok((parse_in(unit, first, 1..=16)?, rest))
}

fn unit_list(unit: &str, args: &[String]) -> Result<Vec<u32>, String> {
    args.iter().map(|arg| parse_in(unit, arg, 1..=16)).collect()
}

fn value_of(option: &str, value: Option<String>) -> Result<String, String> {
    value.ok_or_else(|| format!("missing value for {option}"))
}

fn no_more(args: &[String]) -> Result<(), String> {
    args.first()
        .map_or(Ok(()), |extra| Err(format!("unexpected argument: {extra}")))
}

fn parse_in<T>(what: &str, value: &str, range: RangeInclusive<T>) -> Result<T, String>
where
    T: FromStr + PartialOrd + Display,
{
    let parsed = value
        .parse::<T>()
        .map_err(|_| format!("invalid {what}: {value}"))?;
    if range.contains(&parsed) {
        Ok(parsed)
    } else {
        Err(format!(
            "{what} {value} is outside {}..={}",
            range.start(),
            range.end()
        ))
    }
}
