// Command-line parsing. Plain `std::env::args()` matching over a small,
// fixed flag set; the result is either a `RunOptions` or a request for help.

use std::path::PathBuf;

use crate::error::CliError;

pub const DEFAULT_FRAMES: u64 = 600;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub frames: u64,
    pub replay: Option<PathBuf>,
    pub svg: Option<PathBuf>,
    pub midi_log: Option<PathBuf>,
    /// Overrides the config's `random_seed`.
    pub seed: Option<u64>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: None,
            frames: DEFAULT_FRAMES,
            replay: None,
            svg: None,
            midi_log: None,
            seed: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    Help,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    let mut opts = RunOptions::default();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                opts.config = Some(path_arg(&args, i, "--config")?);
            }
            "--frames" => {
                i += 1;
                opts.frames = number_arg(&args, i, "--frames")?;
            }
            "--replay" => {
                i += 1;
                opts.replay = Some(path_arg(&args, i, "--replay")?);
            }
            "--svg" => {
                i += 1;
                opts.svg = Some(path_arg(&args, i, "--svg")?);
            }
            "--midi-log" => {
                i += 1;
                opts.midi_log = Some(path_arg(&args, i, "--midi-log")?);
            }
            "--seed" => {
                i += 1;
                opts.seed = Some(number_arg(&args, i, "--seed")?);
            }
            "--help" | "-h" => return Ok(Command::Help),
            other => return Err(CliError::Usage(format!("unknown argument: {other}"))),
        }
        i += 1;
    }

    Ok(Command::Run(opts))
}

fn path_arg(args: &[String], i: usize, flag: &str) -> Result<PathBuf, CliError> {
    args.get(i)
        .map(PathBuf::from)
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a path")))
}

fn number_arg(args: &[String], i: usize, flag: &str) -> Result<u64, CliError> {
    args.get(i)
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| CliError::Usage(format!("{flag} requires a non-negative integer")))
}

pub fn print_usage() {
    println!("Usage: tessera [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <PATH>        JSON config (grid settings and knob bank)");
    println!("  --frames <N>           Frames to run (default: {DEFAULT_FRAMES})");
    println!("  --replay <FILE.mid>    Feed controller messages from a MIDI file");
    println!("  --svg <OUT.svg>        Write the last frame as SVG");
    println!("  --midi-log <OUT.mid>   Write played pad notes as a MIDI file");
    println!("  --seed <N>             Seed for the random layout");
    println!("  --help, -h             Show this help");
}
