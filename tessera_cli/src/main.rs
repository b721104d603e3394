// CLI entry point for Tessera, the headless grid driver.
//
// Builds a grid from a settings file, runs the frame loop for a fixed number
// of frames, optionally feeding controller input from a MIDI file, and
// writes the last frame as SVG and the played pad notes as a MIDI log.
// See `session.rs` for the frame loop.
//
// Usage:
//   tessera [OPTIONS]
//     --config <PATH>        JSON settings (grid fields, optional "knobs")
//     --frames <N>           Frames to run (default: 600)
//     --replay <FILE.mid>    Controller input to replay
//     --svg <OUT.svg>        Write the last frame as SVG
//     --midi-log <OUT.mid>   Write played notes as MIDI
//     --seed <N>             Seed for the random layout
//
// Logging goes to stderr through `tracing-subscriber`; set `RUST_LOG` to
// change the level (default `info`).

mod args;
mod error;
mod replay;
mod session;
mod settings;
mod svg;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use args::{Command, parse_args, print_usage};

fn main() {
    init_tracing();

    let opts = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(opts)) => opts,
        Ok(Command::Help) => {
            print_usage();
            return;
        }
        Err(e) => {
            eprintln!("{e}");
            print_usage();
            std::process::exit(1);
        }
    };

    match session::run(&opts) {
        Ok(summary) => {
            println!(
                "{} frames, {} messages, {} notes, {} lit pads, {} shaped tiles, method {}, ease {}",
                summary.frames,
                summary.messages,
                summary.notes,
                summary.lit_pads,
                summary.shaped_tiles,
                summary.method,
                summary.ease_type,
            );
        }
        Err(e) => {
            eprintln!("tessera: {e}");
            std::process::exit(1);
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
