// MIDI replay: schedules the channel messages of a Standard MIDI File onto
// frame numbers, so a recorded controller session can drive a headless run.
//
// Tracks are merged by absolute tick and walked once, accumulating seconds
// through the tempo map (500 000 µs per quarter until the first tempo
// event). Metrical files convert ticks with the file's ticks-per-quarter;
// timecode files with frames-per-second × subframes. A message lands on
// `round(seconds · fps)`. Meta and SysEx events are dropped; every channel
// message is re-encoded as raw bytes for the controller inbox. Format 2
// (sequential) files are merged the same way, with a warning.

use midly::live::LiveEvent;
use midly::{Format, MetaMessage, Smf, Timing, TrackEventKind};
use std::path::Path;

use crate::error::CliError;

const DEFAULT_TEMPO_US_PER_QUARTER: f64 = 500_000.0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScheduledMessage {
    pub frame: u64,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default)]
pub struct Replay {
    messages: Vec<ScheduledMessage>,
    cursor: usize,
}

impl Replay {
    pub fn load(path: &Path, fps: f64) -> Result<Self, CliError> {
        let bytes = std::fs::read(path).map_err(|source| CliError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let replay = Self::from_bytes(&bytes, fps).map_err(|source| CliError::Midi {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            messages = replay.messages.len(),
            last_frame = replay.last_frame(),
            "loaded replay"
        );
        Ok(replay)
    }

    pub fn from_bytes(bytes: &[u8], fps: f64) -> Result<Self, midly::Error> {
        let smf = Smf::parse(bytes)?;
        Ok(Self::from_smf(&smf, fps))
    }

    pub fn from_smf(smf: &Smf<'_>, fps: f64) -> Self {
        if smf.header.format == Format::Sequential && smf.tracks.len() > 1 {
            tracing::warn!(
                tracks = smf.tracks.len(),
                "sequential MIDI file: tracks are merged as if played together"
            );
        }
        // (absolute tick, event); the sort is stable, so same-tick events
        // keep their track order.
        let mut events = Vec::new();
        for track in &smf.tracks {
            let mut tick = 0u64;
            for ev in track {
                tick += u64::from(ev.delta.as_int());
                events.push((tick, ev.kind));
            }
        }
        events.sort_by_key(|&(tick, _)| tick);

        let mut tempo = DEFAULT_TEMPO_US_PER_QUARTER;
        let mut seconds = 0.0;
        let mut last_tick = 0u64;
        let mut messages = Vec::new();
        for (tick, kind) in events {
            seconds += ticks_to_seconds(smf.header.timing, tick - last_tick, tempo);
            last_tick = tick;
            match kind {
                TrackEventKind::Meta(MetaMessage::Tempo(t)) => {
                    tempo = f64::from(t.as_int());
                }
                TrackEventKind::Midi { channel, message } => {
                    let event = LiveEvent::Midi { channel, message };
                    let mut bytes = Vec::with_capacity(3);
                    if let Err(e) = event.write_std(&mut bytes) {
                        tracing::warn!("skipping unencodable replay message: {e}");
                        continue;
                    }
                    messages.push(ScheduledMessage {
                        frame: (seconds * fps).round().max(0.0) as u64,
                        bytes,
                    });
                }
                _ => {}
            }
        }

        Self {
            messages,
            cursor: 0,
        }
    }

    /// Messages scheduled at or before `frame` not yet handed out.
    pub fn due(&mut self, frame: u64) -> &[ScheduledMessage] {
        let start = self.cursor;
        while self
            .messages
            .get(self.cursor)
            .is_some_and(|m| m.frame <= frame)
        {
            self.cursor += 1;
        }
        &self.messages[start..self.cursor]
    }

    pub fn messages(&self) -> &[ScheduledMessage] {
        &self.messages
    }

    pub fn last_frame(&self) -> u64 {
        self.messages.last().map_or(0, |m| m.frame)
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.messages.len()
    }
}

fn ticks_to_seconds(timing: Timing, ticks: u64, tempo_us_per_quarter: f64) -> f64 {
    let ticks = ticks as f64;
    match timing {
        Timing::Metrical(tpq) => {
            let tpq = f64::from(tpq.as_int().max(1));
            ticks / tpq * tempo_us_per_quarter / 1_000_000.0
        }
        Timing::Timecode(fps, subframe) => {
            let per_second = f64::from(fps.as_f32()) * f64::from(subframe.max(1));
            ticks / per_second
        }
    }
}
