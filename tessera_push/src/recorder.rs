// Note recorder: an `AudioSink` that captures pad notes and writes them as a
// Standard MIDI File.
//
// Notes are stamped with the frame they were played on. On export, frames
// map to ticks through the frame rate and a fixed tempo:
//
//   tick = frame / fps · (bpm / 60) · TICKS_PER_QUARTER
//
// Output is SMF Format 0: one track holding the track name, the tempo, and
// note-on/note-off pairs on channel 1. At equal ticks, note-offs sort before
// note-ons so a retriggered pad sounds again instead of being cut off.

use midly::num::{u4, u7, u15, u24, u28};
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind};
use std::path::Path;

use crate::audio::{AudioSink, NoteLength};
use crate::error::OutputError;

pub const TICKS_PER_QUARTER: u16 = 480;
pub const DEFAULT_TEMPO_BPM: u32 = 120;
/// Slowest tempo whose microseconds-per-quarter still fits in 24 bits.
const MIN_TEMPO_BPM: u32 = 4;
const NOTE_VELOCITY: u8 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedNote {
    pub frame: u64,
    pub note: u8,
    pub length: NoteLength,
}

#[derive(Clone, Debug)]
pub struct NoteRecorder {
    fps: f64,
    tempo_bpm: u32,
    frame: u64,
    notes: Vec<RecordedNote>,
}

impl NoteRecorder {
    pub fn new(fps: f64, tempo_bpm: u32) -> Self {
        let fps = if fps.is_finite() && fps > 0.0 { fps } else { 60.0 };
        Self {
            fps,
            tempo_bpm: tempo_bpm.max(MIN_TEMPO_BPM),
            frame: 0,
            notes: Vec::new(),
        }
    }

    /// Stamp subsequent notes with `frame`.
    pub fn set_frame(&mut self, frame: u64) {
        self.frame = frame;
    }

    pub fn notes(&self) -> &[RecordedNote] {
        &self.notes
    }

    fn frame_to_tick(&self, frame: u64) -> u32 {
        let beats = frame as f64 / self.fps * f64::from(self.tempo_bpm) / 60.0;
        (beats * f64::from(TICKS_PER_QUARTER)).round() as u32
    }

    /// Build the in-memory SMF.
    pub fn to_smf(&self) -> Smf<'static> {
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(TICKS_PER_QUARTER)),
        ));

        let mut track: Track<'static> = Vec::new();
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Tessera pads")),
        });
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(
                60_000_000 / self.tempo_bpm,
            ))),
        });

        // (tick, is_note_on, key)
        let mut events: Vec<(u32, bool, u8)> = Vec::with_capacity(self.notes.len() * 2);
        for n in &self.notes {
            let start = self.frame_to_tick(n.frame);
            let end = start + n.length.ticks(u32::from(TICKS_PER_QUARTER));
            events.push((start, true, n.note));
            events.push((end, false, n.note));
        }
        events.sort_by_key(|&(tick, on, _)| (tick, on));

        let channel = u4::new(0);
        let mut last_tick = 0;
        for (tick, on, key) in events {
            let message = if on {
                MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(NOTE_VELOCITY),
                }
            } else {
                MidiMessage::NoteOff {
                    key: u7::new(key),
                    vel: u7::new(0),
                }
            };
            track.push(TrackEvent {
                delta: u28::new(tick - last_tick),
                kind: TrackEventKind::Midi { channel, message },
            });
            last_tick = tick;
        }

        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        });
        smf.tracks.push(track);
        smf
    }

    /// Encode as SMF bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, OutputError> {
        let mut buf = Vec::new();
        self.to_smf().write_std(&mut buf)?;
        Ok(buf)
    }

    pub fn write(&self, path: &Path) -> Result<(), OutputError> {
        std::fs::write(path, self.to_bytes()?)?;
        tracing::info!(path = %path.display(), notes = self.notes.len(), "wrote MIDI log");
        Ok(())
    }
}

impl AudioSink for NoteRecorder {
    fn play_note(&mut self, note: u8, length: NoteLength) -> Result<(), OutputError> {
        self.notes.push(RecordedNote {
            frame: self.frame,
            note,
            length,
        });
        Ok(())
    }
}
