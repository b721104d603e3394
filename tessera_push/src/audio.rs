// Note output triggered by pad presses.
//
// Every pad press plays the pad's MIDI note for a sixteenth note. Synthesis
// is someone else's problem: `AudioSink` only receives `(note, length)`.
// See `recorder.rs` for the sink that captures notes into a MIDI file.

use std::fmt;

use crate::error::OutputError;

/// Note length as a fraction of a whole note, named the way sequencers do
/// (`"16n"` for a sixteenth).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoteLength {
    Quarter,
    Eighth,
    Sixteenth,
}

impl NoteLength {
    /// Length in MIDI ticks at the given resolution.
    pub fn ticks(self, ticks_per_quarter: u32) -> u32 {
        match self {
            NoteLength::Quarter => ticks_per_quarter,
            NoteLength::Eighth => ticks_per_quarter / 2,
            NoteLength::Sixteenth => ticks_per_quarter / 4,
        }
    }
}

impl fmt::Display for NoteLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NoteLength::Quarter => "4n",
            NoteLength::Eighth => "8n",
            NoteLength::Sixteenth => "16n",
        })
    }
}

/// Length used for pad feedback notes.
pub const PAD_NOTE_LENGTH: NoteLength = NoteLength::Sixteenth;

pub trait AudioSink {
    fn play_note(&mut self, note: u8, length: NoteLength) -> Result<(), OutputError>;
}

/// Discards every note.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_note(&mut self, note: u8, length: NoteLength) -> Result<(), OutputError> {
        tracing::trace!(note, %length, "note dropped");
        Ok(())
    }
}
