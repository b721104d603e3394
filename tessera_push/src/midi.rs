// Raw MIDI decoding and encoding for the grid controller (Ableton Push in
// user mode).
//
// Incoming bytes are parsed with `midly::live::LiveEvent` and classified
// into a `ControlMessage`. Channels are ignored on input; every mapping
// below is by controller/note number only.
//
//   CC 71..=78      upper encoders (knobs 1–8), relative
//   CC 14 / CC 15   left encoders: cycle method / cycle ease type
//   CC 87           New button
//   CC 86           Record button
//   CC 85           Play button
//   note 36..=99    the 8×8 pad grid, 36 at bottom-left, 99 at top-right
//
// Pad rows are numbered top-down (row 0 is the top row, notes 92..=99),
// matching the on-screen grid, so `row = 7 - (note - 36) / 8`.
//
// Outgoing messages (pad LEDs) are built here too, with `LiveEvent::write_std`.

use midly::MidiMessage;
use midly::live::LiveEvent;
use midly::num::{u4, u7};
use tessera_grid::TileCoord;

use crate::error::PushError;

pub const KNOB_CC_FIRST: u8 = 71;
pub const KNOB_CC_LAST: u8 = 78;
pub const CC_CYCLE_METHOD: u8 = 14;
pub const CC_CYCLE_EASE: u8 = 15;
pub const CC_PLAY: u8 = 85;
pub const CC_RECORD: u8 = 86;
pub const CC_NEW: u8 = 87;

/// CC value sent by a button when pressed (release sends 0).
pub const BUTTON_PRESSED: u8 = 127;

pub const PAD_NOTE_MIN: u8 = 36;
pub const PAD_NOTE_MAX: u8 = 99;
pub const PAD_ROWS: u8 = 8;
pub const PAD_COLS: u8 = 8;

/// Channel index for LED messages (MIDI channel 1).
pub const LED_CHANNEL: u8 = 0;

/// A pad position, 0-based, row 0 at the top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pad {
    pub row: u8,
    pub col: u8,
}

impl Pad {
    pub fn from_note(note: u8) -> Option<Self> {
        if !(PAD_NOTE_MIN..=PAD_NOTE_MAX).contains(&note) {
            return None;
        }
        let offset = note - PAD_NOTE_MIN;
        Some(Self {
            row: PAD_ROWS - 1 - offset / PAD_COLS,
            col: offset % PAD_COLS,
        })
    }

    pub fn note(self) -> u8 {
        PAD_NOTE_MIN + (PAD_ROWS - 1 - self.row) * PAD_COLS + self.col
    }

    /// The grid tile under this pad. Grid indices are 1-based.
    pub fn tile_coord(self) -> TileCoord {
        TileCoord::new(usize::from(self.row) + 1, usize::from(self.col) + 1)
    }

    /// The pad over a grid tile, if the tile lies within the 8×8 pad area.
    pub fn from_tile_coord(coord: TileCoord) -> Option<Self> {
        let row = u8::try_from(coord.row.checked_sub(1)?).ok()?;
        let col = u8::try_from(coord.col.checked_sub(1)?).ok()?;
        (row < PAD_ROWS && col < PAD_COLS).then_some(Self { row, col })
    }
}

/// A classified controller message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMessage {
    /// Upper encoder turned. `knob` is 0-based.
    Encoder { knob: usize, value: u8 },
    CycleMethod { value: u8 },
    CycleEase { value: u8 },
    New { value: u8 },
    Record { value: u8 },
    Play { value: u8 },
    /// Pad pressed (note-on with non-zero velocity).
    Pad { pad: Pad, velocity: u8 },
    /// Anything else: other CCs, note-offs, pad releases, system messages.
    Ignored,
}

/// Decode one raw MIDI message.
pub fn decode(bytes: &[u8]) -> Result<ControlMessage, PushError> {
    let event = LiveEvent::parse(bytes).map_err(|source| PushError::Decode {
        bytes: bytes.to_vec(),
        source,
    })?;

    let LiveEvent::Midi { message, .. } = event else {
        return Ok(ControlMessage::Ignored);
    };

    Ok(match message {
        MidiMessage::Controller { controller, value } => {
            classify_cc(controller.as_int(), value.as_int())
        }
        MidiMessage::NoteOn { key, vel } if vel.as_int() > 0 => match Pad::from_note(key.as_int()) {
            Some(pad) => ControlMessage::Pad {
                pad,
                velocity: vel.as_int(),
            },
            None => ControlMessage::Ignored,
        },
        _ => ControlMessage::Ignored,
    })
}

fn classify_cc(controller: u8, value: u8) -> ControlMessage {
    match controller {
        KNOB_CC_FIRST..=KNOB_CC_LAST => ControlMessage::Encoder {
            knob: usize::from(controller - KNOB_CC_FIRST),
            value,
        },
        CC_CYCLE_METHOD => ControlMessage::CycleMethod { value },
        CC_CYCLE_EASE => ControlMessage::CycleEase { value },
        CC_NEW => ControlMessage::New { value },
        CC_RECORD => ControlMessage::Record { value },
        CC_PLAY => ControlMessage::Play { value },
        _ => ControlMessage::Ignored,
    }
}

fn encode(event: LiveEvent<'_>) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3);
    // Writing a channel message into a Vec cannot fail.
    if let Err(e) = event.write_std(&mut buf) {
        tracing::error!("failed to encode MIDI event: {e}");
    }
    buf
}

pub fn note_on(channel: u8, key: u8, vel: u8) -> Vec<u8> {
    encode(LiveEvent::Midi {
        channel: u4::new(channel),
        message: MidiMessage::NoteOn {
            key: u7::new(key),
            vel: u7::new(vel),
        },
    })
}

pub fn note_off(channel: u8, key: u8) -> Vec<u8> {
    encode(LiveEvent::Midi {
        channel: u4::new(channel),
        message: MidiMessage::NoteOff {
            key: u7::new(key),
            vel: u7::new(0),
        },
    })
}

pub fn control_change(channel: u8, controller: u8, value: u8) -> Vec<u8> {
    encode(LiveEvent::Midi {
        channel: u4::new(channel),
        message: MidiMessage::Controller {
            controller: u7::new(controller),
            value: u7::new(value),
        },
    })
}

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Scientific pitch name, with middle C (60) as `C4`.
pub fn note_name(note: u8) -> String {
    let octave = i32::from(note / 12) - 1;
    format!("{}{}", NOTE_NAMES[usize::from(note % 12)], octave)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pad_corners() {
        assert_eq!(Pad::from_note(36), Some(Pad { row: 7, col: 0 }));
        assert_eq!(Pad::from_note(43), Some(Pad { row: 7, col: 7 }));
        assert_eq!(Pad::from_note(92), Some(Pad { row: 0, col: 0 }));
        assert_eq!(Pad::from_note(99), Some(Pad { row: 0, col: 7 }));
        assert_eq!(Pad::from_note(35), None);
        assert_eq!(Pad::from_note(100), None);
    }

    #[test]
    fn pad_note_mapping_is_a_bijection() {
        for note in PAD_NOTE_MIN..=PAD_NOTE_MAX {
            let pad = Pad::from_note(note).unwrap();
            assert_eq!(pad.note(), note);
            assert_eq!(Pad::from_tile_coord(pad.tile_coord()), Some(pad));
        }
        assert_eq!(Pad::from_tile_coord(TileCoord::new(0, 3)), None);
        assert_eq!(Pad::from_tile_coord(TileCoord::new(9, 3)), None);
    }

    #[test]
    fn decodes_controller_numbers() {
        assert_eq!(
            decode(&control_change(0, 71, 1)).unwrap(),
            ControlMessage::Encoder { knob: 0, value: 1 }
        );
        assert_eq!(
            decode(&control_change(3, 78, 127)).unwrap(),
            ControlMessage::Encoder {
                knob: 7,
                value: 127
            }
        );
        assert_eq!(
            decode(&control_change(0, 14, 1)).unwrap(),
            ControlMessage::CycleMethod { value: 1 }
        );
        assert_eq!(
            decode(&control_change(0, 86, 127)).unwrap(),
            ControlMessage::Record { value: 127 }
        );
        assert_eq!(decode(&control_change(0, 20, 5)).unwrap(), ControlMessage::Ignored);
    }

    #[test]
    fn decodes_pad_presses_only() {
        assert_eq!(
            decode(&note_on(0, 36, 100)).unwrap(),
            ControlMessage::Pad {
                pad: Pad { row: 7, col: 0 },
                velocity: 100
            }
        );
        assert_eq!(decode(&note_on(0, 36, 0)).unwrap(), ControlMessage::Ignored);
        assert_eq!(decode(&note_off(0, 36)).unwrap(), ControlMessage::Ignored);
        assert_eq!(decode(&note_on(0, 20, 100)).unwrap(), ControlMessage::Ignored);
    }

    #[test]
    fn raw_bytes_match_wire_format() {
        assert_eq!(note_on(0, 36, 45), vec![0x90, 36, 45]);
        assert_eq!(note_off(0, 99), vec![0x80, 99, 0]);
        assert_eq!(control_change(1, 85, 127), vec![0xB1, 85, 127]);
    }

    #[test]
    fn malformed_bytes_are_an_error() {
        assert!(matches!(decode(&[]), Err(PushError::Decode { .. })));
        assert!(matches!(decode(&[0x90, 36]), Err(PushError::Decode { .. })));
    }

    #[test]
    fn note_names() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(36), "C2");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(99), "D#7");
    }
}
