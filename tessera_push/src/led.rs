// Pad LED feedback.
//
// A lit pad means "this tile has a shape". The LED color follows the active
// color pair through `led_for_pair()`; a pair without a mapping falls back to
// `DEFAULT_LED_COLOR` with a warning. LEDs are driven with note-on messages
// on channel 1 whose velocity is the Push palette index, and switched off
// with note-off.
//
// `LedSink` is the output seam. `MidiLedSink` writes raw MIDI bytes to any
// `io::Write`; `PadLeds` keeps the lit state in memory, which is what the
// CLI and the tests use.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use tessera_grid::ColorPair;

use crate::error::OutputError;
use crate::midi::{LED_CHANNEL, PAD_NOTE_MAX, PAD_NOTE_MIN, note_off, note_on};

/// A Push pad palette index (note-on velocity).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedColor(pub u8);

impl LedColor {
    pub const BLACK: LedColor = LedColor(0);
    pub const WHITE_HI: LedColor = LedColor(3);
    pub const YELLOW_HI: LedColor = LedColor(13);
    pub const GREEN_HI: LedColor = LedColor(21);
    pub const CYAN_HI: LedColor = LedColor(33);
    pub const BLUE_HI: LedColor = LedColor(45);
    pub const INDIGO_HI: LedColor = LedColor(49);
    pub const VIOLET_HI: LedColor = LedColor(53);
    pub const ORANGE_HI: LedColor = LedColor(60);
    pub const RED_HI: LedColor = LedColor(120);
}

pub const DEFAULT_LED_COLOR: LedColor = LedColor::BLUE_HI;

/// The LED color that best represents a named pair, if one is assigned.
pub fn led_for_pair_name(name: &str) -> Option<LedColor> {
    let color = match name {
        "DARK_GREY_LIGHT_GREY" | "BROWN_GREY_LIGHT_GREY" => LedColor::WHITE_HI,
        "BROWN_GREY_BLUE" | "SAN_JUAN_POLO_BLUE" | "BLUE_RIBBON_VULCAN" => LedColor::BLUE_HI,
        "CUREULEAN_QUILL" | "TORY_SHAKESPEARE" => LedColor::INDIGO_HI,
        "EMERALD_TIBER_DARK" => LedColor::GREEN_HI,
        "YELLOW_BUNKER" | "LAS_PALAMAS_MOON_MIST" => LedColor::YELLOW_HI,
        "FLUSH_ORANGE_NERO" => LedColor::ORANGE_HI,
        "MERCURY_RED_ORANGE" => LedColor::RED_HI,
        _ => return None,
    };
    Some(color)
}

/// LED color for `pair`, or the default (with a warning) if it has none.
pub fn led_for_pair(pair: &ColorPair) -> LedColor {
    led_for_pair_name(pair.name).unwrap_or_else(|| {
        tracing::warn!(pair = pair.name, "no LED mapping for color pair, using default");
        DEFAULT_LED_COLOR
    })
}

/// Pad LED output.
pub trait LedSink {
    fn set_pad(&mut self, note: u8, color: LedColor) -> Result<(), OutputError>;
    fn clear_pad(&mut self, note: u8) -> Result<(), OutputError>;

    /// Switch every pad off.
    fn clear_all(&mut self) -> Result<(), OutputError> {
        for note in PAD_NOTE_MIN..=PAD_NOTE_MAX {
            self.clear_pad(note)?;
        }
        Ok(())
    }
}

/// Writes LED updates as MIDI bytes.
#[derive(Debug)]
pub struct MidiLedSink<W: Write> {
    out: W,
}

impl<W: Write> MidiLedSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LedSink for MidiLedSink<W> {
    fn set_pad(&mut self, note: u8, color: LedColor) -> Result<(), OutputError> {
        self.out.write_all(&note_on(LED_CHANNEL, note, color.0))?;
        Ok(())
    }

    fn clear_pad(&mut self, note: u8) -> Result<(), OutputError> {
        self.out.write_all(&note_off(LED_CHANNEL, note))?;
        Ok(())
    }
}

/// In-memory pad state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PadLeds {
    lit: BTreeMap<u8, LedColor>,
}

impl PadLeds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn color(&self, note: u8) -> Option<LedColor> {
        self.lit.get(&note).copied()
    }

    pub fn lit_count(&self) -> usize {
        self.lit.len()
    }

    /// Lit pads in note order.
    pub fn lit(&self) -> impl Iterator<Item = (u8, LedColor)> + '_ {
        self.lit.iter().map(|(&n, &c)| (n, c))
    }
}

impl LedSink for PadLeds {
    fn set_pad(&mut self, note: u8, color: LedColor) -> Result<(), OutputError> {
        if color == LedColor::BLACK {
            self.lit.remove(&note);
        } else {
            self.lit.insert(note, color);
        }
        Ok(())
    }

    fn clear_pad(&mut self, note: u8) -> Result<(), OutputError> {
        self.lit.remove(&note);
        Ok(())
    }
}
