// Controller glue: applies decoded controller input to the grid and drives
// the feedback outputs.
//
// `PushController` owns the knob bank and the erase-mode flag. For each raw
// message it decodes, mutates the `Grid` through its public setters, updates
// pad LEDs through a `LedSink`, plays pad notes through an `AudioSink`, and
// returns `UiEvent`s describing what changed so a readout can redraw. It
// holds no reference to the grid or the sinks between calls; the caller
// passes them in, which keeps the grid single-owned by the frame loop.
//
// Mapping (see `midi.rs` for the wire numbers):
// - Encoders: step the knob, then apply by `KnobRole` (color pair, alley X,
//   alley Y). Every encoder message reports a `KnobChanged`.
// - Left encoders: cycle the grid method / ease type, forward only.
// - New (press): toggle erase mode. While erasing, a pad press clears its
//   tile instead of cycling the shape.
// - Record (press): toggle the debug overlay.
// - Play (press): reset every shape and switch all pad LEDs off.
// - Pad press: cycle (or clear) the tile's shape, light or clear the pad,
//   and play the pad's note as a sixteenth.
//
// Output failures are logged and swallowed; input handling always runs to
// completion.

use tessera_grid::tiles::INITIAL_SHAPE_INDEX;
use tessera_grid::{EaseType, Grid, GridMethod, GridParams};

use crate::audio::{AudioSink, PAD_NOTE_LENGTH};
use crate::error::OutputError;
use crate::knob::{Knob, KnobConfig, KnobRole, Turn, default_knob_configs, knob_bank};
use crate::led::{LedSink, led_for_pair};
use crate::midi::{BUTTON_PRESSED, ControlMessage, Pad, decode, note_name};

/// Transport/utility buttons that flash on the readout when handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Button {
    New,
    Record,
    Play,
}

/// State changes reported back to the caller after each message.
#[derive(Clone, Debug, PartialEq)]
pub enum UiEvent {
    /// `knob` is 1-based, as printed on the hardware.
    KnobChanged {
        knob: usize,
        label: String,
        value: f64,
    },
    MethodChanged(GridMethod),
    EaseTypeChanged(EaseType),
    Flash(Button),
}

#[derive(Clone, Debug)]
pub struct PushController {
    knobs: Vec<Knob>,
    erase_mode: bool,
}

impl PushController {
    pub fn new(knob_configs: Vec<KnobConfig>) -> Self {
        Self {
            knobs: knob_bank(knob_configs),
            erase_mode: false,
        }
    }

    /// The default bank, seeded from the grid's starting parameters.
    pub fn with_defaults(params: &GridParams) -> Self {
        Self::new(default_knob_configs(params))
    }

    pub fn knobs(&self) -> &[Knob] {
        &self.knobs
    }

    pub fn erase_mode(&self) -> bool {
        self.erase_mode
    }

    /// Put the pads into a known state: everything off.
    pub fn connect(&mut self, leds: &mut dyn LedSink) {
        report(leds.clear_all(), "clear pads on connect");
        tracing::info!(knobs = self.knobs.len(), "controller connected");
    }

    /// Decode and apply one raw MIDI message.
    pub fn handle_message(
        &mut self,
        grid: &mut Grid,
        bytes: &[u8],
        leds: &mut dyn LedSink,
        audio: &mut dyn AudioSink,
    ) -> Vec<UiEvent> {
        match decode(bytes) {
            Ok(msg) => self.handle(grid, msg, leds, audio),
            Err(e) => {
                tracing::warn!("ignoring controller message: {e}");
                Vec::new()
            }
        }
    }

    /// Apply one decoded message.
    pub fn handle(
        &mut self,
        grid: &mut Grid,
        msg: ControlMessage,
        leds: &mut dyn LedSink,
        audio: &mut dyn AudioSink,
    ) -> Vec<UiEvent> {
        let mut events = Vec::new();
        match msg {
            ControlMessage::Encoder { knob, value } => {
                if let Some(event) = self.handle_encoder(grid, knob, value, leds) {
                    events.push(event);
                }
            }
            ControlMessage::CycleMethod { .. } => {
                let method = grid.cycle_method();
                tracing::debug!(%method, "grid method");
                events.push(UiEvent::MethodChanged(method));
            }
            ControlMessage::CycleEase { .. } => {
                let ease = grid.cycle_ease_type();
                tracing::debug!(%ease, "ease type");
                events.push(UiEvent::EaseTypeChanged(ease));
            }
            ControlMessage::New { value } if value == BUTTON_PRESSED => {
                self.erase_mode = !self.erase_mode;
                tracing::debug!(erase = self.erase_mode, "erase mode");
                events.push(UiEvent::Flash(Button::New));
            }
            ControlMessage::Record { value } if value == BUTTON_PRESSED => {
                let overlay = grid.toggle_debug();
                tracing::debug!(overlay, "debug overlay");
                events.push(UiEvent::Flash(Button::Record));
            }
            ControlMessage::Play { value } if value == BUTTON_PRESSED => {
                grid.reset_all_shapes();
                report(leds.clear_all(), "clear pads on reset");
                tracing::debug!("all shapes reset");
                events.push(UiEvent::Flash(Button::Play));
            }
            ControlMessage::Pad { pad, .. } => {
                self.handle_pad(grid, pad, leds);
                let note = pad.note();
                tracing::trace!(note, name = %note_name(note), "pad note");
                report(audio.play_note(note, PAD_NOTE_LENGTH), "play pad note");
            }
            ControlMessage::New { .. }
            | ControlMessage::Record { .. }
            | ControlMessage::Play { .. }
            | ControlMessage::Ignored => {}
        }
        events
    }

    fn handle_encoder(
        &mut self,
        grid: &mut Grid,
        index: usize,
        value: u8,
        leds: &mut dyn LedSink,
    ) -> Option<UiEvent> {
        let Some(knob) = self.knobs.get_mut(index) else {
            tracing::warn!(knob = index + 1, "no knob configured for encoder");
            return None;
        };

        if let Some(turn) = Turn::from_encoder(value) {
            knob.turn(turn);
        }

        match knob.role() {
            KnobRole::ColorPair => {
                let index = knob.value().round().max(0.0) as usize;
                grid.set_color_pair(index);
                refresh_active_pads(grid, leds);
            }
            KnobRole::AlleyX => grid.set_alley_x(knob.value()),
            KnobRole::AlleyY => grid.set_alley_y(knob.value()),
            KnobRole::Unassigned => {}
        }

        Some(UiEvent::KnobChanged {
            knob: knob.id() + 1,
            label: knob.label().to_string(),
            value: knob.display_value(),
        })
    }

    fn handle_pad(&mut self, grid: &mut Grid, pad: Pad, leds: &mut dyn LedSink) {
        let coord = pad.tile_coord();
        let updated = if self.erase_mode {
            grid.set_shape_index(coord, INITIAL_SHAPE_INDEX)
                .then_some(INITIAL_SHAPE_INDEX)
        } else {
            grid.cycle_shape_index(coord)
        };

        let Some(shape) = updated else {
            tracing::debug!(%coord, "pad outside the grid");
            return;
        };

        let note = pad.note();
        if shape == INITIAL_SHAPE_INDEX {
            report(leds.clear_pad(note), "clear pad");
        } else {
            report(leds.set_pad(note, led_for_pair(grid.color_pair())), "light pad");
        }
    }
}

/// Relight every pad whose tile has a shape, in the current pair's color.
fn refresh_active_pads(grid: &Grid, leds: &mut dyn LedSink) {
    let color = led_for_pair(grid.color_pair());
    for coord in grid.coords_excluding_shape(INITIAL_SHAPE_INDEX) {
        if let Some(pad) = Pad::from_tile_coord(coord) {
            report(leds.set_pad(pad.note(), color), "recolor pad");
        }
    }
}

fn report(result: Result<(), OutputError>, action: &str) {
    if let Err(e) = result {
        tracing::warn!("{action} failed: {e}");
    }
}
