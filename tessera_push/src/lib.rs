// tessera_push: grid-controller input and feedback for the Tessera engine.
//
// Turns raw MIDI from an 8×8 pad controller (Ableton Push in user mode) into
// `Grid` mutations, and drives the controller's feedback: pad LEDs that show
// which tiles hold a shape, and a short note per pad press.
//
// Module overview:
// - `midi.rs`:       Decoding with `midly::live`, pad/note mapping, note names.
// - `knob.rs`:       Relative encoder knobs, `KnobRole`, the default bank.
// - `led.rs`:        Push LED palette, pair → LED map, `LedSink` + impls.
// - `audio.rs`:      `AudioSink`, note lengths.
// - `recorder.rs`:   An `AudioSink` that writes played notes to a MIDI file.
// - `controller.rs`: `PushController`: message → grid mutation + feedback.
// - `inbox.rs`:      mpsc funnel from input threads to the frame loop.
// - `error.rs`:      `PushError`, `OutputError`.
//
// Nothing here opens a MIDI port. Callers bring bytes in (directly or via
// the inbox) and provide the sinks.

pub mod audio;
pub mod controller;
pub mod error;
pub mod inbox;
pub mod knob;
pub mod led;
pub mod midi;
pub mod recorder;

pub use audio::{AudioSink, NoteLength, NullAudio};
pub use controller::{Button, PushController, UiEvent};
pub use error::{OutputError, PushError};
pub use inbox::{Inbox, InboxSender, inbox};
pub use knob::{Knob, KnobConfig, KnobRole};
pub use led::{LedColor, LedSink, MidiLedSink, PadLeds};
pub use recorder::NoteRecorder;
