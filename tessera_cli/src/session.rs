// Headless session: one grid, one controller, and the frame loop that ties
// them together.
//
// Each `step()` is one frame:
//   1. stamp the recorder with the frame number,
//   2. drain the controller inbox and apply every message,
//   3. recalculate the grid for the frame's animation inputs,
//   4. advance the clock.
// Drawing is separate (`render`), since a headless run only draws when asked
// to write output.
//
// See also: `replay.rs` for the scheduled input `run()` feeds into the
// inbox, `svg.rs` for the output canvas.

use tessera_grid::tiles::INITIAL_SHAPE_INDEX;
use tessera_grid::{Canvas, EaseType, FrameClock, FrameTime, Grid, GridMethod};
use tessera_push::recorder::DEFAULT_TEMPO_BPM;
use tessera_push::{
    Inbox, InboxSender, NoteRecorder, PadLeds, PushController, UiEvent, inbox,
};

use crate::args::RunOptions;
use crate::error::CliError;
use crate::replay::Replay;
use crate::settings::Settings;
use crate::svg::SvgCanvas;

pub struct Session {
    grid: Grid,
    clock: FrameClock,
    controller: PushController,
    leds: PadLeds,
    recorder: NoteRecorder,
    sender: InboxSender,
    inbox: Inbox,
    canvas_width: f64,
    canvas_height: f64,
    last_time: FrameTime,
    messages_handled: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub messages: usize,
    pub notes: usize,
    pub lit_pads: usize,
    pub shaped_tiles: usize,
    pub method: GridMethod,
    pub ease_type: EaseType,
}

impl Session {
    pub fn new(settings: Settings, seed: Option<u64>) -> Self {
        let Settings { grid: config, knobs } = settings;
        let seed = seed.unwrap_or(config.random_seed);
        let params = config.to_params();
        let clock = config.clock();

        let mut controller = if knobs.is_empty() {
            PushController::with_defaults(&params)
        } else {
            PushController::new(knobs)
        };
        let mut leds = PadLeds::new();
        controller.connect(&mut leds);

        let (sender, inbox) = inbox();
        let last_time = clock.now();
        tracing::info!(
            tiles_x = params.tiles_x,
            tiles_y = params.tiles_y,
            method = %params.method,
            seed,
            "session started"
        );
        Self {
            grid: Grid::new(params, seed),
            recorder: NoteRecorder::new(clock.fps(), DEFAULT_TEMPO_BPM),
            clock,
            controller,
            leds,
            sender,
            inbox,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            last_time,
            messages_handled: 0,
        }
    }

    /// A handle for feeding raw controller messages from any thread.
    pub fn sender(&self) -> InboxSender {
        self.sender.clone()
    }

    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn leds(&self) -> &PadLeds {
        &self.leds
    }

    pub fn recorder(&self) -> &NoteRecorder {
        &self.recorder
    }

    /// Run one frame. Returns the number of controller messages applied.
    pub fn step(&mut self) -> usize {
        self.recorder.set_frame(self.clock.frame());

        let messages = self.inbox.drain();
        for bytes in &messages {
            let events = self.controller.handle_message(
                &mut self.grid,
                bytes,
                &mut self.leds,
                &mut self.recorder,
            );
            for event in events {
                log_event(self.clock.frame(), &event);
            }
        }
        self.messages_handled += messages.len();

        self.last_time = self.clock.now();
        self.grid
            .calculate(self.canvas_width, self.canvas_height, self.last_time);
        self.clock.tick();
        messages.len()
    }

    /// Draw the most recent frame.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        self.grid.render(canvas, self.last_time);
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            frames: self.clock.frame(),
            messages: self.messages_handled,
            notes: self.recorder.notes().len(),
            lit_pads: self.leds().lit_count(),
            shaped_tiles: self.grid().coords_excluding_shape(INITIAL_SHAPE_INDEX).len(),
            method: self.grid().params().method,
            ease_type: self.grid().params().ease_type,
        }
    }
}

fn log_event(frame: u64, event: &UiEvent) {
    match event {
        UiEvent::KnobChanged { knob, label, value } => {
            tracing::info!(frame, knob, label = %label, value, "knob");
        }
        UiEvent::MethodChanged(method) => tracing::info!(frame, %method, "method"),
        UiEvent::EaseTypeChanged(ease) => tracing::info!(frame, %ease, "ease type"),
        UiEvent::Flash(button) => tracing::debug!(frame, ?button, "button"),
    }
}

/// Load settings, run the requested number of frames, and write outputs.
pub fn run(opts: &RunOptions) -> Result<RunSummary, CliError> {
    let settings = match &opts.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let fps = settings.grid.fps;
    let mut session = Session::new(settings, opts.seed);

    let mut replay = match &opts.replay {
        Some(path) => Replay::load(path, fps)?,
        None => Replay::default(),
    };
    tracing::debug!(
        messages = replay.messages().len(),
        last_frame = replay.last_frame(),
        "replay loaded"
    );

    let sender = session.sender();
    for _ in 0..opts.frames {
        for message in replay.due(session.frame()) {
            sender.send(&message.bytes)?;
        }
        session.step();
    }
    if !replay.is_finished() {
        tracing::warn!(
            frames = opts.frames,
            last_frame = replay.last_frame(),
            "replay runs past the last frame; later messages are dropped"
        );
    }

    if let Some(path) = &opts.svg {
        let mut canvas = SvgCanvas::new(session.canvas_width, session.canvas_height);
        session.render(&mut canvas);
        canvas.save(path)?;
    }
    if let Some(path) = &opts.midi_log {
        session.recorder().write(path)?;
    }

    let summary = session.summary();
    tracing::info!(?summary, "run finished");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_grid::renderer::DrawCommand;
    use tessera_grid::{GridConfig, RecordingCanvas, TileCoord};
    use tessera_push::midi::{control_change, note_on};

    fn session() -> Session {
        Session::new(Settings::default(), None)
    }

    #[test]
    fn messages_apply_before_the_frame_they_arrive_in() {
        let mut s = session();
        let tx = s.sender();
        // Top-left pad is note 92.
        tx.send(&note_on(0, 92, 100)).unwrap();
        assert_eq!(s.step(), 1);
        assert_eq!(s.grid().tile(TileCoord::new(1, 1)).unwrap().shape_index, 1);
        assert_eq!(s.leds().lit_count(), 1);
        assert_eq!(s.recorder().notes()[0].frame, 0);
        assert_eq!(s.frame(), 1);
    }

    #[test]
    fn notes_are_stamped_with_their_frame() {
        let mut s = session();
        let tx = s.sender();
        s.step();
        s.step();
        tx.send(&note_on(0, 36, 100)).unwrap();
        s.step();
        assert_eq!(s.recorder().notes()[0].frame, 2);
    }

    #[test]
    fn summary_counts() {
        let mut s = session();
        let tx = s.sender();
        tx.send(&note_on(0, 36, 100)).unwrap();
        tx.send(&note_on(0, 37, 100)).unwrap();
        tx.send(&control_change(0, 14, 1)).unwrap();
        s.step();
        let summary = s.summary();
        assert_eq!(summary.frames, 1);
        assert_eq!(summary.messages, 3);
        assert_eq!(summary.notes, 2);
        assert_eq!(summary.lit_pads, 2);
        assert_eq!(summary.shaped_tiles, 2);
        assert_eq!(summary.method, GridMethod::Shaping.next());
    }

    #[test]
    fn render_draws_every_tile() {
        let settings = Settings {
            grid: GridConfig {
                tiles_x: 3,
                tiles_y: 2,
                ..GridConfig::default()
            },
            knobs: Vec::new(),
        };
        let mut s = Session::new(settings, Some(3));
        s.step();
        let mut canvas = RecordingCanvas::new(800.0, 800.0);
        s.render(&mut canvas);
        let translations = canvas
            .commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Translate { .. }))
            .count();
        assert_eq!(translations, 6);
    }

    #[test]
    fn run_with_replay_writes_outputs() {
        use midly::num::{u4, u7, u15, u28};
        use midly::{Format, Header, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

        let dir = std::env::temp_dir().join(format!("tessera-run-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let replay_path = dir.join("input.mid");
        let svg_path = dir.join("frame.svg");
        let log_path = dir.join("notes.mid");

        // Two pad presses half a second apart (30 frames at 60 fps).
        let mut smf = Smf::new(Header::new(
            Format::SingleTrack,
            Timing::Metrical(u15::new(480)),
        ));
        let press = |delta: u32, key: u8| TrackEvent {
            delta: u28::new(delta),
            kind: TrackEventKind::Midi {
                channel: u4::new(0),
                message: MidiMessage::NoteOn {
                    key: u7::new(key),
                    vel: u7::new(100),
                },
            },
        };
        smf.tracks.push(vec![press(0, 92), press(480, 93)]);
        let mut bytes = Vec::new();
        smf.write_std(&mut bytes).unwrap();
        std::fs::write(&replay_path, bytes).unwrap();

        let opts = RunOptions {
            frames: 40,
            replay: Some(replay_path),
            svg: Some(svg_path.clone()),
            midi_log: Some(log_path.clone()),
            ..RunOptions::default()
        };
        let summary = run(&opts).unwrap();
        assert_eq!(summary.messages, 2);
        assert_eq!(summary.notes, 2);
        assert_eq!(summary.shaped_tiles, 2);

        let svg = std::fs::read_to_string(&svg_path).unwrap();
        assert!(svg.starts_with("<svg "));
        let log = std::fs::read(&log_path).unwrap();
        assert_eq!(Smf::parse(&log).unwrap().tracks.len(), 1);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_config_is_an_error() {
        let opts = RunOptions {
            config: Some("/nonexistent/tessera.json".into()),
            ..RunOptions::default()
        };
        assert!(matches!(run(&opts), Err(CliError::Config(_))));
    }

    #[test]
    fn run_without_outputs() {
        let opts = RunOptions {
            frames: 5,
            ..RunOptions::default()
        };
        let summary = run(&opts).unwrap();
        assert_eq!(summary.frames, 5);
        assert_eq!(summary.messages, 0);
    }
}
