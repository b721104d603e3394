// Relative encoder knobs.
//
// The Push's upper encoders send relative CC values: small values for a
// clockwise step, values near 127 for a counter-clockwise step. Each `Knob`
// turns those steps into a bounded accumulator: `value ± increment`,
// clamped to `[min, max]`. What the value *means* is the knob's `KnobRole`;
// the controller matches on the role, never on the display label.
//
// The default bank mirrors the hardware layout: knob 1 picks the color
// pair, knobs 2 and 3 set the alleys, knobs 4–8 are unassigned but still
// accumulate so a readout can show them.

use serde::{Deserialize, Serialize};
use tessera_easing::clamp;
use tessera_grid::GridParams;
use tessera_grid::palette::COLOR_PAIRS;

pub const KNOB_COUNT: usize = 8;

/// What a knob controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnobRole {
    ColorPair,
    AlleyX,
    AlleyY,
    #[default]
    Unassigned,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobConfig {
    pub label: String,
    pub increment: f64,
    pub min: f64,
    pub max: f64,
    pub initial_value: f64,
    /// Report `round(value)` instead of the raw value.
    pub should_round: bool,
    pub role: KnobRole,
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            label: String::new(),
            increment: 0.1,
            min: 0.0,
            max: 10.0,
            initial_value: 1.0,
            should_round: false,
            role: KnobRole::Unassigned,
        }
    }
}

/// Direction of one encoder step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Turn {
    Increment,
    Decrement,
}

impl Turn {
    /// Classify a relative encoder value: `value / 127` in (0, 0.5)
    /// increments, in (0.5, 1] decrements; 0 and exactly 0.5 do nothing.
    pub fn from_encoder(value: u8) -> Option<Self> {
        let v = f64::from(value) / 127.0;
        if v > 0.0 && v < 0.5 {
            Some(Turn::Increment)
        } else if v > 0.5 && v <= 1.0 {
            Some(Turn::Decrement)
        } else {
            None
        }
    }
}

/// A bounded accumulator driven by encoder steps.
#[derive(Clone, Debug, PartialEq)]
pub struct Knob {
    id: usize,
    config: KnobConfig,
    value: f64,
}

impl Knob {
    /// The initial value is clamped into the configured range.
    pub fn new(id: usize, config: KnobConfig) -> Self {
        let value = clamp(config.initial_value, config.min, config.max);
        Self { id, config, value }
    }

    /// 0-based position in the bank.
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    pub fn label(&self) -> &str {
        &self.config.label
    }

    pub fn role(&self) -> KnobRole {
        self.config.role
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The value as a readout should show it.
    pub fn display_value(&self) -> f64 {
        if self.config.should_round {
            self.value.round()
        } else {
            self.value
        }
    }

    pub fn set_value(&mut self, value: f64) {
        if value.is_nan() {
            return;
        }
        self.value = clamp(value, self.config.min, self.config.max);
    }

    pub fn increment(&mut self) {
        self.set_value(self.value + self.config.increment);
    }

    pub fn decrement(&mut self) {
        self.set_value(self.value - self.config.increment);
    }

    pub fn turn(&mut self, turn: Turn) {
        match turn {
            Turn::Increment => self.increment(),
            Turn::Decrement => self.decrement(),
        }
    }
}

/// The default eight-knob layout, seeded from the grid's starting state.
pub fn default_knob_configs(params: &GridParams) -> Vec<KnobConfig> {
    let mut configs = vec![
        KnobConfig {
            label: "Colors".into(),
            increment: 0.125 / 2.0,
            min: 0.0,
            max: (COLOR_PAIRS.len() - 1) as f64,
            initial_value: params.color_pair as f64,
            should_round: true,
            role: KnobRole::ColorPair,
        },
        KnobConfig {
            label: "Alley X".into(),
            increment: 0.01,
            min: 0.0,
            max: 1.0,
            initial_value: params.alley_x,
            should_round: false,
            role: KnobRole::AlleyX,
        },
        KnobConfig {
            label: "Alley Y".into(),
            increment: 0.01,
            min: 0.0,
            max: 1.0,
            initial_value: params.alley_y,
            should_round: false,
            role: KnobRole::AlleyY,
        },
        KnobConfig {
            label: "Knob 4".into(),
            increment: 1.0,
            min: 1.0,
            max: 20.0,
            initial_value: 0.0,
            ..KnobConfig::default()
        },
    ];
    for n in 5..=KNOB_COUNT {
        configs.push(KnobConfig {
            label: format!("Knob {n}"),
            ..KnobConfig::default()
        });
    }
    configs
}

/// Build a bank from configs, assigning ids by position.
pub fn knob_bank(configs: Vec<KnobConfig>) -> Vec<Knob> {
    if configs.len() != KNOB_COUNT {
        tracing::warn!(
            count = configs.len(),
            expected = KNOB_COUNT,
            "knob bank size differs from the hardware"
        );
    }
    configs
        .into_iter()
        .enumerate()
        .map(|(i, c)| Knob::new(i, c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_knob(initial: f64) -> Knob {
        Knob::new(
            0,
            KnobConfig {
                increment: 0.05,
                min: 0.0,
                max: 1.0,
                initial_value: initial,
                ..KnobConfig::default()
            },
        )
    }

    #[test]
    fn three_increments_from_point_one() {
        let mut knob = unit_knob(0.1);
        for _ in 0..3 {
            knob.increment();
        }
        assert!((knob.value() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn value_stays_in_range() {
        let mut knob = unit_knob(0.95);
        knob.increment();
        knob.increment();
        assert_eq!(knob.value(), 1.0);
        for _ in 0..50 {
            knob.decrement();
        }
        assert_eq!(knob.value(), 0.0);
        knob.set_value(f64::NAN);
        assert_eq!(knob.value(), 0.0);
    }

    #[test]
    fn inverted_bounds_are_swapped() {
        let knob = Knob::new(
            0,
            KnobConfig {
                min: 5.0,
                max: 1.0,
                initial_value: 9.0,
                ..KnobConfig::default()
            },
        );
        assert_eq!(knob.value(), 5.0);
    }

    #[test]
    fn encoder_direction() {
        assert_eq!(Turn::from_encoder(0), None);
        assert_eq!(Turn::from_encoder(1), Some(Turn::Increment));
        assert_eq!(Turn::from_encoder(63), Some(Turn::Increment));
        assert_eq!(Turn::from_encoder(64), Some(Turn::Decrement));
        assert_eq!(Turn::from_encoder(127), Some(Turn::Decrement));
    }

    #[test]
    fn default_bank_layout() {
        let params = GridParams::default();
        let bank = knob_bank(default_knob_configs(&params));
        assert_eq!(bank.len(), KNOB_COUNT);
        assert_eq!(bank[0].role(), KnobRole::ColorPair);
        assert_eq!(bank[1].role(), KnobRole::AlleyX);
        assert_eq!(bank[2].role(), KnobRole::AlleyY);
        assert!(bank[3..].iter().all(|k| k.role() == KnobRole::Unassigned));
        assert_eq!(bank[1].value(), params.alley_x);
        // Knob 4 starts below its minimum and is clamped.
        assert_eq!(bank[3].value(), 1.0);
        assert_eq!(bank[7].label(), "Knob 8");
    }

    #[test]
    fn color_knob_rounds_for_display() {
        let mut bank = knob_bank(default_knob_configs(&GridParams::default()));
        for _ in 0..9 {
            bank[0].increment();
        }
        assert!((bank[0].value() - 0.5625).abs() < 1e-12);
        assert_eq!(bank[0].display_value(), 1.0);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: KnobConfig =
            serde_json::from_str(r#"{ "label": "Speed", "role": "AlleyY" }"#).unwrap();
        assert_eq!(config.role, KnobRole::AlleyY);
        assert_eq!(config.increment, 0.1);
    }
}
