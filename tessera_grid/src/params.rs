// Grid parameters and the enumerations the controller cycles through.
//
// `GridParams` is the per-frame configuration the calculator and renderer
// read. It is owned by `Grid` (see `grid.rs`) and mutated only through the
// `Grid` setters; nothing holds it globally.
//
// The three selectable modes (`GridMethod`, `EaseType`, `MirrorMode`) are
// declared through `cyclic_enum!`, which gives each an explicit ordered
// `ALL` list, a `next()` that wraps at the end, and a stable string name.
// The string name is the serde representation, so configs read
// `"method": "StaticAlley"`. Unknown names deserialize to the enum's
// fallback variant with a warning instead of failing the whole config.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tessera_easing::CubicBezier;

macro_rules! cyclic_enum {
    (
        $(#[$meta:meta])*
        $name:ident (fallback = $fallback:ident) {
            $( $(#[$vmeta:meta])* $variant:ident => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in cycling order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            /// Case-insensitive lookup by `name()`.
            pub fn from_name(name: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.name().eq_ignore_ascii_case(name))
            }

            /// The following variant in `ALL`, wrapping to the first.
            pub fn next(self) -> Self {
                Self::ALL[(self as usize + 1) % Self::ALL.len()]
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.name())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($name::from_name(&s).unwrap_or_else(|| {
                    tracing::warn!(
                        "unknown {} '{}', falling back to {}",
                        stringify!($name),
                        s,
                        $name::$fallback
                    );
                    $name::$fallback
                }))
            }
        }
    };
}

cyclic_enum! {
    /// How raw tile sizes are derived each frame.
    GridMethod (fallback = Uniform) {
        /// Easing curve per axis via the deformation factory, with alleys.
        Shaping => "Shaping",
        /// Peakified cubic bezier per axis.
        Bezier => "Bezier",
        /// Full-width tiles, row heights following a travelling sine.
        Wave => "Wave",
        /// Every tile the same size.
        Uniform => "Uniform",
        /// Full tiles with fixed thin alleys on even rows/columns.
        StaticAlley => "StaticAlley",
        /// Seeded random column widths and row heights, with alleys.
        Random => "Random",
    }
}

cyclic_enum! {
    /// Curve family used by the Shaping method.
    EaseType (fallback = None) {
        None => "none",
        Linear => "linear",
        LinearPeak => "linearPeak",
        Step => "step",
        Parabola => "parabola",
        Sinc => "sinc",
        /// Parabola with fixed exponents (2 across, 5 down).
        ParabolaFixed => "parabola2",
        Quadratic => "quadratic",
        InQuart => "inQuart",
        Peak => "peak",
        PeakInvert => "peakInvert",
        PeakQuart => "peakQuart",
        Sin => "sin",
    }
}

cyclic_enum! {
    /// Flip applied to normalized tile positions before easing.
    MirrorMode (fallback = None) {
        None => "none",
        Horizontal => "horizontal",
        Vertical => "vertical",
        /// Leaves inputs alone; only inverts Parabola results on both axes.
        Both => "both",
    }
}

/// Live grid configuration, read by the calculator and renderer every frame.
#[derive(Clone, Debug, PartialEq)]
pub struct GridParams {
    /// Visible tile columns. Storage and nominal sizing use `tiles_x + 1`.
    pub tiles_x: usize,
    /// Visible tile rows. Storage and nominal sizing use `tiles_y + 1`.
    pub tiles_y: usize,
    /// Alley column width as a fraction of the nominal tile width (0–1).
    pub alley_x: f64,
    /// Alley row height as a fraction of the nominal tile height (0–1).
    /// Only the Shaping method reads it; StaticAlley and Random derive row
    /// alleys from `alley_x`.
    pub alley_y: f64,
    pub method: GridMethod,
    pub ease_type: EaseType,
    pub mirror: MirrorMode,
    /// Index into `palette::COLOR_PAIRS`.
    pub color_pair: usize,
    /// Exchange the primary/secondary roles of the active pair.
    pub swap_colors: bool,
    pub bezier_x: CubicBezier,
    pub bezier_y: CubicBezier,
    /// Outline every tile and label it with its grid index.
    pub debug: bool,
}

impl GridParams {
    /// Columns including the unused border column.
    pub fn span_x(&self) -> usize {
        self.tiles_x + 1
    }

    /// Rows including the unused border row.
    pub fn span_y(&self) -> usize {
        self.tiles_y + 1
    }
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            tiles_x: 8,
            tiles_y: 8,
            alley_x: 0.1,
            alley_y: 0.1,
            method: GridMethod::Shaping,
            ease_type: EaseType::Parabola,
            mirror: MirrorMode::None,
            color_pair: 0,
            swap_colors: false,
            bezier_x: CubicBezier::default(),
            bezier_y: CubicBezier::default(),
            debug: false,
        }
    }
}
