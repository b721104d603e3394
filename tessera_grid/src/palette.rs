// Colors and the named color-pair table.
//
// Each pair is `(first, second)`. The renderer paints the background with
// the *primary* color and fills shapes with the *secondary*:
//
//   primary   = if swap { first  } else { second }
//   secondary = if swap { second } else { first  }
//
// Knob 1 on the controller selects a pair by index into `COLOR_PAIRS`, and
// `tessera_push::led` maps the same index onto a pad LED color.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// 8-bit RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Debug label color.
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// From `0xRRGGBBAA`.
    pub const fn from_rgba_u32(v: u32) -> Self {
        Self {
            r: (v >> 24) as u8,
            g: (v >> 16) as u8,
            b: (v >> 8) as u8,
            a: v as u8,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .ok()
                .map(|v| Self::from_rgba_u32((v << 8) | 0xff)),
            8 => u32::from_str_radix(digits, 16).ok().map(Self::from_rgba_u32),
            _ => None,
        }
    }

    /// `#rrggbb` when opaque, `#rrggbbaa` otherwise.
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// Alpha as a 0–1 opacity.
    pub fn opacity(self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color '{s}'")))
    }
}

/// A named two-color scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    pub name: &'static str,
    pub first: Color,
    pub second: Color,
}

impl ColorPair {
    /// `(primary, secondary)` for the given swap flag.
    pub fn resolve(&self, swap: bool) -> (Color, Color) {
        if swap {
            (self.first, self.second)
        } else {
            (self.second, self.first)
        }
    }
}

const fn pair(name: &'static str, first: u32, second: u32) -> ColorPair {
    ColorPair {
        name,
        first: Color::from_rgba_u32(first),
        second: Color::from_rgba_u32(second),
    }
}

/// Every selectable pair, in knob order.
pub const COLOR_PAIRS: &[ColorPair] = &[
    pair("DARK_GREY_LIGHT_GREY", 0x727272ff, 0xd0ced0ff),
    pair("BROWN_GREY_LIGHT_GREY", 0x4e444aff, 0xefedefff),
    pair("BROWN_GREY_BLUE", 0x0f5aecff, 0x312926ff),
    // calm
    pair("SAN_JUAN_POLO_BLUE", 0x2c4c76ff, 0x96bce2ff),
    pair("CUREULEAN_QUILL", 0x3d54c7ff, 0xd2cfcdff),
    pair("TORY_SHAKESPEARE", 0x204fa7ff, 0x050606ff),
    pair("EMERALD_TIBER_DARK", 0x058c4eff, 0x0d3135ff),
    // neon
    pair("YELLOW_BUNKER", 0x0a0f14ff, 0xf4f516ff),
    pair("FLUSH_ORANGE_NERO", 0xfe8610ff, 0x120600ff),
    pair("LAS_PALAMAS_MOON_MIST", 0xdddbcdff, 0xd4ee22ff),
    pair("MERCURY_RED_ORANGE", 0xe3e2deff, 0xfe4532ff),
    pair("BLUE_RIBBON_VULCAN", 0x0856fcff, 0x121622ff),
];

/// Index of the startup pair.
pub const DEFAULT_COLOR_PAIR: usize = 0;

/// Pair at `index`, clamped to the last pair.
pub fn color_pair(index: usize) -> &'static ColorPair {
    &COLOR_PAIRS[index.min(COLOR_PAIRS.len() - 1)]
}

/// Case-insensitive lookup of a pair index by name.
pub fn color_pair_index(name: &str) -> Option<usize> {
    COLOR_PAIRS
        .iter()
        .position(|p| p.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_and_eight_digit_hex() {
        assert_eq!(Color::from_hex("#4E444A"), Some(Color::rgb(0x4e, 0x44, 0x4a)));
        assert_eq!(
            Color::from_hex("727272ff"),
            Some(Color::rgb(0x72, 0x72, 0x72))
        );
        assert_eq!(
            Color::from_hex("#00000080").map(|c| c.a),
            Some(0x80)
        );
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#+12345"), None);
    }

    #[test]
    fn hex_output_drops_opaque_alpha() {
        assert_eq!(Color::rgb(1, 2, 255).to_hex(), "#0102ff");
        assert_eq!(Color::from_rgba_u32(0x01020304).to_hex(), "#01020304");
    }

    #[test]
    fn table_matches_named_pairs() {
        assert_eq!(COLOR_PAIRS.len(), 12);
        assert_eq!(COLOR_PAIRS[DEFAULT_COLOR_PAIR].name, "DARK_GREY_LIGHT_GREY");
        let yb = color_pair(color_pair_index("yellow_bunker").unwrap_or(0));
        assert_eq!(yb.second, Color::from_hex("#F4F516").unwrap());
    }

    #[test]
    fn swap_exchanges_roles() {
        let p = color_pair(0);
        assert_eq!(p.resolve(false), (p.second, p.first));
        assert_eq!(p.resolve(true), (p.first, p.second));
    }

    #[test]
    fn out_of_range_index_clamps() {
        assert_eq!(color_pair(999).name, "BLUE_RIBBON_VULCAN");
    }

    #[test]
    fn color_serde_uses_hex() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::RED);
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }
}
