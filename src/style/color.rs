use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer};

use crate::error::MapError;

/// RGB color with 8 bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Channel-wise linear interpolation, `t` in [0, 1].
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        fn lerp_channel(a: u8, b: u8, t: f64) -> u8 {
            (a as f64 + (b as f64 - a as f64) * t).round().clamp(0.0, 255.0) as u8
        }
        Rgb::new(
            lerp_channel(self.r, other.r, t),
            lerp_channel(self.g, other.g, t),
            lerp_channel(self.b, other.b, t),
        )
    }
}

impl FromStr for Rgb {
    type Err = MapError;

    /// Parses `#rrggbb` (the leading `#` is optional).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(MapError::InvalidColor(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| MapError::InvalidColor(s.to_string()))
        };
        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Fill or stroke paint. Serialized as a CSS color string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Transparent,
    Solid(Rgb),
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Paint::Transparent => f.write_str("transparent"),
            Paint::Solid(color) => color.fmt(f),
        }
    }
}

impl From<Rgb> for Paint {
    fn from(value: Rgb) -> Self {
        Paint::Solid(value)
    }
}

impl Serialize for Paint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parse a list of hex colors, failing on the first bad one.
pub fn parse_colors<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Rgb>, MapError> {
    colors.iter().map(|color| color.as_ref().parse()).collect()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::MapError;

    use super::{Paint, Rgb};

    #[rstest]
    #[case("#ffffd4", Rgb::new(255, 255, 212))]
    #[case("993404", Rgb::new(153, 52, 4))]
    #[case(" #FE9929 ", Rgb::new(254, 153, 41))]
    fn test_parse_hex(#[case] input: &str, #[case] expected: Rgb) {
        assert_eq!(input.parse::<Rgb>().unwrap(), expected);
    }

    #[rstest]
    #[case("#fff")]
    #[case("#gggggg")]
    #[case("blue")]
    #[case("#+1+2+3")]
    #[case("#-1-2-3")]
    fn test_parse_invalid_hex(#[case] input: &str) {
        assert_eq!(
            input.parse::<Rgb>(),
            Err(MapError::InvalidColor(input.to_string()))
        );
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0, 100, 200);
        let b = Rgb::new(200, 100, 0);
        assert_eq!(a.lerp(&b, 0.0), a);
        assert_eq!(a.lerp(&b, 1.0), b);
        assert_eq!(a.lerp(&b, 0.5), Rgb::new(100, 100, 100));
    }

    #[test]
    fn test_paint_serializes_as_css() {
        assert_eq!(
            serde_json::to_string(&Paint::Transparent).unwrap(),
            "\"transparent\""
        );
        assert_eq!(
            serde_json::to_string(&Paint::from(Rgb::new(0, 0, 255))).unwrap(),
            "\"#0000ff\""
        );
    }
}
