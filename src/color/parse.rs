use serde::{Deserialize, Serialize};

/// Straight-alpha color with channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    /// Red.
    pub r: f64,
    /// Green.
    pub g: f64,
    /// Blue.
    pub b: f64,
    /// Alpha.
    pub a: f64,
}

impl Color {
    /// Build a color from normalized channels.
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Build an opaque color from 8-bit channels.
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
            1.0,
        )
    }

    /// Straight-alpha RGBA8.
    pub fn to_rgba8(self) -> [u8; 4] {
        fn to_u8(x: f64) -> u8 {
            (x.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [to_u8(self.r), to_u8(self.g), to_u8(self.b), to_u8(self.a)]
    }

    /// Linear blend towards `other` by `t` in `0..=1`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self::rgba(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// `#RRGGBB` (or `#RRGGBBAA` when translucent).
    pub fn to_hex(self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Str(String),
            RgbaObj {
                r: f64,
                g: f64,
                b: f64,
                #[serde(default = "one")]
                a: f64,
            },
            Arr(Vec<f64>),
        }

        fn one() -> f64 {
            1.0
        }

        match Repr::deserialize(deserializer)? {
            Repr::Str(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::RgbaObj { r, g, b, a } => Ok(Self::rgba(r, g, b, a)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::rgba(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Self::rgba(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse a single color: `#RRGGBB`, `#RRGGBBAA`, a basic color name, a `Cn` cycle alias or a grey
/// level such as `"0.9"`.
pub fn parse_color(s: &str) -> Result<Color, String> {
    let s = s.trim();
    if s.starts_with('#') {
        return parse_hex(s);
    }
    if let Some(n) = s.strip_prefix('C').and_then(|n| n.parse::<usize>().ok()) {
        let hex = super::palette::TAB10[n % super::palette::TAB10.len()];
        return parse_hex(hex);
    }
    if let Ok(level) = s.parse::<f64>() {
        if (0.0..=1.0).contains(&level) {
            return Ok(Color::rgba(level, level, level, 1.0));
        }
        return Err(format!("grey level \"{s}\" must be within 0..=1"));
    }
    let lower = s.to_ascii_lowercase();
    named_color(&lower)
        .map(parse_hex)
        .unwrap_or_else(|| Err(format!("unknown color \"{s}\"")))
}

fn named_color(name: &str) -> Option<&'static str> {
    Some(match name {
        "b" | "blue" => "#0000FF",
        "g" => "#008000",
        "green" => "#008000",
        "r" | "red" => "#FF0000",
        "c" | "cyan" => "#00BFBF",
        "m" | "magenta" => "#BF00BF",
        "y" | "yellow" => "#BFBF00",
        "k" | "black" => "#000000",
        "w" | "white" => "#FFFFFF",
        "orange" => "#FFA500",
        "purple" => "#800080",
        "gray" | "grey" => "#808080",
        "brown" => "#A52A2A",
        "pink" => "#FFC0CB",
        "navy" => "#000080",
        "teal" => "#008080",
        "olive" => "#808000",
        "maroon" => "#800000",
        "lime" => "#00FF00",
        "gold" => "#FFD700",
        "silver" => "#C0C0C0",
        "crimson" => "#DC143C",
        "indigo" => "#4B0082",
        _ => return None,
    })
}

pub(crate) fn parse_hex(s: &str) -> Result<Color, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    let (r, g, b, a) = match s.len() {
        6 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            255,
        ),
        8 => (
            hex_byte(&s[0..2])?,
            hex_byte(&s[2..4])?,
            hex_byte(&s[4..6])?,
            hex_byte(&s[6..8])?,
        ),
        _ => {
            return Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned());
        }
    };

    Ok(Color::rgba(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
        f64::from(a) / 255.0,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/color/parse.rs"]
mod tests;
