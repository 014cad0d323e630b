use serde::{Deserialize, Serialize};

use crate::foundation::core::Color;

/// Scene-file color: `"#rrggbb"`, `{ "r": .., "g": .., "b": .. }` or `[r, g, b]`.
///
/// Always serialized as a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDef(pub Color);

impl From<Color> for ColorDef {
    fn from(c: Color) -> Self {
        Self(c)
    }
}

impl From<ColorDef> for Color {
    fn from(c: ColorDef) -> Self {
        c.0
    }
}

impl Serialize for ColorDef {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let Color { r, g, b } = self.0;
        serializer.serialize_str(&format!("#{r:02x}{g:02x}{b:02x}"))
    }
}

impl<'de> Deserialize<'de> for ColorDef {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            RgbObj { r: u8, g: u8, b: u8 },
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::RgbObj { r, g, b } => Ok(Self(Color::rgb(r, g, b))),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self(Color::rgb(*r, *g, *b))),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b])",
                )),
            },
        }
    }
}

fn parse_hex(s: &str) -> Result<ColorDef, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }

    let byte = |i: usize| {
        let pair = &s[i..i + 2];
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    };
    Ok(ColorDef(Color::rgb(byte(0)?, byte(2)?, byte(4)?)))
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
