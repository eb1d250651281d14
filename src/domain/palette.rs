use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use super::errors::TimetableError;

/// A 24-bit display colour, written as `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl FromStr for Rgb {
    type Err = TimetableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TimetableError::Config(format!("invalid colour '{s}', expected #RRGGBB"));
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok(Rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

/// Read-only subject → colour mapping with a fallback for unknown subjects.
#[derive(Debug, Clone)]
pub struct Palette {
    colors: HashMap<String, Rgb>,
    default: Rgb,
}

impl Palette {
    pub fn new(colors: HashMap<String, Rgb>, default: Rgb) -> Self {
        Self { colors, default }
    }

    /// Colour for a subject label. Lookup is exact; anything unmapped gets
    /// the default colour.
    pub fn resolve_color(&self, label: &str) -> Rgb {
        self.colors.get(label).copied().unwrap_or(self.default)
    }

    pub fn default_color(&self) -> Rgb {
        self.default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        let mut colors = HashMap::new();
        colors.insert("Math".to_string(), Rgb(0xAE, 0xD6, 0xF1));
        Palette::new(colors, Rgb(0xD5, 0xD8, 0xDC))
    }

    #[test]
    fn test_resolve_known_subject() {
        assert_eq!(palette().resolve_color("Math"), Rgb(0xAE, 0xD6, 0xF1));
    }

    #[test]
    fn test_resolve_unknown_subject_uses_default() {
        let palette = palette();
        assert_eq!(palette.resolve_color("Unknown Subject"), palette.default_color());
        assert_eq!(palette.resolve_color("math"), palette.default_color());
        assert_eq!(palette.resolve_color(""), palette.default_color());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!("#AED6F1".parse::<Rgb>().unwrap(), Rgb(0xAE, 0xD6, 0xF1));
        assert_eq!("#aed6f1".parse::<Rgb>().unwrap(), Rgb(0xAE, 0xD6, 0xF1));
        assert_eq!(Rgb(0xAE, 0xD6, 0xF1).to_string(), "#AED6F1");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["AED6F1", "#AED6F", "#GGGGGG", "#AED6F1FF", "", "#ÄÄÄ", "#+A+B+C", "#-1-2-3"] {
            assert!(bad.parse::<Rgb>().is_err(), "accepted {bad}");
        }
    }
}
