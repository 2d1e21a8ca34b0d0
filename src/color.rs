//! Minimal CSS color parsing for the non-browser surfaces.
//!
//! The browser canvas takes palette strings as-is. The egui and tiny-skia
//! surfaces need concrete channels, so they go through [`Rgba::parse_css`].
//! Only the hex notations used by the stylesheet and `transparent` are
//! understood; anything else resolves to `None` and is not drawn.

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    /// Parses `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` or `transparent`.
    pub fn parse_css(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        let hex = value.strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|n| n * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self { r: nibble(0)?, g: nibble(1)?, b: nibble(2)?, a: 255 }),
            4 => Some(Self { r: nibble(0)?, g: nibble(1)?, b: nibble(2)?, a: nibble(3)? }),
            6 => Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: 255 }),
            8 => Some(Self { r: byte(0)?, g: byte(2)?, b: byte(4)?, a: byte(6)? }),
            _ => None,
        }
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(Rgba::parse_css("#30363d"), Some(Rgba { r: 0x30, g: 0x36, b: 0x3d, a: 255 }));
        assert_eq!(Rgba::parse_css("#3794ff22"), Some(Rgba { r: 0x37, g: 0x94, b: 0xff, a: 0x22 }));
        assert_eq!(Rgba::parse_css("#fff"), Some(Rgba { r: 255, g: 255, b: 255, a: 255 }));
        assert_eq!(Rgba::parse_css(" transparent "), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_unresolved_values_are_rejected() {
        assert_eq!(Rgba::parse_css(""), None);
        assert_eq!(Rgba::parse_css("22"), None);
        assert_eq!(Rgba::parse_css("rgb(1, 2, 3)"), None);
        assert_eq!(Rgba::parse_css("#12345"), None);
        assert_eq!(Rgba::parse_css("#gg0000"), None);
    }
}
