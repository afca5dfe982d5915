//! Colour palette for mail colour commands
//!
//! Named colours cover the regular palette every viewer can use and the
//! premium palette with its two spellings. Anything else must be written as
//! `#RRGGBB`.

/// Colour of a comment that requests none
pub const WHITE: u32 = 0xFF_FF_FF;

/// Named colours recognised in mail strings
pub const NAMED_COLORS: &[(&str, u32)] = &[
    // Regular palette
    ("white", 0xFF_FF_FF),
    ("red", 0xFF_00_00),
    ("pink", 0xFF_80_80),
    ("orange", 0xFF_CC_00),
    ("yellow", 0xFF_FF_00),
    ("green", 0x00_FF_00),
    ("cyan", 0x00_FF_FF),
    ("blue", 0x00_00_FF),
    ("purple", 0xC0_00_FF),
    ("black", 0x00_00_00),
    // Premium palette
    ("niconicowhite", 0xCC_CC_99),
    ("white2", 0xCC_CC_99),
    ("truered", 0xCC_00_33),
    ("red2", 0xCC_00_33),
    ("passionorange", 0xFF_66_00),
    ("orange2", 0xFF_66_00),
    ("madyellow", 0x99_99_00),
    ("yellow2", 0x99_99_00),
    ("elementalgreen", 0x00_CC_66),
    ("green2", 0x00_CC_66),
    ("marineblue", 0x33_FF_CC),
    ("blue2", 0x33_FF_CC),
    ("nobleviolet", 0x66_33_CC),
    ("purple2", 0x66_33_CC),
];

/// Look up a named colour
#[must_use]
pub fn named_color(name: &str) -> Option<u32> {
    NAMED_COLORS
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|&(_, rgb)| rgb)
}

/// Parse a `#RRGGBB` colour token
///
/// Exactly six hex digits after the hash are required; shorter, longer or
/// otherwise malformed tokens are not colours.
#[must_use]
pub fn parse_hex_color(token: &str) -> Option<u32> {
    let digits = token.strip_prefix('#')?;
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_lookup() {
        assert_eq!(named_color("red"), Some(0xFF0000));
        assert_eq!(named_color("marineblue"), named_color("blue2"));
        assert_eq!(named_color("chartreuse"), None);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#00ff7F"), Some(0x00FF7F));
        assert_eq!(parse_hex_color("00ff7f"), None);
        assert_eq!(parse_hex_color("#00ff7"), None);
        assert_eq!(parse_hex_color("#00ff7fa"), None);
        assert_eq!(parse_hex_color("#00gg7f"), None);
        assert_eq!(parse_hex_color("#+0ff7f"), None);
    }
}
