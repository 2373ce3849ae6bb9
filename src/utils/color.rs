use eframe::egui::Color32;

/// Status palette, hex-specified to match the service's result page.
pub fn accent() -> Color32 {
    parse_hex("#4a90d9").unwrap_or(Color32::LIGHT_BLUE)
}

pub fn success() -> Color32 {
    parse_hex("#00b400").unwrap_or(Color32::GREEN)
}

pub fn danger() -> Color32 {
    parse_hex("#dc3232").unwrap_or(Color32::RED)
}

pub fn parse_hex(hex: &str) -> Option<Color32> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_six_digit_hex() {
        assert_eq!(
            parse_hex("#4a90d9"),
            Some(Color32::from_rgb(0x4a, 0x90, 0xd9))
        );
        assert_eq!(parse_hex("ffffff"), Some(Color32::from_rgb(255, 255, 255)));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn palette_never_falls_back() {
        assert_eq!(accent(), Color32::from_rgb(0x4a, 0x90, 0xd9));
        assert_eq!(success(), Color32::from_rgb(0x00, 0xb4, 0x00));
        assert_eq!(danger(), Color32::from_rgb(0xdc, 0x32, 0x32));
    }
}
