//! Hex color helpers used by the style resolver

/// Parse `#rgb` or `#rrggbb`
pub fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    match hex.len() {
        3 => {
            let mut channels = hex.chars().map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
            Some((channels.next()??, channels.next()??, channels.next()??))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        _ => None,
    }
}

/// Accepts hex colors and CSS color functions
pub fn is_valid_color(color: &str) -> bool {
    let color = color.trim();
    if color.starts_with('#') {
        return parse_hex(color).is_some();
    }

    ["rgb(", "rgba(", "hsl(", "hsla(", "linear-gradient(", "radial-gradient("]
        .iter()
        .any(|prefix| color.starts_with(prefix) && color.ends_with(')'))
        || color == "transparent"
}

/// Perceived brightness above one half. Non-hex colors count as light.
pub fn is_light_color(color: &str) -> bool {
    match parse_hex(color) {
        Some((r, g, b)) => {
            let luminance = (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
            luminance > 0.5
        }
        None => true,
    }
}

/// Shift every channel by `amount`, clamped. Non-hex colors pass through.
pub fn adjust_color(color: &str, amount: i32) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => {
            let shift = |c: u8| (c as i32 + amount).clamp(0, 255) as u8;
            format!("#{:02x}{:02x}{:02x}", shift(r), shift(g), shift(b))
        }
        None => color.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#ffffff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#C9A962"), Some((0xc9, 0xa9, 0x62)));
        assert_eq!(parse_hex("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex("#12"), None);
        assert_eq!(parse_hex("ffffff"), None);
        assert_eq!(parse_hex("#gggggg"), None);
    }

    #[test]
    fn test_adjust_matches_default_hover() {
        assert_eq!(adjust_color("#c9a86c", -17), "#b8975b");
        assert_eq!(adjust_color("#ffffff", -7), "#f8f8f8");
        assert_eq!(adjust_color("#000000", -10), "#000000");
        assert_eq!(adjust_color("rgba(0, 0, 0, 0.5)", 10), "rgba(0, 0, 0, 0.5)");
    }

    #[test]
    fn test_light_and_dark() {
        assert!(is_light_color("#ffffff"));
        assert!(is_light_color("#e8d4b8"));
        assert!(!is_light_color("#1a1a1a"));
        assert!(!is_light_color("#0047AB"));
    }

    #[test]
    fn test_validity() {
        assert!(is_valid_color("#C9A962"));
        assert!(is_valid_color("rgba(0, 0, 0, 0.4)"));
        assert!(!is_valid_color("not-a-color"));
        assert!(!is_valid_color("#12345"));
    }
}
