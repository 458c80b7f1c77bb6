/*
 * Color Module
 *
 * Helpers for the colour strings used in creature styles:
 * - Named colour lookup (`"red"` -> `"#ff0000"`), unknown names pass through
 * - Hex parsing and formatting
 * - HSV/HSL conversion, used for random fills and derived fin colours
 */

// CSS colour names recognised in style records
const NAMED_COLORS: &[(&str, &str)] = &[
    ("aqua", "#00ffff"),
    ("black", "#000000"),
    ("blue", "#0000ff"),
    ("coral", "#ff7f50"),
    ("crimson", "#dc143c"),
    ("cyan", "#00ffff"),
    ("darkblue", "#00008b"),
    ("darkgreen", "#006400"),
    ("darkorange", "#ff8c00"),
    ("darkslategray", "#2f4f4f"),
    ("fuchsia", "#ff00ff"),
    ("gold", "#ffd700"),
    ("gray", "#808080"),
    ("green", "#008000"),
    ("grey", "#808080"),
    ("indigo", "#4b0082"),
    ("khaki", "#f0e68c"),
    ("lightblue", "#add8e6"),
    ("lightgreen", "#90ee90"),
    ("lime", "#00ff00"),
    ("magenta", "#ff00ff"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("olive", "#808000"),
    ("orange", "#ffa500"),
    ("orchid", "#da70d6"),
    ("pink", "#ffc0cb"),
    ("purple", "#800080"),
    ("red", "#ff0000"),
    ("salmon", "#fa8072"),
    ("seagreen", "#2e8b57"),
    ("sienna", "#a0522d"),
    ("silver", "#c0c0c0"),
    ("skyblue", "#87ceeb"),
    ("tan", "#d2b48c"),
    ("teal", "#008080"),
    ("tomato", "#ff6347"),
    ("turquoise", "#40e0d0"),
    ("violet", "#ee82ee"),
    ("white", "#ffffff"),
    ("yellow", "#ffff00"),
];

/// Maps a known colour name to its `#rrggbb` code. Anything else, including
/// hex codes and unknown names, is returned unchanged.
pub fn color_name_to_hex(name: &str) -> String {
    let lowered = name.trim().to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(known, _)| *known == lowered)
        .map(|(_, hex)| (*hex).to_string())
        .unwrap_or_else(|| name.to_string())
}

/// Parses `#rrggbb` or `#rgb` into its channels.
pub fn parse_hex(code: &str) -> Option<(u8, u8, u8)> {
    let digits = code.trim().strip_prefix('#')?;
    if !digits.is_ascii() {
        return None;
    }
    match digits.len() {
        6 => {
            let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
            let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
            let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let mut channels = [0u8; 3];
            for (slot, c) in channels.iter_mut().zip(digits.chars()) {
                let v = c.to_digit(16)? as u8;
                *slot = v * 16 + v;
            }
            Some((channels[0], channels[1], channels[2]))
        }
        _ => None,
    }
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn unit_to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// HSV to RGB conversion, all components in [0, 1].
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    let h = h.rem_euclid(1.0) * 6.0;
    let c = v * s;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 1.0 {
        (c, x, 0.0)
    } else if h < 2.0 {
        (x, c, 0.0)
    } else if h < 3.0 {
        (0.0, c, x)
    } else if h < 4.0 {
        (0.0, x, c)
    } else if h < 5.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    (r + m, g + m, b + m)
}

pub fn hsv_to_hex(h: f32, s: f32, v: f32) -> String {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    rgb_to_hex(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
}

/// RGB (bytes) to HSL, all components in [0, 1].
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;
    let delta = max - min;

    if delta <= f32::EPSILON {
        return (0.0, 0.0, l);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    (h / 6.0, s.clamp(0.0, 1.0), l)
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let v = l + c / 2.0;
    let sv = if v <= f32::EPSILON { 0.0 } else { c / v };
    hsv_to_rgb(h, sv, v)
}

/// Shifts the lightness and saturation of a hex colour. Colours that do not
/// parse as hex are returned unchanged.
pub fn shift_lightness_saturation(code: &str, lightness: f32, saturation: f32) -> String {
    let Some((r, g, b)) = parse_hex(code) else {
        return code.to_string();
    };
    let (h, s, l) = rgb_to_hsl(r, g, b);
    let (r, g, b) = hsl_to_rgb(
        h,
        (s + saturation).clamp(0.0, 1.0),
        (l + lightness).clamp(0.0, 1.0),
    );
    rgb_to_hex(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_colours_resolve_and_unknown_pass_through() {
        assert_eq!(color_name_to_hex("red"), "#ff0000");
        assert_eq!(color_name_to_hex("Navy"), "#000080");
        assert_eq!(color_name_to_hex("#123456"), "#123456");
        assert_eq!(color_name_to_hex("blurple"), "blurple");
    }

    #[test]
    fn hex_parsing_handles_long_and_short_forms() {
        assert_eq!(parse_hex("#ff8000"), Some((255, 128, 0)));
        assert_eq!(parse_hex("#0f0"), Some((0, 255, 0)));
        assert_eq!(parse_hex("ff8000"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn multibyte_codes_are_not_hex() {
        // six bytes long, but not six ASCII digits
        assert_eq!(parse_hex("#a€bc"), None);
        assert_eq!(parse_hex("#€"), None);
        assert_eq!(shift_lightness_saturation("#a€bc", 0.2, 0.1), "#a€bc");
    }

    #[test]
    fn hsv_primaries() {
        assert_eq!(hsv_to_hex(0.0, 1.0, 1.0), "#ff0000");
        assert_eq!(hsv_to_hex(1.0 / 3.0, 1.0, 1.0), "#00ff00");
        assert_eq!(hsv_to_hex(2.0 / 3.0, 1.0, 1.0), "#0000ff");
        assert_eq!(hsv_to_hex(0.5, 0.0, 0.0), "#000000");
    }

    #[test]
    fn hsl_round_trip_keeps_the_colour() {
        let (h, s, l) = rgb_to_hsl(51, 153, 204);
        let (r, g, b) = hsl_to_rgb(h, s, l);
        assert_eq!(rgb_to_hex(unit_to_byte(r), unit_to_byte(g), unit_to_byte(b)), "#3399cc");
    }

    #[test]
    fn lightness_shift_brightens_and_ignores_non_hex() {
        let lighter = shift_lightness_saturation("#336699", 0.2, 0.0);
        let (r, g, b) = parse_hex(&lighter).unwrap();
        assert!(r > 0x33 && g > 0x66 && b > 0x99);
        assert_eq!(shift_lightness_saturation("random", 0.2, 0.1), "random");
    }
}
