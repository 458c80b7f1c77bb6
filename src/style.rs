/*
 * Style Module
 *
 * A `Style` is the externally supplied appearance record for a creature.
 * It is resolved exactly once (at creation, or when the style is explicitly
 * re-applied) into a `ResolvedStyle` holding concrete hex colours. A fill of
 * "random" becomes a random hue at saturation 0.6 / value 0.9.
 */

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::{color_name_to_hex, hsv_to_hex, shift_lightness_saturation};

pub const RANDOM_FILL: &str = "random";
const RANDOM_SATURATION: f32 = 0.6;
const RANDOM_VALUE: f32 = 0.9;

// Fins are a lighter, less saturated version of the body fill
const FIN_LIGHTNESS_SHIFT: f32 = 0.12;
const FIN_SATURATION_SHIFT: f32 = -0.1;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Style {
    pub fill: String,
    pub outline: String,
    pub outline_width: f32,
    pub eyes_color: String,
    pub fin_fill: Option<String>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fill: RANDOM_FILL.to_string(),
            outline: "white".to_string(),
            outline_width: 2.0,
            eyes_color: "white".to_string(),
            fin_fill: None,
        }
    }
}

/// A style with every colour reduced to a concrete value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStyle {
    pub fill: String,
    pub outline: String,
    pub outline_width: f32,
    pub eyes_color: String,
    pub fin_fill: String,
}

/// Resolves named colours and the "random" fill. Call once per creature and
/// again only on an explicit restyle.
pub fn resolve_style<R: Rng + ?Sized>(style: &Style, rng: &mut R) -> ResolvedStyle {
    let fill = if style.fill.trim().eq_ignore_ascii_case(RANDOM_FILL) {
        hsv_to_hex(rng.gen::<f32>(), RANDOM_SATURATION, RANDOM_VALUE)
    } else {
        color_name_to_hex(&style.fill)
    };

    let fin_fill = match &style.fin_fill {
        Some(fin) => color_name_to_hex(fin),
        None => shift_lightness_saturation(&fill, FIN_LIGHTNESS_SHIFT, FIN_SATURATION_SHIFT),
    };

    ResolvedStyle {
        fill,
        outline: color_name_to_hex(&style.outline),
        outline_width: style.outline_width.max(0.0),
        eyes_color: color_name_to_hex(&style.eyes_color),
        fin_fill,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::parse_hex;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_fill_is_a_hex_code_at_fixed_saturation_and_value() {
        let mut rng = SmallRng::seed_from_u64(42);
        for _ in 0..50 {
            let resolved = resolve_style(&Style::default(), &mut rng);
            assert_eq!(resolved.fill.len(), 7);
            let (r, g, b) = parse_hex(&resolved.fill).expect("valid #RRGGBB");
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            // v = 0.9 -> 229.5, v * (1 - s) = 0.36 -> 91.8
            assert!((229..=230).contains(&max), "max channel {max}");
            assert_eq!(min, 92);
        }
    }

    #[test]
    fn named_colours_are_resolved_and_fin_fill_derived() {
        let mut rng = SmallRng::seed_from_u64(1);
        let style = Style {
            fill: "teal".into(),
            outline: "black".into(),
            outline_width: -3.0,
            eyes_color: "#abc".into(),
            fin_fill: None,
        };
        let resolved = resolve_style(&style, &mut rng);
        assert_eq!(resolved.fill, "#008080");
        assert_eq!(resolved.outline, "#000000");
        assert_eq!(resolved.outline_width, 0.0);
        assert_eq!(resolved.eyes_color, "#abc");
        assert_ne!(resolved.fin_fill, resolved.fill);
        assert!(parse_hex(&resolved.fin_fill).is_some());
    }

    #[test]
    fn explicit_fin_fill_wins() {
        let mut rng = SmallRng::seed_from_u64(1);
        let style = Style {
            fin_fill: Some("orange".into()),
            ..Style::default()
        };
        assert_eq!(resolve_style(&style, &mut rng).fin_fill, "#ffa500");
    }

    #[test]
    fn unreadable_fill_passes_through() {
        let mut rng = SmallRng::seed_from_u64(3);
        let style = Style {
            fill: "#a€bc".into(),
            ..Style::default()
        };
        let resolved = resolve_style(&style, &mut rng);
        assert_eq!(resolved.fill, "#a€bc");
        assert_eq!(resolved.fin_fill, "#a€bc");
    }

    #[test]
    fn fixed_colours_resolve_identically_every_time() {
        let mut rng = SmallRng::seed_from_u64(9);
        let style = Style {
            fill: "salmon".into(),
            ..Style::default()
        };
        let first = resolve_style(&style, &mut rng);
        let second = resolve_style(&style, &mut rng);
        assert_eq!(first, second);
    }
}
