/*
 * Species Module
 *
 * Static body plans for every creature kind: the spine profile (radius taper,
 * spacing, bend limit, caps and eyes) plus the attachments hung off it.
 * - Fish: two side fin pairs, a top fin and a forked tail fin
 * - Snake: a long tapering spine and nothing else
 * - Lizard: four legs anchored at two links
 *
 * All lengths are unscaled body units; creatures multiply them by their scale.
 */

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::leg::LegConfig;
use crate::spine::{BodyProfile, EyeGeometry};

const SNAKE_SEGMENTS: usize = 54;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[default]
    Fish,
    Snake,
    Lizard,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Fish, Species::Snake, Species::Lizard];

    pub fn label(self) -> &'static str {
        match self {
            Species::Fish => "Fish",
            Species::Snake => "Snake",
            Species::Lizard => "Lizard",
        }
    }

    pub fn profile(self) -> BodyProfile {
        match self {
            Species::Fish => BodyProfile {
                radii: vec![68.0, 81.0, 84.0, 83.0, 77.0, 64.0, 51.0, 38.0, 32.0, 19.0],
                spacing: 64.0,
                max_angle: 25.0,
                head_points: 7,
                tail_points: 4,
                eyes: EyeGeometry {
                    link_index: 0,
                    angle: 70.0,
                    distance: 0.75,
                    radius: 10.0,
                },
            },
            Species::Snake => BodyProfile {
                radii: snake_radii(),
                spacing: 12.0,
                max_angle: 18.0,
                head_points: 6,
                tail_points: 3,
                eyes: EyeGeometry {
                    link_index: 0,
                    angle: 60.0,
                    distance: 0.6,
                    radius: 4.0,
                },
            },
            Species::Lizard => BodyProfile {
                radii: vec![
                    52.0, 58.0, 40.0, 60.0, 68.0, 71.0, 65.0, 50.0, 28.0, 15.0, 11.0, 9.0, 7.0,
                    7.0,
                ],
                spacing: 64.0,
                max_angle: 20.0,
                head_points: 6,
                tail_points: 3,
                eyes: EyeGeometry {
                    link_index: 0,
                    angle: 55.0,
                    distance: 0.65,
                    radius: 8.0,
                },
            },
        }
    }

    /// Range a freshly spawned creature draws its scale from.
    pub fn scale_range(self) -> RangeInclusive<f32> {
        match self {
            Species::Fish => 0.15..=0.25,
            Species::Snake => 0.6..=0.9,
            Species::Lizard => 0.15..=0.22,
        }
    }

    pub fn fins(self) -> Option<FinSet> {
        match self {
            Species::Fish => Some(FinSet::fish()),
            _ => None,
        }
    }

    pub fn legs(self) -> Vec<LegConfig> {
        match self {
            Species::Lizard => lizard_legs(),
            _ => Vec::new(),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Species {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fish" => Ok(Species::Fish),
            "snake" => Ok(Species::Snake),
            "lizard" => Ok(Species::Lizard),
            _ => Err(ConfigError::UnknownSpecies(s.to_string())),
        }
    }
}

// Short head bulge, then a linear taper down to the tail tip
fn snake_radii() -> Vec<f32> {
    (0..SNAKE_SEGMENTS)
        .map(|i| match i {
            0 => 16.0,
            1 => 19.0,
            2 => 15.0,
            _ => {
                let t = (i - 3) as f32 / (SNAKE_SEGMENTS - 4) as f32;
                18.0 - 15.0 * t
            }
        })
        .collect()
}

fn lizard_legs() -> Vec<LegConfig> {
    let front = |is_shoulder_right| LegConfig {
        link_index: 3,
        is_shoulder_right,
        is_forward_bend: true,
        anchor_angle: 60.0,
        anchor_distance: 110.0,
        segment_lengths: [55.0, 55.0],
        max_difference: 70.0,
        return_speed: 3.0,
        width: 16.0,
    };
    let back = |is_shoulder_right| LegConfig {
        link_index: 7,
        is_shoulder_right,
        is_forward_bend: false,
        anchor_angle: 120.0,
        anchor_distance: 100.0,
        segment_lengths: [50.0, 50.0],
        max_difference: 60.0,
        return_speed: 3.0,
        width: 14.0,
    };
    vec![front(false), front(true), back(false), back(true)]
}

/// One bilateral pair of elliptic fins.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SideFin {
    pub link_index: usize,
    /// Semi-axes (along, across) of each ellipse.
    pub radii: (f32, f32),
    /// Tilt from the preceding link's facing, degrees.
    pub angle: f32,
}

/// A fin along the back, bowed sideways as the body bends.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TopFin {
    pub start_link: usize,
    pub end_link: usize,
    /// Sideways bow at full curvature.
    pub offset: f32,
}

/// Forked tail whose prongs open up and swing with the body curvature.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TailFin {
    pub length: f32,
    /// Half-angle between the prongs on a straight body, degrees.
    pub spread: f32,
    /// Extra half-angle added at full curvature, degrees.
    pub separation: f32,
    /// Swing of the whole tail at full curvature, degrees.
    pub bend: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinSet {
    pub side_fins: Vec<SideFin>,
    pub top_fin: TopFin,
    pub tail_fin: TailFin,
}

impl FinSet {
    pub fn fish() -> Self {
        Self {
            side_fins: vec![
                SideFin {
                    link_index: 3,
                    radii: (80.0, 32.0),
                    angle: 60.0,
                },
                SideFin {
                    link_index: 7,
                    radii: (48.0, 16.0),
                    angle: 45.0,
                },
            ],
            top_fin: TopFin {
                start_link: 4,
                end_link: 7,
                offset: 50.0,
            },
            tail_fin: TailFin {
                length: 110.0,
                spread: 20.0,
                separation: 15.0,
                bend: 35.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_have_the_documented_segment_counts() {
        assert_eq!(Species::Fish.profile().radii.len(), 10);
        assert_eq!(Species::Snake.profile().radii.len(), 54);
        assert_eq!(Species::Lizard.profile().radii.len(), 14);
    }

    #[test]
    fn snake_tapers_toward_the_tail() {
        let radii = Species::Snake.profile().radii;
        assert!(radii[3] > radii[20]);
        assert!(radii[20] > radii[53]);
        assert!(radii.iter().all(|r| *r > 0.0));
    }

    #[test]
    fn attachments_point_inside_their_bodies() {
        for species in Species::ALL {
            let links = species.profile().radii.len();
            for leg in species.legs() {
                assert!(leg.link_index < links);
            }
            if let Some(fins) = species.fins() {
                for fin in &fins.side_fins {
                    assert!(fin.link_index < links);
                }
                assert!(fins.top_fin.start_link < fins.top_fin.end_link);
                assert!(fins.top_fin.end_link < links);
            }
        }
    }

    #[test]
    fn only_lizards_have_legs_and_only_fish_have_fins() {
        assert_eq!(Species::Lizard.legs().len(), 4);
        assert!(Species::Fish.legs().is_empty());
        assert!(Species::Snake.legs().is_empty());
        assert!(Species::Fish.fins().is_some());
        assert!(Species::Lizard.fins().is_none());
    }

    #[test]
    fn lizard_legs_mirror_left_and_right() {
        let legs = Species::Lizard.legs();
        for pair in legs.chunks(2) {
            assert!(!pair[0].is_shoulder_right);
            assert!(pair[1].is_shoulder_right);
            assert_eq!(pair[0].link_index, pair[1].link_index);
            assert_eq!(pair[0].is_forward_bend, pair[1].is_forward_bend);
        }
    }

    #[test]
    fn species_names_parse_case_insensitively() {
        assert_eq!(" Lizard ".parse::<Species>().ok(), Some(Species::Lizard));
        assert_eq!("SNAKE".parse::<Species>().ok(), Some(Species::Snake));
        assert!(matches!(
            "dragon".parse::<Species>(),
            Err(ConfigError::UnknownSpecies(name)) if name == "dragon"
        ));
    }
}
