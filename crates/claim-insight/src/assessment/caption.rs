//! Caption intake: the filename-driven caption analyzer and the fallback applied when
//! a caption producer returns nothing usable.

use super::draws::DrawSource;
use super::keywords;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const FIRE_FALLBACK_CAPTION: &str =
    "visible fire damage, charred surfaces and soot; burned areas and structural charring visible";
pub const PROPERTY_FALLBACK_CAPTION: &str =
    "visible property damage; signs of surface damage and debris";

/// Captions shorter than this (after trimming) are replaced by a fallback.
pub const MIN_CAPTION_LEN: usize = 6;

const FLOOD_SEVERE_DESCRIPTORS: &[&str] = &[
    "Complete vehicle submersion detected with severe water intrusion.",
    "Deep flood water has entered critical vehicle components requiring extensive repairs.",
    "Submerged vehicle shows signs of complete water damage to all systems.",
    "Severe flood damage affecting electrical, mechanical, and interior systems.",
    "Vehicle appears completely inundated with water damage throughout.",
];
const FLOOD_MODERATE_DESCRIPTORS: &[&str] = &[
    "Significant water damage affecting multiple vehicle systems.",
    "Moderate flood damage with water intrusion into interior compartments.",
    "Noticeable water damage requiring professional assessment and drying.",
    "Vehicle shows evidence of water exposure affecting various components.",
];
const FLOOD_LIGHT_DESCRIPTORS: &[&str] = &[
    "Water damage observed on vehicle surfaces.",
    "Moisture intrusion detected requiring attention.",
    "Signs of water exposure visible on the vehicle.",
];
const MINOR_DESCRIPTORS: &[&str] = &[
    "Minor surface imperfections observed.",
    "Cosmetic damage affecting appearance only.",
    "Superficial marks requiring touch-up repair.",
    "Light surface damage with no structural impact.",
    "Minor dents and scratches visible - cosmetic only.",
    "Paint or finish damage requiring minimal repair.",
];
const SEVERE_DESCRIPTORS: &[&str] = &[
    "Multiple impact points visible on exterior surfaces.",
    "Surface deformation and material stress observed.",
    "Visible structural compromise requiring assessment.",
    "External damage affecting functional components.",
    "Material deterioration and surface imperfections noted.",
    "Significant damage requiring professional assessment.",
];
const MODERATE_DESCRIPTORS: &[&str] = &[
    "Moderate damage requiring attention.",
    "Several affected areas visible.",
    "Noticeable damage impacting appearance.",
    "Multiple dents or scratches observed.",
    "Functional components may be affected.",
];
const NEUTRAL_DESCRIPTORS: &[&str] = &[
    "Damage assessment in progress.",
    "Visual inspection completed.",
    "Property damage detected.",
    "External surfaces show signs of impact.",
    "Assessment ready for claim processing.",
];

/// Synthesizes a caption from the uploaded file's name. It reads nothing but the
/// name, so captions only carry the clues a claimant typed into it.
#[derive(Debug, Clone, Copy, Default)]
pub struct CaptionHeuristicAnalyzer;

impl CaptionHeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Damage families whose clue words appear in `filename`, in table order.
    pub fn detected_families(&self, filename: &str) -> Vec<&'static str> {
        let filename = filename.to_lowercase();
        keywords::FILENAME_FAMILIES
            .iter()
            .filter(|(_, clues)| clues.iter().any(|clue| filename.contains(clue)))
            .map(|(family, _)| *family)
            .collect()
    }

    pub fn caption_for_filename<D>(&self, filename: &str, draws: &mut D) -> String
    where
        D: DrawSource + ?Sized,
    {
        let lowered = base_name(filename).to_lowercase();
        let families = self.detected_families(&lowered);

        let mut caption = String::from("Image analysis indicates ");
        if families.is_empty() {
            caption.push_str("visible damage to property. ");
        } else {
            caption.push_str(&format!("possible {} damage. ", families.join(", ")));
        }

        let pool = descriptor_pool(&lowered, families.contains(&"water"));
        caption.push_str(pick(pool, draws));
        caption
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

fn descriptor_pool(filename: &str, wet: bool) -> &'static [&'static str] {
    let mentions = |words: &[&str]| words.iter().any(|word| filename.contains(word));

    if wet {
        if mentions(keywords::FILENAME_FLOOD_SEVERE) {
            FLOOD_SEVERE_DESCRIPTORS
        } else if mentions(keywords::FILENAME_FLOOD_MODERATE) {
            FLOOD_MODERATE_DESCRIPTORS
        } else {
            FLOOD_LIGHT_DESCRIPTORS
        }
    } else if mentions(keywords::FILENAME_MINOR) {
        MINOR_DESCRIPTORS
    } else if mentions(keywords::FILENAME_SEVERE) {
        SEVERE_DESCRIPTORS
    } else if mentions(keywords::FILENAME_MODERATE) {
        MODERATE_DESCRIPTORS
    } else {
        NEUTRAL_DESCRIPTORS
    }
}

fn pick<D>(pool: &'static [&'static str], draws: &mut D) -> &'static str
where
    D: DrawSource + ?Sized,
{
    let last = pool.len().saturating_sub(1) as i32;
    let index = draws.draw(0, last).clamp(0, last) as usize;
    pool[index]
}

/// Channel means of the uploaded image, computed by whatever decoded it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelMeans {
    pub mean_red: f64,
    pub mean_gray: f64,
}

impl PixelMeans {
    /// Red dominance over overall brightness reads as fire.
    pub fn suggests_fire(&self) -> bool {
        self.mean_red > self.mean_gray * 1.15 && self.mean_red > 80.0
    }
}

/// Caption handed to the scorer, plus whether it was substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCaption {
    pub text: String,
    pub fallback: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaptionIntake;

impl CaptionIntake {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, raw: Option<&str>, pixels: Option<PixelMeans>) -> ResolvedCaption {
        let trimmed = raw.map(str::trim).unwrap_or_default();
        if trimmed.chars().count() >= MIN_CAPTION_LEN {
            return ResolvedCaption {
                text: trimmed.to_string(),
                fallback: false,
            };
        }

        let text = match pixels {
            Some(means) if means.suggests_fire() => FIRE_FALLBACK_CAPTION,
            _ => PROPERTY_FALLBACK_CAPTION,
        };
        warn!(
            caption_len = trimmed.len(),
            has_pixels = pixels.is_some(),
            "caption unusable, substituting heuristic fallback"
        );

        ResolvedCaption {
            text: text.to_string(),
            fallback: true,
        }
    }
}
