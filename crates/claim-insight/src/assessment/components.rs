use super::domain::DamageLabel;
use super::draws::DrawSource;
use super::keywords;
use serde::Serialize;

/// Caption keyword families the detector recognises, scanned in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Glass,
    Body,
    Paint,
    Structural,
    Electrical,
    Interior,
    Flood,
}

impl ComponentCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Glass,
            Self::Body,
            Self::Paint,
            Self::Structural,
            Self::Electrical,
            Self::Interior,
            Self::Flood,
        ]
    }

    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Glass => keywords::GLASS_KEYWORDS,
            Self::Body => keywords::BODY_KEYWORDS,
            Self::Paint => keywords::PAINT_KEYWORDS,
            Self::Structural => keywords::STRUCTURAL_KEYWORDS,
            Self::Electrical => keywords::ELECTRICAL_KEYWORDS,
            Self::Interior => keywords::INTERIOR_KEYWORDS,
            Self::Flood => keywords::FLOOD_KEYWORDS,
        }
    }
}

/// Ordered, duplicate-free list of affected component labels.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComponentList(Vec<String>);

impl ComponentList {
    /// Appends `label` unless an identical entry is already present.
    pub fn push(&mut self, label: &str) -> bool {
        if self.0.iter().any(|existing| existing == label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn joined(&self) -> String {
        self.0.join(", ")
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<'a> FromIterator<&'a str> for ComponentList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut list = Self::default();
        for label in iter {
            list.push(label);
        }
        list
    }
}

/// Maps a caption and damage type to the components a report should list.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentDetector;

impl ComponentDetector {
    pub fn new() -> Self {
        Self
    }

    /// Never returns an empty list; falls back to a damage-type keyed default.
    pub fn detect<D>(&self, caption: &str, damage_type: &str, draws: &mut D) -> ComponentList
    where
        D: DrawSource + ?Sized,
    {
        let caption = caption.to_lowercase();
        let damage = DamageLabel::new(damage_type);
        let mut detected = ComponentList::default();

        for (family, components) in keywords::DAMAGE_TYPE_COMPONENTS {
            if damage.mentions(family) {
                for component in components.iter() {
                    detected.push(component);
                }
            }
        }

        for category in ComponentCategory::ordered() {
            let hit = category
                .keywords()
                .iter()
                .any(|keyword| caption.contains(keyword));
            if hit {
                let label = category_label(category, &caption, &damage, draws);
                detected.push(label);
            }
        }

        if detected.is_empty() {
            detected = default_components(&damage).iter().copied().collect();
        }

        detected
    }
}

fn category_label<D>(
    category: ComponentCategory,
    caption: &str,
    damage: &DamageLabel,
    draws: &mut D,
) -> &'static str
where
    D: DrawSource + ?Sized,
{
    match category {
        ComponentCategory::Flood => {
            let labels = keywords::FLOOD_COMPONENT_LABELS;
            let index = draws.draw(0, labels.len() as i32 - 1);
            labels[index.clamp(0, labels.len() as i32 - 1) as usize]
        }
        ComponentCategory::Glass if caption.contains("windshield") => "Broken windshield",
        ComponentCategory::Glass => "Window glass damage",
        ComponentCategory::Body if caption.contains("roof") => "Roof dents",
        ComponentCategory::Body if caption.contains("door") => "Door damage",
        ComponentCategory::Body => "Body panel damage",
        ComponentCategory::Paint => "Paint damage",
        ComponentCategory::Structural => "Structural damage",
        ComponentCategory::Electrical if damage.is_wet() => "Electrical system damage",
        ComponentCategory::Electrical => "Electrical component damage",
        ComponentCategory::Interior if damage.is_wet() => "Interior flood damage",
        ComponentCategory::Interior => "Interior damage",
    }
}

fn default_components(damage: &DamageLabel) -> &'static [&'static str] {
    if damage.is_flood_family() {
        keywords::DEFAULT_WET_COMPONENTS
    } else if damage.mentions("fire") {
        keywords::DEFAULT_FIRE_COMPONENTS
    } else if damage.mentions("hail") {
        keywords::DEFAULT_HAIL_COMPONENTS
    } else {
        keywords::DEFAULT_COMPONENTS
    }
}
