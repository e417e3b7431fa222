use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer severity in `0..=100`. Construction always clamps, deserialization rejects
/// anything above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct SeverityScore(u8);

impl SeverityScore {
    pub const MAX: u8 = 100;

    pub fn clamped(raw: i32) -> Self {
        Self(raw.clamp(0, Self::MAX as i32) as u8)
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn level(self) -> SeverityLevel {
        SeverityLevel::from_score(self.0)
    }
}

impl TryFrom<u8> for SeverityScore {
    type Error = ScoreOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value > Self::MAX {
            Err(ScoreOutOfRange(value))
        } else {
            Ok(Self(value))
        }
    }
}

impl From<SeverityScore> for u8 {
    fn from(value: SeverityScore) -> Self {
        value.0
    }
}

impl fmt::Display for SeverityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("severity score {0} exceeds 100")]
pub struct ScoreOutOfRange(pub u8);

/// Tri-level bucket derived from a [`SeverityScore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityLevel {
    Minor,
    Moderate,
    Severe,
}

impl SeverityLevel {
    pub const SEVERE_FROM: u8 = 51;
    pub const MODERATE_FROM: u8 = 26;

    pub const fn ordered() -> [Self; 3] {
        [Self::Minor, Self::Moderate, Self::Severe]
    }

    pub const fn from_score(score: u8) -> Self {
        if score >= Self::SEVERE_FROM {
            Self::Severe
        } else if score >= Self::MODERATE_FROM {
            Self::Moderate
        } else {
            Self::Minor
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "minor" => Some(Self::Minor),
            "moderate" => Some(Self::Moderate),
            "severe" => Some(Self::Severe),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        }
    }

    /// Repair complexity reported alongside this level.
    pub const fn repair_level(self) -> &'static str {
        match self {
            Self::Minor => "Low (cosmetic repair)",
            Self::Moderate => "Medium (functional repair)",
            Self::Severe => "High (structural/critical repair)",
        }
    }

    /// Cost range written into the narrative's cost guidance block.
    pub const fn cost_range(self) -> &'static str {
        match self {
            Self::Minor => "2,000 - 8,000",
            Self::Moderate => "8,000 - 30,000",
            Self::Severe => "30,000 - 2,00,000",
        }
    }

    /// Currency-formatted range used by renderers when a narrative carries no cost
    /// marker at all. Must move together with [`SeverityLevel::cost_range`].
    pub const fn fallback_cost_range(self) -> &'static str {
        match self {
            Self::Minor => "₹3,000 - ₹10,000",
            Self::Moderate => "₹10,000 - ₹40,000",
            Self::Severe => "₹40,000 - ₹2,00,000",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercased damage-type label. Families are matched as substrings, so
/// "floodwater" belongs to both the flood and the water family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageLabel(String);

impl DamageLabel {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn mentions(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    pub fn mentions_any(&self, keywords: &[&str]) -> bool {
        keywords.iter().any(|keyword| self.mentions(keyword))
    }

    /// Flood, water or submerged: drives the flood scoring branch.
    pub fn is_flood_family(&self) -> bool {
        self.mentions_any(&["flood", "water", "submerged"])
    }

    /// Flood or water only; the component labels never looked at "submerged".
    pub fn is_wet(&self) -> bool {
        self.mentions_any(&["flood", "water"])
    }
}

/// Optional claimant details printed in the narrative header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claimant {
    #[serde(default, alias = "policy_holder_name")]
    pub name: Option<String>,
    #[serde(default, alias = "contact_email")]
    pub email: Option<String>,
    #[serde(default, alias = "contact_phone")]
    pub phone: Option<String>,
    #[serde(default, alias = "property_address")]
    pub address: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default, alias = "zip_code")]
    pub zip: Option<String>,
}

impl Claimant {
    pub fn named(&self) -> Option<&str> {
        non_blank(&self.name)
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }

    pub fn phone(&self) -> Option<&str> {
        non_blank(&self.phone)
    }

    pub fn address(&self) -> Option<&str> {
        non_blank(&self.address)
    }

    pub fn city(&self) -> Option<&str> {
        non_blank(&self.city)
    }

    pub fn state(&self) -> Option<&str> {
        non_blank(&self.state)
    }

    pub fn zip(&self) -> Option<&str> {
        non_blank(&self.zip)
    }

    pub fn is_empty(&self) -> bool {
        [
            self.named(),
            self.email(),
            self.phone(),
            self.address(),
            self.city(),
            self.state(),
            self.zip(),
        ]
        .iter()
        .all(Option::is_none)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// One completed submission. Repair level and cost range are always the table
/// entries of `severity_level`, which itself is always derived from the score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub date: String,
    pub damage_type: String,
    pub image_caption: String,
    pub caption_fallback: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub loss_description: String,
    pub severity_score: SeverityScore,
    pub severity_level: SeverityLevel,
    pub affected_components: Vec<String>,
    pub repair_level: String,
    pub cost_range: String,
    #[serde(default, skip_serializing_if = "Claimant::is_empty")]
    pub claimant: Claimant,
}

impl AssessmentRecord {
    pub fn components_joined(&self) -> String {
        self.affected_components.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_breakpoints_are_26_and_51() {
        assert_eq!(SeverityLevel::from_score(0), SeverityLevel::Minor);
        assert_eq!(SeverityLevel::from_score(25), SeverityLevel::Minor);
        assert_eq!(SeverityLevel::from_score(26), SeverityLevel::Moderate);
        assert_eq!(SeverityLevel::from_score(50), SeverityLevel::Moderate);
        assert_eq!(SeverityLevel::from_score(51), SeverityLevel::Severe);
        assert_eq!(SeverityLevel::from_score(100), SeverityLevel::Severe);
    }

    #[test]
    fn level_is_monotonic_in_score() {
        let mut previous = SeverityLevel::Minor;
        for score in 0..=100u8 {
            let level = SeverityLevel::from_score(score);
            assert!(level >= previous, "level dropped at score {score}");
            previous = level;
        }
    }

    #[test]
    fn clamped_scores_stay_in_range() {
        assert_eq!(SeverityScore::clamped(-30).value(), 0);
        assert_eq!(SeverityScore::clamped(115).value(), 100);
        assert_eq!(SeverityScore::clamped(64).value(), 64);
    }

    #[test]
    fn deserializing_rejects_scores_above_100() {
        let ok: SeverityScore = serde_json::from_str("85").expect("85 is valid");
        assert_eq!(ok.value(), 85);
        assert!(serde_json::from_str::<SeverityScore>("101").is_err());
    }

    #[test]
    fn tables_are_distinct_per_level() {
        let repairs: Vec<_> = SeverityLevel::ordered()
            .iter()
            .map(|level| level.repair_level())
            .collect();
        assert_eq!(repairs.len(), 3);
        assert_ne!(repairs[0], repairs[1]);
        assert_ne!(repairs[1], repairs[2]);
        assert!(SeverityLevel::ordered()
            .iter()
            .all(|level| level.fallback_cost_range().starts_with('₹')));
    }

    #[test]
    fn damage_label_matches_substrings() {
        let label = DamageLabel::new("Floodwater Intrusion");
        assert_eq!(label.as_str(), "floodwater intrusion");
        assert!(label.mentions("flood"));
        assert!(label.mentions("water"));
        assert!(label.is_flood_family());

        let submerged = DamageLabel::new("Submerged vehicle");
        assert!(submerged.is_flood_family());
        assert!(!submerged.is_wet());
    }

    #[test]
    fn record_components_join_with_commas() {
        let level = SeverityLevel::Moderate;
        let mut record = AssessmentRecord {
            date: "2025-03-04 09:30:00".to_string(),
            damage_type: "Hail".to_string(),
            image_caption: "dented roof".to_string(),
            caption_fallback: false,
            filename: None,
            loss_description: String::new(),
            severity_score: SeverityScore::clamped(40),
            severity_level: level,
            affected_components: vec!["Roof dents".to_string(), "Paint damage".to_string()],
            repair_level: level.repair_level().to_string(),
            cost_range: level.cost_range().to_string(),
            claimant: Claimant::default(),
        };
        assert_eq!(record.components_joined(), "Roof dents, Paint damage");

        record.affected_components.clear();
        assert_eq!(record.components_joined(), "");
    }

    #[test]
    fn claimant_accepts_legacy_field_names() {
        let claimant: Claimant = serde_json::from_str(
            r#"{"policy_holder_name":"Asha Rao","contact_email":"asha@example.com","zip_code":"560001"}"#,
        )
        .expect("legacy claimant parses");
        assert_eq!(claimant.named(), Some("Asha Rao"));
        assert_eq!(claimant.email(), Some("asha@example.com"));
        assert_eq!(claimant.zip(), Some("560001"));
        assert!(!claimant.is_empty());
        assert!(Claimant::default().is_empty());
    }
}
