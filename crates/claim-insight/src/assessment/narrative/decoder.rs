use super::format::{NarrativeFormat, Section};
use crate::assessment::domain::{DamageLabel, SeverityLevel, SeverityScore};
use crate::assessment::keywords;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

/// Score used when no `/100` figure can be found anywhere in the text.
pub const DEFAULT_DECODED_SCORE: i32 = 60;

/// Structured fields a caller already holds; each one short-circuits its extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct KnownFields {
    #[serde(default)]
    pub damage_type: Option<String>,
    #[serde(default)]
    pub severity_score: Option<SeverityScore>,
    #[serde(default)]
    pub severity_level: Option<SeverityLevel>,
    #[serde(default)]
    pub affected_components: Option<String>,
    #[serde(default)]
    pub repair_level: Option<String>,
    #[serde(default)]
    pub cost_range: Option<String>,
}

/// Where a decoded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldSource {
    Known,
    Labelled,
    Section,
    Derived,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Decoded<T> {
    pub value: T,
    pub source: FieldSource,
}

impl<T> Decoded<T> {
    fn new(value: T, source: FieldSource) -> Self {
        Self { value, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedReport {
    pub severity_score: Decoded<SeverityScore>,
    pub severity_level: Decoded<SeverityLevel>,
    pub affected_components: Decoded<String>,
    pub repair_level: Decoded<String>,
    pub cost_range: Decoded<String>,
}

fn score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Score:\s*(\d+)/100").expect("score regex must compile"))
}

fn bare_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)/100").expect("bare score regex must compile"))
}

fn ai_score_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"AI Severity Score:\s*(\d+)/100").expect("ai score regex must compile")
    })
}

fn parenthesized_word_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\((\w+)\)").expect("level regex must compile"))
}

fn components_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*Affected Components:[ \t]*([^\n]+)")
            .expect("components regex must compile")
    })
}

fn numbered_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*\d+\.\s+(.+?)\s*$").expect("numbered line regex must compile")
    })
}

fn repair_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*Repair Complexity:[ \t]*([^\n]+)")
            .expect("repair regex must compile")
    })
}

fn cost_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?m)^[ \t]*Estimated Cost Range:[ \t]*([^\n]+)")
            .expect("cost regex must compile")
    })
}

fn bold_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let bold = regex::escape(NarrativeFormat::BOLD);
        Regex::new(&format!(r"{bold}(.+?){bold}")).expect("bold regex must compile")
    })
}

/// Recovers structured fields from a narrative. Every field resolves independently
/// through its own fallback chain, so decoding never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportDecoder;

impl ReportDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Only the structural part of `text` is read: the claimant header and the
    /// caption echo are free text and never feed a field.
    pub fn decode(&self, text: &str, known: &KnownFields) -> DecodedReport {
        let structural = NarrativeFormat::structural_text(text);
        let text = structural.as_str();
        let severity_score = resolve_score(text, known);
        let severity_level = resolve_level(text, known, severity_score.value);
        let level = severity_level.value;

        let report = DecodedReport {
            severity_score,
            severity_level,
            affected_components: resolve_components(text, known),
            repair_level: resolve_repair_level(text, known, level),
            cost_range: resolve_cost_range(text, known, level),
        };

        debug!(
            score = report.severity_score.value.value(),
            score_source = ?report.severity_score.source,
            level = %report.severity_level.value,
            components_source = ?report.affected_components.source,
            cost_source = ?report.cost_range.source,
            "narrative decoded"
        );

        report
    }
}

fn known_text(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_score(digits: &str) -> SeverityScore {
    let raw = digits
        .parse::<u32>()
        .map(|value| value.min(u32::from(SeverityScore::MAX)) as i32)
        .unwrap_or(i32::from(SeverityScore::MAX));
    SeverityScore::clamped(raw)
}

fn resolve_score(text: &str, known: &KnownFields) -> Decoded<SeverityScore> {
    if let Some(score) = known.severity_score {
        return Decoded::new(score, FieldSource::Known);
    }

    [score_re(), bare_score_re(), ai_score_re()]
        .into_iter()
        .find_map(|re| capture(re, text))
        .map(|digits| Decoded::new(parse_score(&digits), FieldSource::Labelled))
        .unwrap_or_else(|| {
            Decoded::new(
                SeverityScore::clamped(DEFAULT_DECODED_SCORE),
                FieldSource::Default,
            )
        })
}

fn resolve_level(text: &str, known: &KnownFields, score: SeverityScore) -> Decoded<SeverityLevel> {
    if let Some(level) = known.severity_level {
        return Decoded::new(level, FieldSource::Known);
    }

    let labelled = text
        .lines()
        .find(|line| bare_score_re().is_match(line))
        .and_then(|line| {
            parenthesized_word_re()
                .captures_iter(line)
                .filter_map(|caps| caps.get(1))
                .find_map(|word| SeverityLevel::parse(word.as_str()))
        });

    match labelled {
        Some(level) => Decoded::new(level, FieldSource::Labelled),
        None => Decoded::new(score.level(), FieldSource::Derived),
    }
}

fn resolve_components(text: &str, known: &KnownFields) -> Decoded<String> {
    if let Some(components) = known_text(&known.affected_components) {
        return Decoded::new(components, FieldSource::Known);
    }

    if let Some(components) = capture(components_re(), text) {
        return Decoded::new(components, FieldSource::Labelled);
    }

    let listed: Vec<String> = Section::ComponentBreakdown
        .body(text)
        .map(|body| {
            body.lines()
                .filter_map(|line| numbered_line_re().captures(line))
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .collect()
        })
        .unwrap_or_default();
    if !listed.is_empty() {
        return Decoded::new(listed.join(", "), FieldSource::Section);
    }

    let damage = DamageLabel::new(known.damage_type.as_deref().unwrap_or_default());
    Decoded::new(
        default_components(&damage).to_string(),
        FieldSource::Default,
    )
}

fn default_components(damage: &DamageLabel) -> &'static str {
    if damage.mentions("fire") {
        keywords::DECODE_FIRE_COMPONENTS
    } else if damage.is_wet() {
        keywords::DECODE_WET_COMPONENTS
    } else if damage.mentions("hail") {
        keywords::DECODE_HAIL_COMPONENTS
    } else {
        keywords::DECODE_DEFAULT_COMPONENTS
    }
}

fn resolve_repair_level(text: &str, known: &KnownFields, level: SeverityLevel) -> Decoded<String> {
    if let Some(repair) = known_text(&known.repair_level) {
        return Decoded::new(repair, FieldSource::Known);
    }

    match capture(repair_re(), text) {
        Some(repair) => Decoded::new(repair, FieldSource::Labelled),
        None => Decoded::new(level.repair_level().to_string(), FieldSource::Derived),
    }
}

fn resolve_cost_range(text: &str, known: &KnownFields, level: SeverityLevel) -> Decoded<String> {
    if let Some(cost) = known_text(&known.cost_range) {
        return Decoded::new(cost, FieldSource::Known);
    }

    if let Some(cost) = capture(cost_re(), text) {
        return Decoded::new(cost, FieldSource::Labelled);
    }

    if let Some(cost) = Section::CostGuidance
        .body(text)
        .and_then(|body| capture(bold_re(), body))
    {
        return Decoded::new(cost, FieldSource::Section);
    }

    Decoded::new(
        level.fallback_cost_range().to_string(),
        FieldSource::Derived,
    )
}
