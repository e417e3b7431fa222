use super::domain::{DamageLabel, SeverityLevel, SeverityScore};
use super::draws::DrawSource;
use super::keywords::{self, KeywordDelta};
use serde::Serialize;
use tracing::debug;

/// Which layer of the heuristic produced an adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentSource {
    FloodSevere,
    FloodModerate,
    FloodMinor,
    FloodBoost,
    Minor,
    Moderate,
    Severe,
    Extent,
    Urgency,
    Context,
    FloodFloor,
    FloodBand,
}

/// A single delta applied to the running score, kept for audits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreAdjustment {
    pub source: AdjustmentSource,
    pub keyword: &'static str,
    pub delta: i32,
}

/// Full trail of a scoring run: base, every adjustment, the raw sum and the clamped
/// result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub base_key: Option<&'static str>,
    pub base: i32,
    pub adjustments: Vec<ScoreAdjustment>,
    pub raw: i32,
    pub score: SeverityScore,
}

impl ScoreBreakdown {
    pub fn level(&self) -> SeverityLevel {
        self.score.level()
    }

    pub fn applied(&self, source: AdjustmentSource) -> impl Iterator<Item = &ScoreAdjustment> {
        self.adjustments
            .iter()
            .filter(move |adjustment| adjustment.source == source)
    }
}

struct Tally {
    running: i32,
    adjustments: Vec<ScoreAdjustment>,
}

impl Tally {
    fn new(base: i32) -> Self {
        Self {
            running: base,
            adjustments: Vec::new(),
        }
    }

    fn add(&mut self, source: AdjustmentSource, keyword: &'static str, delta: i32) {
        debug!(?source, keyword, delta, "severity indicator applied");
        self.running += delta;
        self.adjustments.push(ScoreAdjustment {
            source,
            keyword,
            delta,
        });
    }

    /// Records an overwrite of the running score as the delta it amounts to.
    fn replace(&mut self, source: AdjustmentSource, keyword: &'static str, value: i32) {
        let delta = value - self.running;
        self.add(source, keyword, delta);
    }

    fn every_match(&mut self, caption: &str, table: &[KeywordDelta], source: AdjustmentSource) {
        for (keyword, delta) in table {
            if caption.contains(keyword) {
                self.add(source, *keyword, *delta);
            }
        }
    }

    fn first_match(&mut self, caption: &str, table: &[KeywordDelta], source: AdjustmentSource) {
        if let Some((keyword, delta)) = table.iter().find(|(keyword, _)| caption.contains(keyword))
        {
            self.add(source, *keyword, *delta);
        }
    }
}

/// Layered keyword scorer for a caption and a declared damage type.
///
/// Tiers overlap on purpose: "light" in a flood caption is counted by the flood minor
/// tier and by the generic minor tier, and the flood context step re-adds points the
/// flood tiers already granted. Flood claims are then pushed into the severe band
/// roughly 70% of the time. Callers supply the random source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeverityScorer;

impl SeverityScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score<D>(&self, caption: &str, damage_type: &str, draws: &mut D) -> SeverityScore
    where
        D: DrawSource + ?Sized,
    {
        self.assess(caption, damage_type, draws).score
    }

    pub fn level(score: SeverityScore) -> SeverityLevel {
        score.level()
    }

    pub fn assess<D>(&self, caption: &str, damage_type: &str, draws: &mut D) -> ScoreBreakdown
    where
        D: DrawSource + ?Sized,
    {
        let caption = caption.to_lowercase();
        let damage = DamageLabel::new(damage_type);
        let flood = damage.is_flood_family();

        let (base_key, base) = keywords::BASE_SCORES
            .iter()
            .find(|(key, _)| damage.mentions(key))
            .map(|(key, score)| (Some(*key), *score))
            .unwrap_or((None, keywords::DEFAULT_BASE_SCORE));
        debug!(damage = damage.as_str(), ?base_key, base, "base severity resolved");

        let mut tally = Tally::new(base);

        if flood {
            tally.every_match(&caption, keywords::FLOOD_SEVERE, AdjustmentSource::FloodSevere);
            tally.every_match(
                &caption,
                keywords::FLOOD_MODERATE,
                AdjustmentSource::FloodModerate,
            );
            tally.every_match(&caption, keywords::FLOOD_MINOR, AdjustmentSource::FloodMinor);

            if draws.draw(0, 100) < keywords::FLOOD_BOOST_GATE {
                let (low, high) = keywords::FLOOD_BOOST_RANGE;
                let boost = draws.draw(low, high);
                tally.add(AdjustmentSource::FloodBoost, "boost", boost);
            }
        }

        tally.every_match(&caption, keywords::MINOR_WORDS, AdjustmentSource::Minor);
        tally.every_match(&caption, keywords::MODERATE_WORDS, AdjustmentSource::Moderate);
        tally.every_match(&caption, keywords::SEVERE_WORDS, AdjustmentSource::Severe);

        tally.first_match(&caption, keywords::EXTENT_WORDS, AdjustmentSource::Extent);
        tally.first_match(&caption, keywords::URGENCY_WORDS, AdjustmentSource::Urgency);

        if flood {
            apply_flood_context(&mut tally, &caption);
        } else {
            apply_dent_and_scratch(&mut tally, &caption);
        }

        if flood {
            rebalance_flood(&mut tally, draws);
        }

        let raw = tally.running;
        let score = SeverityScore::clamped(raw);
        debug!(raw, score = score.value(), level = %score.level(), "severity scored");

        ScoreBreakdown {
            base_key,
            base,
            adjustments: tally.adjustments,
            raw,
            score,
        }
    }
}

fn apply_flood_context(tally: &mut Tally, caption: &str) {
    for (group, delta) in keywords::FLOOD_CONTEXT {
        if let Some(keyword) = group.iter().copied().find(|keyword| caption.contains(keyword)) {
            tally.add(AdjustmentSource::Context, keyword, *delta);
        }
    }
}

fn apply_dent_and_scratch(tally: &mut Tally, caption: &str) {
    if caption.contains("dent") {
        if let Some(phrase) = find_phrase(caption, keywords::SMALL_DENTS) {
            tally.add(AdjustmentSource::Context, phrase, keywords::SMALL_DENT_DELTA);
        } else if let Some(phrase) = find_phrase(caption, keywords::LARGE_DENTS) {
            tally.add(AdjustmentSource::Context, phrase, keywords::LARGE_DENT_DELTA);
        } else {
            tally.add(AdjustmentSource::Context, "dent", keywords::PLAIN_DENT_DELTA);
        }
    }

    if caption.contains("scratch") {
        match find_phrase(caption, keywords::DEEP_SCRATCHES) {
            Some(phrase) => {
                tally.add(AdjustmentSource::Context, phrase, keywords::DEEP_SCRATCH_DELTA)
            }
            None => tally.add(
                AdjustmentSource::Context,
                "scratch",
                keywords::PLAIN_SCRATCH_DELTA,
            ),
        }
    }
}

fn find_phrase(caption: &str, phrases: &[&'static str]) -> Option<&'static str> {
    phrases.iter().copied().find(|phrase| caption.contains(phrase))
}

fn rebalance_flood<D>(tally: &mut Tally, draws: &mut D)
where
    D: DrawSource + ?Sized,
{
    if tally.running < keywords::FLOOD_FLOOR_BELOW {
        let (low, high) = keywords::FLOOD_FLOOR_RANGE;
        let floored = draws.draw(low, high);
        tally.replace(AdjustmentSource::FloodFloor, "floor", floored);
    }

    if draws.draw(1, 100) <= keywords::FLOOD_SEVERE_SHARE {
        if tally.running < SeverityLevel::SEVERE_FROM as i32 {
            let (low, high) = keywords::FLOOD_SEVERE_BAND;
            let value = draws.draw(low, high);
            tally.replace(AdjustmentSource::FloodBand, "severe_band", value);
        }
    } else if tally.running < SeverityLevel::MODERATE_FROM as i32 {
        let (low, high) = keywords::FLOOD_MODERATE_BAND;
        let value = draws.draw(low, high);
        tally.replace(AdjustmentSource::FloodBand, "moderate_band", value);
    } else if tally.running >= SeverityLevel::SEVERE_FROM as i32 {
        let (low, high) = keywords::FLOOD_MODERATE_CEILING;
        let value = draws.draw(low, high);
        tally.replace(AdjustmentSource::FloodBand, "moderate_ceiling", value);
    }
}
