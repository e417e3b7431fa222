use std::sync::{Arc, Mutex, PoisonError};

use chrono::Local;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::caption::{CaptionHeuristicAnalyzer, CaptionIntake, PixelMeans};
use super::components::ComponentDetector;
use super::domain::{AssessmentRecord, Claimant};
use super::draws::DrawSource;
use super::history::{HistoryError, HistoryStore};
use super::narrative::{DecodedReport, KnownFields, NarrativeInput, ReportDecoder, ReportEncoder};
use super::scoring::SeverityScorer;
use crate::config::AssessmentConfig;

pub const UNKNOWN_DAMAGE: &str = "Unknown Damage";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One claim as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimSubmission {
    #[serde(default)]
    pub damage_type: Option<String>,
    /// Free-text damage label; wins over `damage_type` when non-blank.
    #[serde(default)]
    pub custom_damage: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
    /// Uploaded file name; captions are synthesized from it when none is supplied.
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub pixel_means: Option<PixelMeans>,
    #[serde(default)]
    pub claimant: Claimant,
}

impl ClaimSubmission {
    pub fn resolved_damage_type(&self) -> String {
        [&self.custom_damage, &self.damage_type]
            .into_iter()
            .filter_map(|value| value.as_deref().map(str::trim))
            .find(|value| !value.is_empty())
            .unwrap_or(UNKNOWN_DAMAGE)
            .to_string()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}

/// Process-wide assessment context: built once at startup and shared by handlers.
pub struct AssessmentService<H> {
    scorer: SeverityScorer,
    detector: ComponentDetector,
    encoder: ReportEncoder,
    decoder: ReportDecoder,
    captioner: CaptionHeuristicAnalyzer,
    intake: CaptionIntake,
    history: Arc<H>,
    rng: Mutex<StdRng>,
}

impl<H> AssessmentService<H>
where
    H: HistoryStore + 'static,
{
    /// `seed` pins every random draw; without it the generator is seeded from entropy.
    pub fn new(history: Arc<H>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            scorer: SeverityScorer::new(),
            detector: ComponentDetector::new(),
            encoder: ReportEncoder::new(),
            decoder: ReportDecoder::new(),
            captioner: CaptionHeuristicAnalyzer::new(),
            intake: CaptionIntake::new(),
            history,
            rng: Mutex::new(rng),
        }
    }

    pub fn from_config(config: &AssessmentConfig, history: Arc<H>) -> Self {
        Self::new(history, config.random_seed)
    }

    /// Draws come from the shared generator. Its lock covers record building only;
    /// history is written after it is released.
    pub fn assess(&self, submission: ClaimSubmission) -> Result<AssessmentRecord, AssessmentError> {
        let record = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            self.build_record(submission, &mut *rng)
        };
        self.persist(record)
    }

    /// Same as [`AssessmentService::assess`] with a caller-supplied draw source.
    pub fn assess_with<D>(
        &self,
        submission: ClaimSubmission,
        draws: &mut D,
    ) -> Result<AssessmentRecord, AssessmentError>
    where
        D: DrawSource + ?Sized,
    {
        let record = self.build_record(submission, draws);
        self.persist(record)
    }

    fn persist(&self, record: AssessmentRecord) -> Result<AssessmentRecord, AssessmentError> {
        info!(
            damage_type = %record.damage_type,
            score = record.severity_score.value(),
            level = %record.severity_level,
            components = record.affected_components.len(),
            caption_fallback = record.caption_fallback,
            "claim assessed"
        );

        if let Err(err) = self.history.append(record.clone()) {
            warn!(error = %err, "failed to persist assessment history");
            return Err(err.into());
        }

        Ok(record)
    }

    fn build_record<D>(&self, submission: ClaimSubmission, draws: &mut D) -> AssessmentRecord
    where
        D: DrawSource + ?Sized,
    {
        let damage_type = submission.resolved_damage_type();

        let supplied = submission
            .caption
            .as_deref()
            .map(str::trim)
            .filter(|caption| !caption.is_empty())
            .map(str::to_string);
        let raw_caption = supplied.or_else(|| {
            submission
                .filename
                .as_deref()
                .filter(|name| !name.trim().is_empty())
                .map(|name| self.captioner.caption_for_filename(name, draws))
        });
        let caption = self
            .intake
            .resolve(raw_caption.as_deref(), submission.pixel_means);

        let breakdown = self.scorer.assess(&caption.text, &damage_type, draws);
        let score = breakdown.score;
        let level = breakdown.level();
        let components = self.detector.detect(&caption.text, &damage_type, draws);

        let affected_components = components.into_vec();
        let narrative = self.encoder.encode(&NarrativeInput {
            caption: &caption.text,
            damage_type: &damage_type,
            score,
            level,
            components: &affected_components,
            repair_level: level.repair_level(),
            cost_range: level.cost_range(),
            claimant: Some(&submission.claimant),
        });

        AssessmentRecord {
            date: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            damage_type,
            image_caption: caption.text,
            caption_fallback: caption.fallback,
            filename: submission.filename,
            loss_description: narrative,
            severity_score: score,
            severity_level: level,
            affected_components,
            repair_level: level.repair_level().to_string(),
            cost_range: level.cost_range().to_string(),
            claimant: submission.claimant,
        }
    }

    pub fn decode(&self, narrative: &str, known: &KnownFields) -> DecodedReport {
        self.decoder.decode(narrative, known)
    }

    pub fn history(&self) -> Result<Vec<AssessmentRecord>, AssessmentError> {
        Ok(self.history.entries_newest_first()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::SeverityLevel;
    use crate::assessment::draws::ScriptedDraws;
    use crate::assessment::history::InMemoryHistory;
    use std::panic::{self, AssertUnwindSafe};
    use std::sync::atomic::{AtomicBool, Ordering};

    struct BrokenHistory;

    impl HistoryStore for BrokenHistory {
        fn append(&self, _record: AssessmentRecord) -> Result<(), HistoryError> {
            Err(HistoryError::Unavailable("disk full".to_string()))
        }

        fn entries(&self) -> Result<Vec<AssessmentRecord>, HistoryError> {
            Ok(Vec::new())
        }
    }

    fn service() -> AssessmentService<InMemoryHistory> {
        AssessmentService::new(Arc::new(InMemoryHistory::default()), Some(7))
    }

    #[test]
    fn custom_damage_overrides_selected_type() {
        let submission = ClaimSubmission {
            damage_type: Some("Hail".into()),
            custom_damage: Some("  Tree fall ".into()),
            ..ClaimSubmission::default()
        };
        assert_eq!(submission.resolved_damage_type(), "Tree fall");

        let blank = ClaimSubmission {
            damage_type: Some(" ".into()),
            custom_damage: Some(String::new()),
            ..ClaimSubmission::default()
        };
        assert_eq!(blank.resolved_damage_type(), UNKNOWN_DAMAGE);
    }

    #[test]
    fn fire_submission_produces_severe_record_and_history_entry() {
        let service = service();
        let submission = ClaimSubmission {
            damage_type: Some("Fire".into()),
            caption: Some("severe fire, car destroyed with structural damage".into()),
            ..ClaimSubmission::default()
        };

        let mut draws = ScriptedDraws::new([]);
        let record = service
            .assess_with(submission, &mut draws)
            .expect("assessment succeeds");

        assert_eq!(record.severity_level, SeverityLevel::Severe);
        assert_eq!(record.repair_level, "High (structural/critical repair)");
        assert_eq!(record.cost_range, "30,000 - 2,00,000");
        assert!(!record.caption_fallback);
        assert!(record.loss_description.contains("CRITICAL DAMAGE DETECTED"));
        assert!(draws.requests().is_empty());

        let history = service.history().expect("history");
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], record);
    }

    #[test]
    fn missing_caption_uses_filename_then_fallback() {
        let service = service();
        let from_name = ClaimSubmission {
            damage_type: Some("Collision".into()),
            filename: Some("IMG_0042.jpg".into()),
            ..ClaimSubmission::default()
        };
        let record = service
            .assess_with(from_name, &mut ScriptedDraws::new([0]))
            .expect("assessment succeeds");
        assert_eq!(
            record.image_caption,
            "Image analysis indicates visible damage to property. Damage assessment in progress."
        );
        assert!(!record.caption_fallback);

        let bare = ClaimSubmission {
            damage_type: Some("Collision".into()),
            caption: Some("car".into()),
            ..ClaimSubmission::default()
        };
        let record = service.assess(bare).expect("assessment succeeds");
        assert!(record.caption_fallback);
        assert!(record.image_caption.starts_with("visible property damage"));
    }

    #[test]
    fn claimant_header_is_written_when_named() {
        let service = service();
        let submission = ClaimSubmission {
            damage_type: Some("Vandalism".into()),
            caption: Some("keyed door panel".into()),
            claimant: Claimant {
                name: Some("Jordan Lee".into()),
                ..Claimant::default()
            },
            ..ClaimSubmission::default()
        };
        let record = service.assess(submission).expect("assessment succeeds");
        assert!(record
            .loss_description
            .starts_with("CLAIM ASSESSMENT REPORT\nPolicy Holder: Jordan Lee\n"));
    }

    #[test]
    fn history_failures_surface_as_errors() {
        let service = AssessmentService::new(Arc::new(BrokenHistory), Some(1));
        let err = service
            .assess(ClaimSubmission::default())
            .expect_err("history failure must surface");
        assert!(matches!(err, AssessmentError::History(_)));
    }

    #[derive(Default)]
    struct FlakyHistory {
        failed: AtomicBool,
        panicked: AtomicBool,
        panic_first: bool,
        inner: InMemoryHistory,
    }

    impl HistoryStore for FlakyHistory {
        fn append(&self, record: AssessmentRecord) -> Result<(), HistoryError> {
            if self.panic_first && !self.panicked.swap(true, Ordering::SeqCst) {
                panic!("history backend crashed");
            }
            if !self.panic_first && !self.failed.swap(true, Ordering::SeqCst) {
                return Err(HistoryError::Unavailable("busy".to_string()));
            }
            self.inner.append(record)
        }

        fn entries(&self) -> Result<Vec<AssessmentRecord>, HistoryError> {
            self.inner.entries()
        }
    }

    fn hail_claim() -> ClaimSubmission {
        ClaimSubmission {
            damage_type: Some("Hail".into()),
            caption: Some("dented hood and cracked windshield".into()),
            ..ClaimSubmission::default()
        }
    }

    #[test]
    fn transient_history_failure_does_not_affect_next_assessment() {
        let service = AssessmentService::new(Arc::new(FlakyHistory::default()), Some(3));

        let err = service.assess(hail_claim()).expect_err("first append fails");
        assert!(matches!(err, AssessmentError::History(_)));

        let record = service.assess(hail_claim()).expect("second append succeeds");
        assert_eq!(service.history().expect("history"), vec![record]);
    }

    #[test]
    fn panicking_history_leaves_service_usable() {
        let history = FlakyHistory {
            panic_first: true,
            ..FlakyHistory::default()
        };
        let service = AssessmentService::new(Arc::new(history), Some(3));

        let crashed = panic::catch_unwind(AssertUnwindSafe(|| service.assess(hail_claim())));
        assert!(crashed.is_err());
        assert!(!service.rng.is_poisoned());

        service.assess(hail_claim()).expect("later assessments succeed");
        assert_eq!(service.history().expect("history").len(), 1);
    }

    #[test]
    fn poisoned_generator_is_recovered() {
        let service = service();
        let poisoned = panic::catch_unwind(AssertUnwindSafe(|| {
            let _guard = service.rng.lock();
            panic!("draw interrupted");
        }));
        assert!(poisoned.is_err());
        assert!(service.rng.is_poisoned());

        service.assess(hail_claim()).expect("assessment succeeds");
    }

    #[test]
    fn seeded_services_replay_identically() {
        let submission = ClaimSubmission {
            damage_type: Some("Flood".into()),
            caption: Some("standing water around the wheels".into()),
            ..ClaimSubmission::default()
        };
        let first = service().assess(submission.clone()).expect("first");
        let second = service().assess(submission).expect("second");
        assert_eq!(first.severity_score, second.severity_score);
        assert_eq!(first.affected_components, second.affected_components);
        assert_ne!(first.severity_level, SeverityLevel::Minor);
    }
}
