//! Claim assessment: severity scoring, component detection, caption intake and the
//! narrative report codec, wired together by [`AssessmentService`].

pub mod caption;
pub mod components;
pub mod domain;
pub mod draws;
pub mod history;
pub(crate) mod keywords;
pub mod narrative;
pub mod router;
pub mod scoring;
pub mod service;

pub use caption::{CaptionHeuristicAnalyzer, CaptionIntake, PixelMeans, ResolvedCaption};
pub use components::{ComponentCategory, ComponentDetector, ComponentList};
pub use domain::{AssessmentRecord, Claimant, DamageLabel, SeverityLevel, SeverityScore};
pub use draws::{DrawSource, ScriptedDraws};
pub use history::{HistoryError, HistoryStore, InMemoryHistory, JsonFileHistory};
pub use narrative::{
    Decoded, DecodedReport, FieldSource, KnownFields, NarrativeFormat, NarrativeInput,
    ReportDecoder, ReportEncoder, Section,
};
pub use router::{assessment_router, DecodeRequest};
pub use scoring::{AdjustmentSource, ScoreAdjustment, ScoreBreakdown, SeverityScorer};
pub use service::{AssessmentError, AssessmentService, ClaimSubmission, UNKNOWN_DAMAGE};
