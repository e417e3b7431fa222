use crate::infra::open_history;
use clap::Args;
use claim_insight::assessment::{
    AssessmentRecord, AssessmentService, Claimant, ClaimSubmission, DecodedReport, HistoryStore,
    InMemoryHistory, KnownFields, ReportDecoder,
};
use claim_insight::config::AppConfig;
use claim_insight::error::AppError;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct AssessArgs {
    /// Declared damage type, e.g. "Flood" or "Hail"
    #[arg(long)]
    pub(crate) damage_type: String,
    /// Free-text damage label that replaces the declared type
    #[arg(long)]
    pub(crate) custom_damage: Option<String>,
    /// Caption describing the damage photo
    #[arg(long, conflicts_with = "filename")]
    pub(crate) caption: Option<String>,
    /// Photo file name to synthesize a caption from
    #[arg(long)]
    pub(crate) filename: Option<String>,
    /// Seed for the random draws; overrides CLAIM_RANDOM_SEED
    #[arg(long)]
    pub(crate) seed: Option<u64>,
    /// Policy holder name printed in the report header
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) address: Option<String>,
    #[arg(long)]
    pub(crate) city: Option<String>,
    #[arg(long)]
    pub(crate) state: Option<String>,
    #[arg(long)]
    pub(crate) zip: Option<String>,
    /// Skip appending the assessment to the history file
    #[arg(long)]
    pub(crate) dry_run: bool,
}

impl AssessArgs {
    fn submission(&self) -> ClaimSubmission {
        ClaimSubmission {
            damage_type: Some(self.damage_type.clone()),
            custom_damage: self.custom_damage.clone(),
            caption: self.caption.clone(),
            filename: self.filename.clone(),
            pixel_means: None,
            claimant: Claimant {
                name: self.name.clone(),
                email: self.email.clone(),
                phone: self.phone.clone(),
                address: self.address.clone(),
                city: self.city.clone(),
                state: self.state.clone(),
                zip: self.zip.clone(),
            },
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct DecodeArgs {
    /// Narrative report to decode
    #[arg(long)]
    pub(crate) file: PathBuf,
    /// Damage type used to pick default components when none are listed
    #[arg(long)]
    pub(crate) damage_type: Option<String>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let seed = args.seed.or(config.assessment.random_seed);
    let submission = args.submission();

    let record = if args.dry_run {
        assess_with(Arc::new(InMemoryHistory::default()), seed, submission)?
    } else {
        assess_with(open_history(&config.assessment), seed, submission)?
    };

    print!("{}", assessment_summary(&record));
    Ok(())
}

fn assess_with<H>(
    history: Arc<H>,
    seed: Option<u64>,
    submission: ClaimSubmission,
) -> Result<AssessmentRecord, AppError>
where
    H: HistoryStore + 'static,
{
    let service = AssessmentService::new(history, seed);
    Ok(service.assess(submission)?)
}

fn assessment_summary(record: &AssessmentRecord) -> String {
    let mut out = format!(
        "Assessed {} claim on {}: score {}/100 ({})\n",
        record.damage_type, record.date, record.severity_score, record.severity_level
    );
    if record.caption_fallback {
        out.push_str("Caption unavailable; heuristic fallback used.\n");
    }
    out.push_str(&format!(
        "Affected components: {}\nRepair complexity: {}\nEstimated cost range: {}\n\n",
        record.components_joined(),
        record.repair_level,
        record.cost_range
    ));
    out.push_str(&record.loss_description);
    out
}

pub(crate) fn run_decode(args: DecodeArgs) -> Result<(), AppError> {
    let narrative = std::fs::read_to_string(&args.file)?;
    if narrative.trim().is_empty() {
        return Err(AppError::InvalidRequest(format!(
            "{} contains no narrative",
            args.file.display()
        )));
    }

    let known = KnownFields {
        damage_type: args.damage_type,
        ..KnownFields::default()
    };
    let report = ReportDecoder::new().decode(&narrative, &known);
    render_decoded(&report);
    Ok(())
}

fn render_decoded(report: &DecodedReport) {
    println!(
        "Severity score: {}/100 [{:?}]",
        report.severity_score.value, report.severity_score.source
    );
    println!(
        "Severity level: {} [{:?}]",
        report.severity_level.value, report.severity_level.source
    );
    println!(
        "Affected components: {} [{:?}]",
        report.affected_components.value, report.affected_components.source
    );
    println!(
        "Repair complexity: {} [{:?}]",
        report.repair_level.value, report.repair_level.source
    );
    println!(
        "Cost range: {} [{:?}]",
        report.cost_range.value, report.cost_range.source
    );
}
