use super::format::{NarrativeFormat, Section};
use crate::assessment::domain::{Claimant, SeverityLevel, SeverityScore};
use std::fmt::Write;

/// Structured fields a narrative is written from.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeInput<'a> {
    pub caption: &'a str,
    /// Carried for callers that log or persist the input; the narrative does not
    /// print it. Decoders take it from [`KnownFields`](super::KnownFields) instead.
    pub damage_type: &'a str,
    pub score: SeverityScore,
    pub level: SeverityLevel,
    pub components: &'a [String],
    /// Not printed. The narrative carries `level`, and decoders map it back through
    /// [`SeverityLevel::repair_level`].
    pub repair_level: &'a str,
    pub cost_range: &'a str,
    pub claimant: Option<&'a Claimant>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ReportEncoder;

impl ReportEncoder {
    pub fn new() -> Self {
        Self
    }

    pub fn encode(&self, input: &NarrativeInput<'_>) -> String {
        let mut out = String::new();

        if let Some(claimant) = input.claimant {
            write_header(&mut out, claimant);
        }

        line(&mut out, Section::DetailedAnalysis.header());
        line(
            &mut out,
            &format!("{}{}", NarrativeFormat::IMAGE_ANALYSIS, single_line(input.caption)),
        );
        out.push('\n');
        for paragraph_line in severity_paragraph(input.level, input.score) {
            line(&mut out, &paragraph_line);
        }
        out.push('\n');

        line(&mut out, Section::ComponentBreakdown.header());
        for (index, component) in input.components.iter().enumerate() {
            line(&mut out, &format!("{}. {}", index + 1, single_line(component)));
        }
        out.push('\n');

        line(&mut out, Section::Recommendations.header());
        for recommendation in recommendations(input.level) {
            line(&mut out, recommendation);
        }
        out.push('\n');

        line(&mut out, Section::CostGuidance.header());
        line(&mut out, NarrativeFormat::COST_LEAD);
        line(
            &mut out,
            &format!(
                "{bold}{}{bold}",
                single_line(input.cost_range),
                bold = NarrativeFormat::BOLD
            ),
        );
        out.push('\n');
        line(&mut out, NarrativeFormat::COST_NOTE);
        for caveat in NarrativeFormat::COST_CAVEATS {
            line(&mut out, caveat);
        }

        out
    }
}

fn line(out: &mut String, text: &str) {
    out.push_str(text);
    out.push('\n');
}

/// Header block, written only when the claimant has a name.
fn write_header(out: &mut String, claimant: &Claimant) {
    let Some(name) = claimant.named() else {
        return;
    };

    line(out, NarrativeFormat::TITLE);
    line(out, &format!("{}{}", NarrativeFormat::POLICY_HOLDER, single_line(name)));

    let field = |value: Option<&str>| single_line(value.unwrap_or_default());

    if claimant.email().is_some() || claimant.phone().is_some() {
        let _ = writeln!(
            out,
            "{}{} {}",
            NarrativeFormat::CONTACT,
            field(claimant.email()),
            field(claimant.phone())
        );
    }

    if let Some(address) = claimant.address() {
        let _ = writeln!(
            out,
            "{}{}, {}, {} {}",
            NarrativeFormat::LOCATION,
            single_line(address),
            field(claimant.city()),
            field(claimant.state()),
            field(claimant.zip())
        );
    }

    line(out, &NarrativeFormat::rule());
    out.push('\n');
}

/// Free text must stay on the line it is written to.
fn single_line(text: &str) -> String {
    text
        .lines()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn severity_paragraph(level: SeverityLevel, score: SeverityScore) -> [String; 3] {
    let (headline, first, second) = match level {
        SeverityLevel::Severe => (
            "CRITICAL DAMAGE DETECTED",
            "The damage assessment indicates extensive structural compromise requiring immediate attention.",
            "Multiple critical components are affected, posing safety risks if not addressed promptly.",
        ),
        SeverityLevel::Moderate => (
            "SIGNIFICANT DAMAGE IDENTIFIED",
            "The assessment reveals considerable damage affecting operational integrity.",
            "Professional repairs are necessary to restore full functionality and prevent further deterioration.",
        ),
        SeverityLevel::Minor => (
            "MINOR DAMAGE OBSERVED",
            "The assessment indicates superficial damage with limited impact on functionality.",
            "Repairs can be completed through routine maintenance procedures.",
        ),
    };

    [
        format!("{headline} (Score: {}/100)", score.value()),
        first.to_string(),
        second.to_string(),
    ]
}

fn recommendations(level: SeverityLevel) -> [&'static str; 4] {
    match level {
        SeverityLevel::Severe => [
            "IMMEDIATE ACTION REQUIRED: Contact certified structural or auto-repair professionals within 24 hours to prevent further deterioration and ensure critical issues are addressed promptly.",
            "SAFETY FIRST: Do not enter, touch, or operate the affected area until a qualified technician performs a safety inspection to avoid injury or secondary damage.",
            "THOROUGH DOCUMENTATION: Capture high-quality photos and videos of all damaged surfaces from multiple angles, including close-ups, wide shots, and any visible structural impact.",
            "PROFESSIONAL ASSESSMENT: Arrange a full structural and functional evaluation to identify hidden issues such as internal cracks, compromised supports, or electrical hazards.",
        ],
        SeverityLevel::Moderate => [
            "PRIORITY REPAIRS: Book repair services within 7-10 days to prevent the moderate damage from escalating into severe structural or functional problems.",
            "PREVENTIVE MEASURES: Cover exposed surfaces, seal vulnerable areas, or temporarily isolate the damaged section.",
            "MULTIPLE QUOTES: Request 2-3 professional estimates from certified repair shops to compare pricing, part quality, timelines, and warranty options.",
            "QUALITY PARTS: Ensure the repair center uses OEM or equivalent high-grade replacement parts to maintain durability, performance, and original manufacturer standards.",
        ],
        SeverityLevel::Minor => [
            "SCHEDULED MAINTENANCE: Plan repairs at your convenience; minor issues are not urgent but should still be addressed to maintain long-term safety and appearance.",
            "COSMETIC REPAIR: Focus on restoring paint, surface finish, and small dents or scratches to prevent rust formation and keep the property in good condition.",
            "PREVENTIVE CARE: After repairs, apply protective coatings, sealants, or wax layers to strengthen surfaces against future exposure or minor impacts.",
            "REGULAR INSPECTION: Periodically check the repaired areas for signs of expansion, discoloration, or structural change to ensure the issue remains stable.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components() -> Vec<String> {
        vec!["Roof dents".to_string(), "Paint damage".to_string()]
    }

    fn input<'a>(components: &'a [String], claimant: Option<&'a Claimant>) -> NarrativeInput<'a> {
        NarrativeInput {
            caption: "dented roof with chipped paint",
            damage_type: "Hail",
            score: SeverityScore::clamped(40),
            level: SeverityLevel::Moderate,
            components,
            repair_level: SeverityLevel::Moderate.repair_level(),
            cost_range: SeverityLevel::Moderate.cost_range(),
            claimant,
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let components = components();
        let text = ReportEncoder::new().encode(&input(&components, None));

        let positions: Vec<_> = Section::ordered()
            .iter()
            .map(|section| text.find(section.header()).expect("section header present"))
            .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.starts_with("DETAILED ANALYSIS:\nImage Analysis: dented roof with chipped paint\n\n"));
        assert!(text.contains("SIGNIFICANT DAMAGE IDENTIFIED (Score: 40/100)\n"));
        assert!(text.contains("COMPONENT BREAKDOWN:\n1. Roof dents\n2. Paint damage\n\n"));
        assert!(text.contains("**8,000 - 30,000**\n\n"));
        assert!(text.ends_with("- Insurance coverage terms\n"));
    }

    #[test]
    fn each_recommendation_block_is_followed_by_one_blank_line() {
        let components = components();
        for level in SeverityLevel::ordered() {
            let mut fields = input(&components, None);
            fields.level = level;
            let text = ReportEncoder::new().encode(&fields);
            let body = Section::Recommendations
                .body(&text)
                .expect("recommendations present");
            assert_eq!(body.lines().filter(|l| !l.is_empty()).count(), 4);
            assert!(body.ends_with(".\n\n"));
            assert!(!body.ends_with("\n\n\n"));
        }
    }

    #[test]
    fn header_requires_a_name() {
        let components = components();
        let anonymous = Claimant {
            email: Some("a@example.com".into()),
            ..Claimant::default()
        };
        let text = ReportEncoder::new().encode(&input(&components, Some(&anonymous)));
        assert!(text.starts_with(Section::DetailedAnalysis.header()));
    }

    #[test]
    fn header_prints_contact_and_location_lines_when_present() {
        let components = components();
        let claimant = Claimant {
            name: Some("Asha Rao".into()),
            phone: Some("555-0100".into()),
            address: Some("12 Lake Rd".into()),
            city: Some("Pune".into()),
            state: Some("MH".into()),
            zip: Some("411001".into()),
            ..Claimant::default()
        };
        let text = ReportEncoder::new().encode(&input(&components, Some(&claimant)));
        let expected = format!(
            "CLAIM ASSESSMENT REPORT\nPolicy Holder: Asha Rao\nContact:  555-0100\nLocation: 12 Lake Rd, Pune, MH 411001\n{}\n\nDETAILED ANALYSIS:\n",
            "=".repeat(50)
        );
        assert!(text.starts_with(&expected), "{text}");
    }

    #[test]
    fn multi_line_captions_are_collapsed() {
        let components = components();
        let mut fields = input(&components, None);
        fields.caption = "water line\n  at the doors \n";
        let text = ReportEncoder::new().encode(&fields);
        assert!(text.contains("Image Analysis: water line at the doors\n"));
    }

    #[test]
    fn claimant_fields_and_components_cannot_open_new_lines() {
        let components = vec!["Hood\nCOST ESTIMATE GUIDANCE:".to_string()];
        let claimant = Claimant {
            name: Some("Lee\nDETAILED ANALYSIS:\nCRITICAL (Score: 99/100)".into()),
            email: Some("lee@example.com\nScore: 1/100".into()),
            address: Some("4 Hill St\nAffected Components: none".into()),
            ..Claimant::default()
        };
        let text = ReportEncoder::new().encode(&input(&components, Some(&claimant)));

        assert!(text.contains("Policy Holder: Lee DETAILED ANALYSIS: CRITICAL (Score: 99/100)\n"));
        assert!(text.contains("Contact: lee@example.com Score: 1/100 \n"));
        assert!(text.contains("Location: 4 Hill St Affected Components: none, ,  \n"));
        assert!(text.contains("1. Hood COST ESTIMATE GUIDANCE:\n"));
        for section in Section::ordered() {
            let standalone = text
                .lines()
                .filter(|line| *line == section.header())
                .count();
            assert_eq!(standalone, 1, "{}", section.header());
        }
    }

    #[test]
    fn damage_type_and_repair_level_are_not_printed() {
        let components = components();
        let baseline = ReportEncoder::new().encode(&input(&components, None));

        let mut fields = input(&components, None);
        fields.damage_type = "Fire";
        fields.repair_level = "Bespoke repair plan";
        let text = ReportEncoder::new().encode(&fields);

        assert_eq!(text, baseline);
        assert!(!text.contains("Bespoke repair plan"));
    }
}
