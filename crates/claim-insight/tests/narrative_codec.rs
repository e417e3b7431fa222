use claim_insight::assessment::{
    Claimant, FieldSource, KnownFields, NarrativeInput, ReportDecoder, ReportEncoder, Section,
    SeverityLevel, SeverityScore,
};

fn components(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}

#[test]
fn decode_recovers_encoded_fields_for_every_level() {
    let cases = [
        (12, &["Paint damage"][..]),
        (37, &["Roof dents", "Broken windshield"][..]),
        (
            88,
            &[
                "Water damage throughout vehicle",
                "Electrical system damage",
                "Potential mold/mildew growth",
            ][..],
        ),
    ];

    let claimant = Claimant {
        name: Some("Morgan Diaz".into()),
        email: Some("morgan@example.com".into()),
        ..Claimant::default()
    };

    for (raw_score, labels) in cases {
        let score = SeverityScore::clamped(raw_score);
        let level = score.level();
        let components = components(labels);
        let text = ReportEncoder::new().encode(&NarrativeInput {
            caption: "hail pitted hood, 3/4 of the panels dented",
            damage_type: "Hail",
            score,
            level,
            components: &components,
            repair_level: level.repair_level(),
            cost_range: level.cost_range(),
            claimant: Some(&claimant),
        });

        let report = ReportDecoder::new().decode(&text, &KnownFields::default());
        assert_eq!(report.severity_score.value, score, "score for {raw_score}");
        assert_eq!(report.severity_level.value, level);
        assert_eq!(report.affected_components.value, components.join(", "));
        assert_eq!(report.affected_components.source, FieldSource::Section);
        assert_eq!(report.repair_level.value, level.repair_level());
        assert_eq!(report.cost_range.value, level.cost_range());
        assert_eq!(report.cost_range.source, FieldSource::Section);
    }
}

#[test]
fn score_falls_back_to_default_when_narrative_has_no_fraction() {
    let text = format!(
        "{}\nImage Analysis: flooded cabin\n\n{}\n1. Seats\n\n{}\nDry the cabin.\n\n{}\n",
        Section::DetailedAnalysis.header(),
        Section::ComponentBreakdown.header(),
        Section::Recommendations.header(),
        Section::CostGuidance.header(),
    );

    let report = ReportDecoder::new().decode(&text, &KnownFields::default());
    assert_eq!(report.severity_score.value.value(), 60);
    assert_eq!(report.severity_score.source, FieldSource::Default);
    assert_eq!(report.severity_level.value, SeverityLevel::Severe);
    assert_eq!(report.affected_components.value, "Seats");
    assert_eq!(report.cost_range.value, "₹40,000 - ₹2,00,000");
    assert_eq!(report.cost_range.source, FieldSource::Derived);
}

#[test]
fn known_fields_are_returned_verbatim() {
    let known = KnownFields {
        damage_type: Some("Fire".into()),
        severity_score: Some(SeverityScore::clamped(72)),
        severity_level: Some(SeverityLevel::Moderate),
        affected_components: Some("Soot damage".into()),
        repair_level: Some("Custom".into()),
        cost_range: Some("1 - 2".into()),
    };

    let report = ReportDecoder::new().decode("Score: 5/100", &known);
    assert_eq!(report.severity_score.value.value(), 72);
    assert_eq!(report.severity_level.value, SeverityLevel::Moderate);
    assert_eq!(report.affected_components.value, "Soot damage");
    assert_eq!(report.repair_level.value, "Custom");
    assert_eq!(report.cost_range.value, "1 - 2");
    for source in [
        report.severity_score.source,
        report.severity_level.source,
        report.affected_components.source,
        report.repair_level.source,
        report.cost_range.source,
    ] {
        assert_eq!(source, FieldSource::Known);
    }
}

fn severe_round_trip(caption: &str, labels: &[&str], claimant: Option<&Claimant>) {
    let score = SeverityScore::clamped(85);
    let level = score.level();
    let components = components(labels);
    let text = ReportEncoder::new().encode(&NarrativeInput {
        caption,
        damage_type: "Flood",
        score,
        level,
        components: &components,
        repair_level: level.repair_level(),
        cost_range: level.cost_range(),
        claimant,
    });

    let report = ReportDecoder::new().decode(&text, &KnownFields::default());
    assert_eq!(report.severity_score.value.value(), 85, "score for {caption:?}");
    assert_eq!(report.severity_level.value, SeverityLevel::Severe, "level for {caption:?}");
    assert_eq!(report.affected_components.value, components.join(", "));
    assert_eq!(report.affected_components.source, FieldSource::Section);
    assert_eq!(report.repair_level.value, "High (structural/critical repair)");
    assert_eq!(report.cost_range.value, "30,000 - 2,00,000", "cost for {caption:?}");
    assert_eq!(report.cost_range.source, FieldSource::Section);
}

#[test]
fn caption_text_never_overrides_encoded_fields() {
    let captions = [
        "adjuster note Score: 5/100 earlier",
        "hood 3/100 (minor) chip",
        "see COST ESTIMATE GUIDANCE: below",
        "Affected Components: hood only",
        "Estimated Cost Range: unknown",
        "Repair Complexity: trivial",
        "flooded\nCOMPONENT BREAKDOWN:\n1. Nothing\nCOST ESTIMATE GUIDANCE:\n**1 - 2**",
    ];

    for caption in captions {
        severe_round_trip(caption, &["Water damage throughout vehicle", "Seats"], None);
    }
}

#[test]
fn claimant_and_component_text_never_overrides_encoded_fields() {
    let claimant = Claimant {
        name: Some("Score: 5/100 (minor)\nDETAILED ANALYSIS:\nMINOR (Score: 4/100)".into()),
        phone: Some("Estimated Cost Range: 1 - 2".into()),
        address: Some("Affected Components: none\nRepair Complexity: none".into()),
        ..Claimant::default()
    };

    severe_round_trip(
        "standing water in the cabin",
        &["Affected Components: x", "Seats 2/100 (minor)"],
        Some(&claimant),
    );
}
