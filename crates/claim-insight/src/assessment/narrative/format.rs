/// Literal layout of the narrative report. Encoder and decoder both read their
/// anchors from here; bump [`NarrativeFormat::VERSION`] whenever a literal changes.
#[derive(Debug, Clone, Copy)]
pub struct NarrativeFormat;

impl NarrativeFormat {
    pub const VERSION: u32 = 1;

    pub const TITLE: &'static str = "CLAIM ASSESSMENT REPORT";
    pub const RULE_CHAR: char = '=';
    pub const RULE_WIDTH: usize = 50;

    pub const POLICY_HOLDER: &'static str = "Policy Holder: ";
    pub const CONTACT: &'static str = "Contact: ";
    pub const LOCATION: &'static str = "Location: ";
    pub const IMAGE_ANALYSIS: &'static str = "Image Analysis: ";

    pub const COST_LEAD: &'static str =
        "Based on damage severity and affected components, the estimated repair cost falls within:";
    pub const BOLD: &'static str = "**";
    pub const COST_NOTE: &'static str =
        "Note: This is a preliminary estimate. Actual costs may vary based on:";
    pub const COST_CAVEATS: [&'static str; 4] = [
        "- Labor rates in your area",
        "- Parts availability",
        "- Additional hidden damage",
        "- Insurance coverage terms",
    ];

    pub fn rule() -> String {
        std::iter::repeat(Self::RULE_CHAR)
            .take(Self::RULE_WIDTH)
            .collect()
    }
}

/// Top-level sections in the order they are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    DetailedAnalysis,
    ComponentBreakdown,
    Recommendations,
    CostGuidance,
}

impl Section {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::DetailedAnalysis,
            Self::ComponentBreakdown,
            Self::Recommendations,
            Self::CostGuidance,
        ]
    }

    pub const fn header(self) -> &'static str {
        match self {
            Self::DetailedAnalysis => "DETAILED ANALYSIS:",
            Self::ComponentBreakdown => "COMPONENT BREAKDOWN:",
            Self::Recommendations => "RECOMMENDATIONS:",
            Self::CostGuidance => "COST ESTIMATE GUIDANCE:",
        }
    }

    /// Byte offsets of the line holding exactly this header: (line start, body start).
    fn locate(self, text: &str) -> Option<(usize, usize)> {
        let mut offset = 0;
        for line in text.split_inclusive('\n') {
            let start = offset;
            offset += line.len();
            if line.trim_end() == self.header() {
                return Some((start, offset));
            }
        }
        None
    }

    /// Text between this section's header line and the next header line. Headers only
    /// count when they stand alone on a line.
    pub fn body(self, text: &str) -> Option<&str> {
        let (_, start) = self.locate(text)?;
        let rest = &text[start..];
        let end = Self::ordered()
            .into_iter()
            .filter(|other| *other != self)
            .filter_map(|other| other.locate(rest).map(|(line_start, _)| line_start))
            .min()
            .unwrap_or(rest.len());
        Some(&rest[..end])
    }
}

impl NarrativeFormat {
    /// The part of a narrative the decoder may read: everything from the
    /// `DETAILED ANALYSIS:` line on (the claimant header is skipped), minus the
    /// `Image Analysis:` caption echo. Text without the header is kept whole.
    pub fn structural_text(text: &str) -> String {
        let start = Section::DetailedAnalysis
            .locate(text)
            .map(|(line_start, _)| line_start)
            .unwrap_or(0);
        text[start..]
            .lines()
            .filter(|line| !line.trim_start().starts_with(Self::IMAGE_ANALYSIS.trim_end()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_are_pinned() {
        assert_eq!(NarrativeFormat::VERSION, 1);
        let headers: Vec<_> = Section::ordered().iter().map(|s| s.header()).collect();
        assert_eq!(
            headers,
            vec![
                "DETAILED ANALYSIS:",
                "COMPONENT BREAKDOWN:",
                "RECOMMENDATIONS:",
                "COST ESTIMATE GUIDANCE:",
            ]
        );
        assert_eq!(NarrativeFormat::rule().len(), 50);
        assert!(NarrativeFormat::rule().chars().all(|c| c == '='));
    }

    #[test]
    fn body_stops_at_next_header() {
        let text = "DETAILED ANALYSIS:\nfoo\nCOMPONENT BREAKDOWN:\n1. Bar\n\nRECOMMENDATIONS:\nbaz\n";
        assert_eq!(Section::ComponentBreakdown.body(text), Some("1. Bar\n\n"));
        assert_eq!(Section::Recommendations.body(text), Some("baz\n"));
        assert_eq!(Section::CostGuidance.body(text), None);
    }

    #[test]
    fn headers_inside_other_lines_are_ignored() {
        let text = "DETAILED ANALYSIS:\nImage Analysis: see COST ESTIMATE GUIDANCE: below\n\nCOST ESTIMATE GUIDANCE:\n**1 - 2**\n";
        assert_eq!(Section::CostGuidance.body(text), Some("**1 - 2**\n"));
        assert_eq!(
            Section::DetailedAnalysis.body(text),
            Some("Image Analysis: see COST ESTIMATE GUIDANCE: below\n\n")
        );
    }

    #[test]
    fn structural_text_drops_header_block_and_caption_echo() {
        let text = "CLAIM ASSESSMENT REPORT\nPolicy Holder: Score: 5/100\n\nDETAILED ANALYSIS:\nImage Analysis: Score: 9/100\n\nMINOR DAMAGE OBSERVED (Score: 12/100)\n";
        assert_eq!(
            NarrativeFormat::structural_text(text),
            "DETAILED ANALYSIS:\n\nMINOR DAMAGE OBSERVED (Score: 12/100)"
        );
        assert_eq!(NarrativeFormat::structural_text("Score: 3/100"), "Score: 3/100");
    }
}
