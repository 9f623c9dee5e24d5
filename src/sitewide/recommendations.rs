//! Sitewide recommendations

use crate::sitewide::Issue;

/// Maximum number of recommendation lines
pub const MAX_RECOMMENDATIONS: usize = 5;

/// Maximum number of issue-specific suggestions
pub const MAX_ISSUE_SUGGESTIONS: usize = 3;

/// Issue message fragments and the suggestion they trigger, in match order
const SUGGESTIONS: &[(&str, &str)] = &[
    (
        "Title",
        "Geef elke pagina een unieke title van 30 tot 60 tekens met het belangrijkste zoekwoord.",
    ),
    (
        "H1",
        "Zorg voor precies één H1 per pagina die het onderwerp van de pagina beschrijft.",
    ),
    (
        "Meta description",
        "Schrijf per pagina een meta description van 120 tot 160 tekens die aanzet tot klikken.",
    ),
    (
        "alt-tekst",
        "Voeg beschrijvende alt-teksten toe aan afbeeldingen voor toegankelijkheid en beeldzoeken.",
    ),
    (
        "Canonical",
        "Voeg canonical tags toe om dubbele content te voorkomen.",
    ),
];

/// Triage line keyed by average score bracket
fn triage_line(average_score: u8) -> &'static str {
    if average_score < 50 {
        "De SEO van de site heeft dringend aandacht nodig: los eerst de fouten op die op de meeste pagina's voorkomen."
    } else if average_score < 70 {
        "De SEO van de site is redelijk, maar er is nog duidelijke winst te behalen."
    } else {
        "De SEO van de site is goed: werk de resterende punten bij voor de laatste optimalisaties."
    }
}

/// Builds the recommendation lines for a run
///
/// The first line depends on the average score (below 50, below 70, or
/// higher). Up to three suggestions follow, one per distinct issue category
/// found in the ranked issues, in rank order.
pub fn recommendations(average_score: u8, ranked_issues: &[Issue]) -> Vec<String> {
    let mut lines = vec![triage_line(average_score).to_string()];
    let mut suggested: Vec<&str> = Vec::new();

    for issue in ranked_issues {
        if suggested.len() >= MAX_ISSUE_SUGGESTIONS {
            break;
        }

        let matched = SUGGESTIONS
            .iter()
            .find(|(fragment, _)| issue.message.contains(fragment));

        if let Some(&(_, suggestion)) = matched {
            if !suggested.contains(&suggestion) {
                suggested.push(suggestion);
            }
        }
    }

    lines.extend(suggested.into_iter().map(str::to_string));
    lines.truncate(MAX_RECOMMENDATIONS);
    lines
}
