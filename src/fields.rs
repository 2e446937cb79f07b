//! Parsers that turn free-form site text into the canonical field types.

use scraper::ElementRef;

use crate::dom;
use crate::model::{InstructionStep, Tool};

/// Serving count out of free text such as "Serves 4 people".
///
/// The first whitespace-separated token that parses as a base-10 integer in
/// 16-bit range wins; 0 means the yield is unknown. A range like "4-6" is
/// not an integer token and matches nothing, and an unrelated number earlier
/// in the string wins over the real yield. Callers that care pre-slice the
/// text down to the fragment holding the count; downstream scrapers are
/// calibrated against exactly these semantics.
pub fn parse_yield(text: &str) -> i16 {
    text.split_whitespace()
        .find_map(|token| token.parse::<i16>().ok())
        .unwrap_or(0)
}

/// Compose hour and minute magnitudes into an ISO-8601 duration.
///
/// A zero or absent magnitude is omitted; with neither component present
/// the result is the empty string, never `PT` or `PT0M`.
pub fn format_duration(hours: Option<u32>, minutes: Option<u32>) -> String {
    let mut out = String::new();
    if let Some(h) = hours.filter(|h| *h > 0) {
        out.push_str(&format!("{h}H"));
    }
    if let Some(m) = minutes.filter(|m| *m > 0) {
        out.push_str(&format!("{m}M"));
    }
    if out.is_empty() {
        out
    } else {
        format!("PT{out}")
    }
}

const HOUR_WORDS: &[&str] = &[
    "hour", "hr", "heure", "uur", "stunde", "std", "tim", "ore", "hora", "godz",
];
const MINUTE_WORDS: &[&str] = &["min"];

fn is_hour_word(word: &str) -> bool {
    HOUR_WORDS.iter().any(|w| word.starts_with(w))
}

fn is_minute_word(word: &str) -> bool {
    MINUTE_WORDS.iter().any(|w| word.starts_with(w))
}

/// Free text such as "1 hour 30 minutes" or "45 min" to an ISO-8601
/// duration.
///
/// Magnitudes are classified by the unit keyword next to them (matching the
/// unit vocabulary of the sites the scrapers cover) and handed to
/// [`format_duration`]. Text already in ISO-8601 form passes through
/// verbatim; text with no recognizable magnitude yields the empty string.
pub fn parse_duration(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.starts_with("PT") {
        return trimmed.to_string();
    }

    let mut hours = None;
    let mut minutes = None;
    let mut pending: Option<u32> = None;

    for token in trimmed.to_lowercase().split_whitespace() {
        let digits: String = token.chars().take_while(char::is_ascii_digit).collect();
        let unit = token[digits.len()..].trim_matches(|c: char| !c.is_alphabetic());

        let value = if digits.is_empty() {
            pending.take()
        } else {
            digits.parse::<u32>().ok()
        };

        match value {
            Some(v) if is_hour_word(unit) => hours = Some(v),
            Some(v) if is_minute_word(unit) => minutes = Some(v),
            Some(v) if unit.is_empty() => pending = Some(v),
            _ => {}
        }
    }

    format_duration(hours, minutes)
}

/// Collapse whitespace runs to a single space, apply every `(old, new)`
/// replacement pair in list order, trim the ends.
pub fn normalize(text: &str, replacements: &[(&str, &str)]) -> String {
    let mut out = text.split_whitespace().collect::<Vec<_>>().join(" ");
    for (old, new) in replacements {
        out = out.replace(old, new);
    }
    out.trim().to_string()
}

/// Ordered list of normalized node texts.
///
/// Entries that normalize to the empty string are preserved; several sites
/// use blank entries as section separators, so dropping them is the
/// caller's decision.
pub fn text_list(nodes: &[ElementRef<'_>], replacements: &[(&str, &str)]) -> Vec<String> {
    nodes
        .iter()
        .map(|node| normalize(&dom::text_of(*node), replacements))
        .collect()
}

/// Ordered instruction steps from the node texts. Empty entries are
/// preserved here too; most call sites filter them out.
pub fn step_list(nodes: &[ElementRef<'_>], replacements: &[(&str, &str)]) -> Vec<InstructionStep> {
    text_list(nodes, replacements)
        .into_iter()
        .map(InstructionStep::new)
        .collect()
}

/// Tools from the node texts, each with the default quantity of 1.
pub fn tool_list(nodes: &[ElementRef<'_>], replacements: &[(&str, &str)]) -> Vec<Tool> {
    text_list(nodes, replacements)
        .into_iter()
        .map(Tool::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;
    use scraper::Html;

    #[test]
    fn test_parse_yield_first_integer_token_wins() {
        assert_eq!(parse_yield("Serves 4 people"), 4);
        assert_eq!(parse_yield("Serves 4 to 6"), 4);
        assert_eq!(parse_yield("12"), 12);
        assert_eq!(parse_yield("about a dozen"), 0);
        assert_eq!(parse_yield(""), 0);
    }

    #[test]
    fn test_parse_yield_skips_non_integer_tokens() {
        // "4-6" is not an integer token, so the range matches nothing
        assert_eq!(parse_yield("4-6 servings"), 0);
        assert_eq!(parse_yield("makes 4-6, say 5"), 0);
        // out of 16-bit range
        assert_eq!(parse_yield("99999 servings"), 0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Some(1), Some(30)), "PT1H30M");
        assert_eq!(format_duration(None, Some(45)), "PT45M");
        assert_eq!(format_duration(Some(0), Some(45)), "PT45M");
        assert_eq!(format_duration(Some(2), None), "PT2H");
        assert_eq!(format_duration(None, None), "");
        assert_eq!(format_duration(Some(0), Some(0)), "");
    }

    #[test]
    fn test_parse_duration_classifies_units() {
        assert_eq!(parse_duration("1 hour 30 minutes"), "PT1H30M");
        assert_eq!(parse_duration("45 min"), "PT45M");
        assert_eq!(parse_duration("45min"), "PT45M");
        assert_eq!(parse_duration("2 hours"), "PT2H");
        assert_eq!(parse_duration("Prep time: 10 mins"), "PT10M");
        assert_eq!(parse_duration("1 Stunde 15 Minuten"), "PT1H15M");
        assert_eq!(parse_duration("ready soon"), "");
    }

    #[test]
    fn test_parse_duration_passes_iso_through() {
        assert_eq!(parse_duration("PT1H30M"), "PT1H30M");
        assert_eq!(parse_duration("  PT10M "), "PT10M");
    }

    #[test]
    fn test_duration_round_trip() {
        for duration in ["PT1H30M", "PT45M", "PT2H", ""] {
            assert_eq!(parse_duration(&parse_duration(duration)), duration);
        }
        assert_eq!(parse_duration(&format_duration(Some(1), Some(30))), "PT1H30M");
    }

    #[test]
    fn test_normalize_collapses_whitespace() {
        assert_eq!(normalize("  a \t b\n\nc ", &[]), "a b c");
        assert_eq!(normalize("", &[]), "");
    }

    #[test]
    fn test_normalize_applies_replacements_in_order() {
        let replacements = [("ADVERTISEMENT", ""), ("1/2", "½")];
        assert_eq!(
            normalize("1/2 cup sugar ADVERTISEMENT", &replacements),
            "½ cup sugar"
        );
    }

    #[test]
    fn test_normalize_is_idempotent_on_clean_text() {
        let replacements = [("ADVERTISEMENT", ""), ("  ", " ")];
        let once = normalize("stir  the ADVERTISEMENT soup", &replacements);
        assert_eq!(normalize(&once, &replacements), once);
    }

    #[test]
    fn test_builders_preserve_order_and_empties() {
        let html = Html::parse_document(
            r#"<ul id="list">
                <li>2 cups  flour</li>
                <li>   </li>
                <li>1 egg</li>
            </ul>"#,
        );
        let list = dom::find_first_by_attr(dom::root(&html), "id", "list").unwrap();
        let nodes = dom::find_all(list, |el| el.value().name() == "li");

        let texts = text_list(&nodes, &[]);
        assert_eq!(texts, vec!["2 cups flour", "", "1 egg"]);

        let steps = step_list(&nodes, &[]);
        assert_eq!(steps.len(), 3);
        assert_eq!(steps[0].text, "2 cups flour");

        let tools = tool_list(&nodes, &[]);
        assert_eq!(tools[2].text, "1 egg");
        assert_eq!(tools[2].quantity, 1);
    }
}
