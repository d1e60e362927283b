//! Requirement-strength classification over JD sentences.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::RequirementStrength;

lazy_static! {
    static ref CRITICAL_RE: Regex = Regex::new(
        r"(?i)\bmust\s+have\b|\brequired\b|\bessential\b|\bminimum\s+\d{1,2}\s*\+?\s*years?\b|\bproven\s+experience\b"
    )
    .unwrap();
    static ref PREFERRED_RE: Regex =
        Regex::new(r"(?i)\bnice\s+to\s+have\b|\bbonus\b|\bpreferred\b|\badvantageous\b").unwrap();
    static ref YEARS_RE: Regex = Regex::new(r"(?i)\b(\d{1,2})\s*\+?\s*years?\b").unwrap();
}

/// Splits canonical text into sentences. The canonical stream has collapsed
/// newlines, so terminal punctuation is the only delimiter left.
pub fn split_sentences(text: &str) -> Vec<&str> {
    text.split(['.', '!', '?', ';'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Classifies one sentence by its trigger phrases. `None` means no trigger —
/// the caller applies the Preferred default.
pub fn classify_sentence(sentence: &str) -> Option<RequirementStrength> {
    if CRITICAL_RE.is_match(sentence) {
        return Some(RequirementStrength::Critical);
    }
    if PREFERRED_RE.is_match(sentence) {
        return Some(RequirementStrength::Preferred);
    }
    None
}

/// Extracts the JD's required years of experience: the largest "N+ years"
/// figure in a critical-classified sentence, falling back to the largest
/// anywhere.
pub fn years_required(sentences: &[&str]) -> Option<u32> {
    let mut critical_max: Option<u32> = None;
    let mut any_max: Option<u32> = None;

    for sentence in sentences {
        for captures in YEARS_RE.captures_iter(sentence) {
            let Ok(years) = captures[1].parse::<u32>() else {
                continue;
            };
            any_max = Some(any_max.map_or(years, |m: u32| m.max(years)));
            if classify_sentence(sentence) == Some(RequirementStrength::Critical) {
                critical_max = Some(critical_max.map_or(years, |m: u32| m.max(years)));
            }
        }
    }

    critical_max.or(any_max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_must_have_is_critical() {
        assert_eq!(
            classify_sentence("must have python and aws"),
            Some(RequirementStrength::Critical)
        );
    }

    #[test]
    fn test_required_and_essential_are_critical() {
        assert_eq!(
            classify_sentence("5+ years experience required"),
            Some(RequirementStrength::Critical)
        );
        assert_eq!(
            classify_sentence("kubernetes knowledge is essential"),
            Some(RequirementStrength::Critical)
        );
        assert_eq!(
            classify_sentence("minimum 3 years with terraform"),
            Some(RequirementStrength::Critical)
        );
    }

    #[test]
    fn test_nice_to_have_is_preferred() {
        assert_eq!(
            classify_sentence("nice to have docker"),
            Some(RequirementStrength::Preferred)
        );
        assert_eq!(
            classify_sentence("kafka is a bonus"),
            Some(RequirementStrength::Preferred)
        );
    }

    #[test]
    fn test_no_trigger_is_none() {
        assert_eq!(classify_sentence("you will build data pipelines"), None);
    }

    #[test]
    fn test_years_prefers_critical_sentences() {
        let sentences = vec![
            "10 years in the industry overall",
            "minimum 5 years of python required",
        ];
        assert_eq!(years_required(&sentences), Some(5));
    }

    #[test]
    fn test_years_falls_back_to_any_sentence() {
        let sentences = vec!["we would love 7+ years of experience"];
        assert_eq!(years_required(&sentences), Some(7));
    }

    #[test]
    fn test_years_absent() {
        assert_eq!(years_required(&["a role for builders"]), None);
    }

    #[test]
    fn test_sentence_split_on_terminal_punctuation() {
        let sentences = split_sentences("must have python. nice to have docker! ok?");
        assert_eq!(sentences.len(), 3);
    }
}
