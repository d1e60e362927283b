//! Temporal extraction: summing non-overlapping employment spans.

use chrono::{Datelike, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // "2018-2024", "2018 – present", "2019 to 2021"
    static ref RANGE_RE: Regex = Regex::new(
        r"(?i)\b((?:19|20)\d{2})\s*(?:[-–—~]|to|until)\s*((?:19|20)\d{2}|present|current|now|today)\b"
    )
    .unwrap();
}

const EARLIEST_PLAUSIBLE_YEAR: i32 = 1950;

/// Result of scanning date ranges. `low_confidence` is set when more than
/// half of the dated entries failed to parse into a plausible span.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearsOutcome {
    pub years: u32,
    pub low_confidence: bool,
}

/// Sums non-overlapping year spans across the given section texts.
/// Overlapping ranges count once; unparsable or implausible ranges are
/// skipped and never raise.
pub fn years_from_texts<'a, I>(texts: I) -> YearsOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let current_year = Utc::now().year();
    let mut spans: Vec<(i32, i32)> = Vec::new();
    let mut dated_entries = 0usize;
    let mut failures = 0usize;

    for text in texts {
        for captures in RANGE_RE.captures_iter(text) {
            dated_entries += 1;
            match parse_span(&captures, current_year) {
                Some(span) => spans.push(span),
                None => failures += 1,
            }
        }
    }

    let years = merged_years(&mut spans);
    let low_confidence = dated_entries > 0 && failures * 2 > dated_entries;
    if low_confidence {
        tracing::warn!(
            dated_entries,
            failures,
            "over half of dated entries failed to parse; years figure is low-confidence"
        );
    }

    YearsOutcome {
        years,
        low_confidence,
    }
}

fn parse_span(captures: &regex::Captures<'_>, current_year: i32) -> Option<(i32, i32)> {
    let start: i32 = captures[1].parse().ok()?;
    let end_raw = captures[2].to_lowercase();
    let end: i32 = match end_raw.as_str() {
        "present" | "current" | "now" | "today" => current_year,
        literal => literal.parse().ok()?,
    };

    if start < EARLIEST_PLAUSIBLE_YEAR || end < start || end > current_year + 1 {
        return None;
    }
    Some((start, end))
}

/// Merges overlapping spans and sums their lengths in years.
fn merged_years(spans: &mut Vec<(i32, i32)>) -> u32 {
    if spans.is_empty() {
        return 0;
    }
    spans.sort_unstable();

    let mut total = 0i32;
    let (mut cur_start, mut cur_end) = spans[0];
    for &(start, end) in spans.iter().skip(1) {
        if start <= cur_end {
            cur_end = cur_end.max(end);
        } else {
            total += cur_end - cur_start;
            cur_start = start;
            cur_end = end;
        }
    }
    total += cur_end - cur_start;
    total.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_range() {
        let outcome = years_from_texts(["acme, 2018-2024, platform work"]);
        assert_eq!(outcome.years, 6);
        assert!(!outcome.low_confidence);
    }

    #[test]
    fn test_present_resolves_to_current_year() {
        let outcome = years_from_texts(["2020 - present"]);
        let expected = (Utc::now().year() - 2020) as u32;
        assert_eq!(outcome.years, expected);
    }

    #[test]
    fn test_overlapping_ranges_count_once() {
        // 2015-2020 and 2018-2022 overlap; union is 2015-2022 = 7 years
        let outcome = years_from_texts(["first role 2015-2020", "second role 2018-2022"]);
        assert_eq!(outcome.years, 7);
    }

    #[test]
    fn test_disjoint_ranges_sum() {
        let outcome = years_from_texts(["2010-2012 then a break, 2015-2018"]);
        assert_eq!(outcome.years, 5);
    }

    #[test]
    fn test_reversed_range_is_skipped_not_fatal() {
        let outcome = years_from_texts(["2024-2018 (typo) and 2020-2022"]);
        assert_eq!(outcome.years, 2);
    }

    #[test]
    fn test_low_confidence_when_most_entries_malformed() {
        let outcome = years_from_texts(["2024-2018", "2030-2010", "2020-2021"]);
        assert_eq!(outcome.years, 1);
        assert!(outcome.low_confidence);
    }

    #[test]
    fn test_no_dates_is_zero_and_confident() {
        let outcome = years_from_texts(["no dates here"]);
        assert_eq!(outcome, YearsOutcome::default());
    }
}
