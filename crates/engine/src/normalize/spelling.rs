//! US/UK spelling canonicalization.
//!
//! Downstream matching runs on a single canonical (US) spelling so "optimise"
//! in a JD matches "optimize" in a CV. The mapping is a fixed table applied
//! token-wise to the canonical stream only; original text is never touched.

use std::collections::HashMap;
use std::sync::LazyLock;

static UK_TO_US: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    HashMap::from([
        ("optimise", "optimize"),
        ("optimised", "optimized"),
        ("optimising", "optimizing"),
        ("optimisation", "optimization"),
        ("analyse", "analyze"),
        ("analysed", "analyzed"),
        ("analysing", "analyzing"),
        ("organise", "organize"),
        ("organised", "organized"),
        ("organising", "organizing"),
        ("organisation", "organization"),
        ("organisations", "organizations"),
        ("utilise", "utilize"),
        ("utilised", "utilized"),
        ("utilising", "utilizing"),
        ("utilisation", "utilization"),
        ("specialise", "specialize"),
        ("specialised", "specialized"),
        ("specialising", "specializing"),
        ("specialisation", "specialization"),
        ("minimise", "minimize"),
        ("minimised", "minimized"),
        ("maximise", "maximize"),
        ("maximised", "maximized"),
        ("summarise", "summarize"),
        ("summarised", "summarized"),
        ("prioritise", "prioritize"),
        ("prioritised", "prioritized"),
        ("standardise", "standardize"),
        ("standardised", "standardized"),
        ("synchronise", "synchronize"),
        ("synchronised", "synchronized"),
        ("visualise", "visualize"),
        ("visualisation", "visualization"),
        ("recognise", "recognize"),
        ("recognised", "recognized"),
        ("realise", "realize"),
        ("realised", "realized"),
        ("customise", "customize"),
        ("customised", "customized"),
        ("modernise", "modernize"),
        ("modernised", "modernized"),
        ("behaviour", "behavior"),
        ("behaviours", "behaviors"),
        ("colour", "color"),
        ("colours", "colors"),
        ("favour", "favor"),
        ("flavour", "flavor"),
        ("honour", "honor"),
        ("labour", "labor"),
        ("neighbour", "neighbor"),
        ("endeavour", "endeavor"),
        ("centre", "center"),
        ("centres", "centers"),
        ("litre", "liter"),
        ("metre", "meter"),
        ("fibre", "fiber"),
        ("theatre", "theater"),
        ("licence", "license"),
        ("licences", "licenses"),
        ("defence", "defense"),
        ("offence", "offense"),
        ("practise", "practice"),
        ("practised", "practiced"),
        ("programme", "program"),
        ("programmes", "programs"),
        ("catalogue", "catalog"),
        ("dialogue", "dialog"),
        ("analogue", "analog"),
        ("travelling", "traveling"),
        ("travelled", "traveled"),
        ("modelling", "modeling"),
        ("modelled", "modeled"),
        ("labelled", "labeled"),
        ("labelling", "labeling"),
        ("cancelled", "canceled"),
        ("cancelling", "canceling"),
        ("fulfil", "fulfill"),
        ("fulfilment", "fulfillment"),
        ("enrol", "enroll"),
        ("enrolment", "enrollment"),
        ("skilful", "skillful"),
        ("speciality", "specialty"),
        ("artefact", "artifact"),
        ("artefacts", "artifacts"),
        ("grey", "gray"),
        ("cheque", "check"),
        ("aluminium", "aluminum"),
        ("aeroplane", "airplane"),
        ("maths", "math"),
    ])
});

/// Replaces UK spellings with their US forms in an already-lowercased
/// fragment. Returns the rewritten text and the number of UK tokens seen
/// (used for variant detection).
pub(crate) fn to_us_spelling(lower: &str) -> (String, usize) {
    let mut out = String::with_capacity(lower.len());
    let mut hits = 0usize;
    let mut word = String::new();

    for ch in lower.chars() {
        if ch.is_alphabetic() {
            word.push(ch);
            continue;
        }
        flush_word(&mut out, &mut word, &mut hits);
        out.push(ch);
    }
    flush_word(&mut out, &mut word, &mut hits);

    (out, hits)
}

fn flush_word(out: &mut String, word: &mut String, hits: &mut usize) {
    if word.is_empty() {
        return;
    }
    match UK_TO_US.get(word.as_str()) {
        Some(us) => {
            out.push_str(us);
            *hits += 1;
        }
        None => out.push_str(word),
    }
    word.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_optimise_to_optimize() {
        let (text, hits) = to_us_spelling("we optimise our pipelines");
        assert_eq!(text, "we optimize our pipelines");
        assert_eq!(hits, 1);
    }

    #[test]
    fn test_us_text_passes_through_untouched() {
        let (text, hits) = to_us_spelling("organized color behavior");
        assert_eq!(text, "organized color behavior");
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_word_boundaries_respected() {
        // "colourful" is not in the table and must not be half-rewritten
        let (text, hits) = to_us_spelling("colourful");
        assert_eq!(text, "colourful");
        assert_eq!(hits, 0);
    }

    #[test]
    fn test_counts_multiple_uk_hits() {
        let (text, hits) = to_us_spelling("organised a programme at the centre");
        assert_eq!(text, "organized a program at the center");
        assert_eq!(hits, 3);
    }
}
