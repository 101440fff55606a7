//! Normalizer Module
//! Drops rows without a usable studio and canonicalizes St. Georg spellings.

use crate::data::loader::RawRecord;
use crate::data::table::CourseEntry;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// The single spelling all St. Georg variants collapse to.
pub const ST_GEORG: &str = "St. Georg";

/// Marker for unknown studios in the source data.
const UNKNOWN_MARKER: &str = "unbekannt";

// St | St. | St Georg | St.Georg | St. Georg, whole string, any case.
static ST_GEORG_VARIANT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^St(?:\.?|\.?\s*Georg)$").expect("valid St. Georg pattern"));

/// Map a trimmed studio name onto its canonical spelling.
pub fn canonical_location(location: &str) -> String {
    let trimmed = location.trim();
    if ST_GEORG_VARIANT.is_match(trimmed) {
        ST_GEORG.to_string()
    } else {
        trimmed.to_string()
    }
}

fn is_unknown_location(location: &str) -> bool {
    location.to_lowercase().contains(UNKNOWN_MARKER)
}

/// Clean raw records into course entries.
///
/// Rows are dropped when the location is missing, marks an unknown studio,
/// or when the course name is empty. Order is preserved.
pub fn normalize(raw: Vec<RawRecord>) -> Vec<CourseEntry> {
    let total = raw.len();
    let entries: Vec<CourseEntry> = raw
        .into_iter()
        .filter_map(|record| {
            let location = record.location?;
            if is_unknown_location(&location) {
                return None;
            }
            let location = canonical_location(&location);
            if location.is_empty() {
                return None;
            }
            let course = record.course.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())?;
            Some(CourseEntry {
                day: record.day.map(|d| d.trim().to_string()).unwrap_or_default(),
                time: record.time.map(|t| t.trim().to_string()).unwrap_or_default(),
                course,
                location,
            })
        })
        .collect();

    debug!(total, kept = entries.len(), "normalized schedule rows");
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn raw(location: Option<&str>) -> RawRecord {
        RawRecord {
            day: Some("Montag".into()),
            time: Some("09:00".into()),
            course: Some("Yoga".into()),
            location: location.map(str::to_string),
        }
    }

    #[test]
    fn all_st_georg_variants_collapse() {
        for variant in [
            "St", "St.", "St Georg", "St. Georg", "st.georg", "ST   GEORG", "  st. georg ", "st",
        ] {
            assert_eq!(canonical_location(variant), ST_GEORG, "variant {variant:?}");
        }
    }

    #[test]
    fn longer_names_are_not_canonicalized() {
        assert_eq!(canonical_location("St. Pauli"), "St. Pauli");
        assert_eq!(canonical_location("Studio St Georg"), "Studio St Georg");
        assert_eq!(canonical_location("St Georg Nord"), "St Georg Nord");
        assert_eq!(canonical_location("  Altona "), "Altona");
    }

    #[test]
    fn drops_missing_and_unknown_locations() {
        let rows = normalize(vec![
            raw(None),
            raw(Some("Unbekannt")),
            raw(Some("Ort UNBEKANNT (neu)")),
            raw(Some("Altona")),
        ]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].location, "Altona");
    }

    #[test]
    fn drops_rows_without_course() {
        let mut record = raw(Some("Altona"));
        record.course = None;
        assert!(normalize(vec![record]).is_empty());
    }

    #[test]
    fn keeps_rows_with_bad_time() {
        let mut record = raw(Some("St."));
        record.time = Some("abc".into());
        let rows = normalize(vec![record]);
        assert_eq!(rows[0].time, "abc");
        assert_eq!(rows[0].location, ST_GEORG);
    }

    proptest! {
        #[test]
        fn output_locations_are_always_usable(locations in proptest::collection::vec(
            proptest::option::of(prop_oneof![
                "[ a-zA-Z.]{0,12}",
                Just("Studio UnBekannt".to_string()),
            ]),
            0..20)
        ) {
            let rows = normalize(locations.iter().map(|l| raw(l.as_deref())).collect());
            for row in rows {
                prop_assert!(!row.location.is_empty());
                prop_assert!(!row.location.to_lowercase().contains("unbekannt"));
                prop_assert_eq!(row.location.trim(), row.location.as_str());
            }
        }
    }
}
