// Canonical naming for Indian states and union territories.
//
// Every table is keyed by free-text place names that differ between census
// releases ("Orissa" vs "ODISHA", "State - Punjab (03)"). All lookups in the
// crate go through `normalize` so that the same place always ends up under
// one string.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// The 36 canonical state / union-territory names.
pub const INDIAN_STATES: [&str; 36] = [
    "JAMMU & KASHMIR",
    "HIMACHAL PRADESH",
    "PUNJAB",
    "CHANDIGARH",
    "UTTARAKHAND",
    "HARYANA",
    "NCT OF DELHI",
    "RAJASTHAN",
    "UTTAR PRADESH",
    "BIHAR",
    "SIKKIM",
    "ARUNACHAL PRADESH",
    "NAGALAND",
    "MANIPUR",
    "MIZORAM",
    "TRIPURA",
    "MEGHALAYA",
    "ASSAM",
    "WEST BENGAL",
    "JHARKHAND",
    "ODISHA",
    "CHHATTISGARH",
    "MADHYA PRADESH",
    "GUJARAT",
    "DAMAN & DIU",
    "DADRA & NAGAR HAVELI",
    "MAHARASHTRA",
    "ANDHRA PRADESH",
    "KARNATAKA",
    "GOA",
    "LAKSHADWEEP",
    "KERALA",
    "TAMIL NADU",
    "PUDUCHERRY",
    "ANDAMAN & NICOBAR ISLANDS",
    "TELANGANA",
];

static STATE_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| INDIAN_STATES.iter().copied().collect());

static SYNONYMS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("DELHI", "NCT OF DELHI"),
        ("NCT OF DELHI", "NCT OF DELHI"),
        ("ORISSA", "ODISHA"),
        ("TELENGANA", "TELANGANA"),
        ("UTTARANCHAL", "UTTARAKHAND"),
        ("JAMMU AND KASHMIR", "JAMMU & KASHMIR"),
        ("ANDAMAN AND NICOBAR", "ANDAMAN & NICOBAR ISLANDS"),
        ("ANDAMAN AND NICOBAR ISLANDS", "ANDAMAN & NICOBAR ISLANDS"),
        ("ANDAMAN & NICOBAR", "ANDAMAN & NICOBAR ISLANDS"),
        ("DADRA AND NAGAR HAVELI", "DADRA & NAGAR HAVELI"),
        ("DAMAN AND DIU", "DAMAN & DIU"),
    ])
});

// Trailing numeric area code, e.g. "PUNJAB (03)".
static CODE_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*\(\d+\)$").expect("valid regex"));
// "STATE - " / "UT - " labels used by the D-series tables.
static KIND_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:STATE|UT)\s*-\s*").expect("valid regex"));

/// Map a raw place name to its canonical spelling.
///
/// Names outside the synonym table (countries, unmatched strings) come back
/// uppercased and trimmed. The result is a fixed point: feeding it back in
/// returns the same string.
pub fn normalize(raw: &str) -> String {
    let mut name = raw.trim().to_uppercase();
    // Labels can stack ("STATE - UT - X", "X (01) (02)"); strip until stable
    // so that a second pass has nothing left to remove.
    loop {
        let stripped = KIND_PREFIX
            .replace(CODE_SUFFIX.replace(&name, "").as_ref(), "")
            .trim()
            .to_string();
        if stripped == name {
            break;
        }
        name = stripped;
    }
    match SYNONYMS.get(name.as_str()) {
        Some(canonical) => canonical.to_string(),
        None => name,
    }
}

/// Membership in the 36-entity enumeration. Expects a canonical name.
pub fn is_indian_state(name: &str) -> bool {
    STATE_SET.contains(name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CensusAvailability {
    Available,
    /// Entity exists on today's map but was formed after the census.
    NotEnumerated { formed: i32 },
}

pub fn census_availability(name: &str) -> CensusAvailability {
    match name {
        "TELANGANA" => CensusAvailability::NotEnumerated { formed: 2014 },
        _ => CensusAvailability::Available,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn old_spellings_map_to_current_names() {
        assert_eq!(normalize("Orissa"), "ODISHA");
        assert_eq!(normalize("odisha"), "ODISHA");
        assert_eq!(normalize("Delhi"), "NCT OF DELHI");
        assert_eq!(normalize("NCT of Delhi"), "NCT OF DELHI");
        assert_eq!(normalize("Uttaranchal"), "UTTARAKHAND");
        assert_eq!(normalize("Telengana"), "TELANGANA");
        assert_eq!(normalize("Jammu and Kashmir"), "JAMMU & KASHMIR");
        assert_eq!(normalize("Dadra and Nagar Haveli"), "DADRA & NAGAR HAVELI");
        assert_eq!(normalize("Daman and Diu"), "DAMAN & DIU");
    }

    #[test]
    fn andaman_variants_collapse() {
        for raw in ["Andaman and Nicobar", "ANDAMAN AND NICOBAR ISLANDS", "Andaman & Nicobar"] {
            assert_eq!(normalize(raw), "ANDAMAN & NICOBAR ISLANDS");
        }
    }

    #[test]
    fn strips_prefix_and_code_suffix() {
        assert_eq!(normalize("State - Punjab (01)"), "PUNJAB");
        assert_eq!(normalize("UT - Chandigarh (04)"), "CHANDIGARH");
        assert_eq!(normalize("STATE-ORISSA (21)"), "ODISHA");
        assert_eq!(normalize("  Kerala  "), "KERALA");
    }

    #[test]
    fn foreign_names_pass_through_uppercased() {
        assert_eq!(normalize(" Nepal "), "NEPAL");
        assert!(!is_indian_state(&normalize("Nepal")));
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "",
            "Orissa",
            "State - Punjab (01)",
            "STATE - UT - Goa",
            "Kerala (01) (02)",
            "Andaman & Nicobar",
            "Countries in Asia beyond India",
            "u.s.a.",
            "(12)",
        ];
        for raw in samples {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn every_enumerated_state_is_canonical() {
        for state in INDIAN_STATES {
            assert_eq!(normalize(state), state);
            assert!(is_indian_state(state));
        }
    }

    #[test]
    fn telangana_is_not_enumerated() {
        assert_eq!(
            census_availability("TELANGANA"),
            CensusAvailability::NotEnumerated { formed: 2014 }
        );
        assert_eq!(census_availability("BIHAR"), CensusAvailability::Available);
    }
}
