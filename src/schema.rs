//! Column headers recognized in the census tables.
//!
//! Alias lists are ordered: the first header whose cell is present and
//! non-empty wins. Header text is matched exactly and case-sensitively.

/// Primary flow table (D-01, place of birth).
pub mod flow {
    pub const DESTINATION: &[&str] = &["AreaName", "Area Name"];
    pub const ORIGIN: &[&str] = &["BirthPlace", "Birth place"];
    pub const TOTAL: &[&str] = &["Total_Persons", "Total"];
    pub const MALE: &[&str] = &["Total_Males", "Male"];
    pub const FEMALE: &[&str] = &["Total_Females", "Female"];

    pub const RURAL_TOTAL: &[&str] = &["Rural_Persons", "Rural_Total"];
    pub const RURAL_MALE: &[&str] = &["Rural_Males"];
    pub const RURAL_FEMALE: &[&str] = &["Rural_Females"];

    pub const URBAN_TOTAL: &[&str] = &["Urban_Persons", "Urban_Total"];
    pub const URBAN_MALE: &[&str] = &["Urban_Males"];
    pub const URBAN_FEMALE: &[&str] = &["Urban_Females"];
}

/// Matching keys shared by the duration and reason tables.
pub mod auxiliary {
    pub const AREA_NAME: &[&str] = &["AreaName", "Area Name"];
    pub const ORIGIN: &[&str] = &["Origin", "LastResidence"];
}

/// Duration-of-stay buckets, paired with display labels.
pub mod duration {
    pub const LT_1YR: &str = "Persons_LT1yr";
    pub const Y1_TO_4: &str = "Persons_1to4yr";
    pub const Y5_TO_9: &str = "Persons_5to9yr";
    pub const Y10_TO_19: &str = "Persons_10to19yr";
    pub const Y20_PLUS: &str = "Persons_20plusyr";
    pub const NOT_STATED: &str = "Persons_DurNS";

    pub const BUCKETS: &[(&str, &str)] = &[
        (LT_1YR, "Less than 1 year"),
        (Y1_TO_4, "1-4 years"),
        (Y5_TO_9, "5-9 years"),
        (Y10_TO_19, "10-19 years"),
        (Y20_PLUS, "20+ years"),
        (NOT_STATED, "Duration not stated"),
    ];

    pub fn columns() -> Vec<String> {
        BUCKETS.iter().map(|(c, _)| c.to_string()).collect()
    }
}

/// Reason-for-migration buckets. Each reason exists as `Persons_`,
/// `Males_` and `Females_` columns.
pub mod reason {
    pub const REASONS: &[(&str, &str)] = &[
        ("Work", "Work / Employment"),
        ("Business", "Business"),
        ("Education", "Education"),
        ("Marriage", "Marriage"),
        ("MoveAfterBirth", "Moved after birth"),
        ("MoveWithHH", "Moved with household"),
        ("Other", "Other"),
    ];

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Breakdown {
        Persons,
        Males,
        Females,
    }

    impl Breakdown {
        pub fn prefix(self) -> &'static str {
            match self {
                Breakdown::Persons => "Persons",
                Breakdown::Males => "Males",
                Breakdown::Females => "Females",
            }
        }
    }

    pub fn column(breakdown: Breakdown, reason: &str) -> String {
        format!("{}_{}", breakdown.prefix(), reason)
    }

    pub fn columns(breakdown: Breakdown) -> Vec<String> {
        REASONS.iter().map(|(r, _)| column(breakdown, r)).collect()
    }
}
