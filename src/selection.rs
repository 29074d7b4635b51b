use std::fmt;
use std::str::FromStr;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Selection values – one per control, owned by the UI and passed by value
// ---------------------------------------------------------------------------

/// Inclusive year range from the tuition slider pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub lo: i32,
    pub hi: i32,
}

impl YearRange {
    pub fn new(lo: i32, hi: i32) -> Self {
        Self { lo, hi }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.lo <= year && year <= self.hi
    }
}

/// School dropdown value: one school code, or "All" for no restriction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchoolSelection {
    All,
    Code(String),
}

impl SchoolSelection {
    /// The value as shown in chart titles.
    pub fn label(&self) -> &str {
        match self {
            SchoolSelection::All => "All",
            SchoolSelection::Code(code) => code,
        }
    }
}

impl fmt::Display for SchoolSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The six demographic radio options. Closed set: every consumer dispatches
/// with an exhaustive `match`, so adding a variant is a compile error until
/// each table and palette mapping is updated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemographicCategory {
    Genders,
    FirstGeneration,
    AcademicLoad,
    RaceEthnicity,
    Residency,
    SchoolCollege,
}

impl DemographicCategory {
    pub const ALL: [DemographicCategory; 6] = [
        DemographicCategory::Genders,
        DemographicCategory::FirstGeneration,
        DemographicCategory::AcademicLoad,
        DemographicCategory::RaceEthnicity,
        DemographicCategory::Residency,
        DemographicCategory::SchoolCollege,
    ];

    /// Label shown on the radio button and accepted by [`FromStr`].
    pub fn label(self) -> &'static str {
        match self {
            DemographicCategory::Genders => "Genders",
            DemographicCategory::FirstGeneration => "First Generation",
            DemographicCategory::AcademicLoad => "Academic Load",
            DemographicCategory::RaceEthnicity => "Race/Ethnicity",
            DemographicCategory::Residency => "In/Out of State",
            DemographicCategory::SchoolCollege => "School/College",
        }
    }
}

impl fmt::Display for DemographicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DemographicCategory {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label() == s)
            .ok_or_else(|| SelectionError::UnknownCategory(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// A selection value outside its documented domain. A structurally valid
/// selection that merely matches zero rows is not an error and produces an
/// empty chart instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no course {0:?} in the class grades table")]
    UnknownCourse(String),
    #[error("unrecognized demographic category {0:?}")]
    UnknownCategory(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_contains_is_inclusive() {
        let range = YearRange::new(2000, 2010);
        assert!(range.contains(2000));
        assert!(range.contains(2010));
        assert!(!range.contains(1999));
        assert!(!range.contains(2011));
    }

    #[test]
    fn test_reversed_range_matches_nothing() {
        let range = YearRange::new(2010, 2000);
        assert!(!range.contains(2005));
    }

    #[test]
    fn test_category_labels_round_trip() {
        for category in DemographicCategory::ALL {
            assert_eq!(category.label().parse::<DemographicCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_is_a_named_failure() {
        let err = "Favorite Color".parse::<DemographicCategory>().unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownCategory("Favorite Color".to_string())
        );
    }

    #[test]
    fn test_school_selection_labels() {
        assert_eq!(SchoolSelection::All.label(), "All");
        assert_eq!(SchoolSelection::Code("ENGR".to_string()).label(), "ENGR");
    }
}
