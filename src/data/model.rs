use crate::selection::DemographicCategory;

// ---------------------------------------------------------------------------
// Table rows
// ---------------------------------------------------------------------------

/// One row of the tuition trend table.
#[derive(Debug, Clone, PartialEq)]
pub struct TuitionRecord {
    pub year: i32,
    pub tuition: f64,
}

/// One course row of the class grades table. `counts` is aligned with
/// [`ClassGradesTable::buckets`].
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow {
    pub course: String,
    pub counts: Vec<f64>,
}

/// One (course, school) row of the GPA table.
#[derive(Debug, Clone, PartialEq)]
pub struct GpaRecord {
    pub course: String,
    pub school: String,
    pub gpa: f64,
}

/// One slice row of a two-column demographic table.
#[derive(Debug, Clone, PartialEq)]
pub struct DemographicRow {
    pub label: String,
    pub count: f64,
}

// ---------------------------------------------------------------------------
// ClassGradesTable – grade counts per course, buckets in file column order
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ClassGradesTable {
    /// Grade bucket names, in the order the source file listed them.
    pub buckets: Vec<String>,
    pub rows: Vec<GradeRow>,
}

impl ClassGradesTable {
    /// All course identifiers, in row order (feeds the course dropdown).
    pub fn course_numbers(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.course.as_str())
    }

    /// Exact-match lookup on the course key column.
    pub fn row(&self, course: &str) -> Option<&GradeRow> {
        self.rows.iter().find(|r| r.course == course)
    }
}

// ---------------------------------------------------------------------------
// DatasetStore – all nine tables, loaded once and read-only afterwards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct DatasetStore {
    /// Sorted ascending by year (the loader guarantees this).
    pub tuition: Vec<TuitionRecord>,
    pub class_grades: ClassGradesTable,
    pub school_gpa: Vec<GpaRecord>,
    pub genders: Vec<DemographicRow>,
    pub generations: Vec<DemographicRow>,
    pub loads: Vec<DemographicRow>,
    pub races: Vec<DemographicRow>,
    pub residencies: Vec<DemographicRow>,
    pub schools: Vec<DemographicRow>,
}

impl DatasetStore {
    /// The demographic table behind a radio option. Exhaustive, so a new
    /// category cannot compile until it is given its own table.
    pub fn demographic(&self, category: DemographicCategory) -> &[DemographicRow] {
        match category {
            DemographicCategory::Genders => &self.genders,
            DemographicCategory::FirstGeneration => &self.generations,
            DemographicCategory::AcademicLoad => &self.loads,
            DemographicCategory::RaceEthnicity => &self.races,
            DemographicCategory::Residency => &self.residencies,
            DemographicCategory::SchoolCollege => &self.schools,
        }
    }

    /// Min and max year present in the tuition table.
    pub fn year_domain(&self) -> Option<(i32, i32)> {
        Some((self.tuition.first()?.year, self.tuition.last()?.year))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str) -> Vec<DemographicRow> {
        vec![DemographicRow {
            label: label.to_string(),
            count: 1.0,
        }]
    }

    #[test]
    fn test_each_category_dispatches_to_its_own_table() {
        let store = DatasetStore {
            genders: row("Female"),
            generations: row("First Generation"),
            loads: row("Full-time"),
            races: row("Asian"),
            residencies: row("In-State"),
            schools: row("School of Law"),
            ..Default::default()
        };

        let labels: Vec<&str> = DemographicCategory::ALL
            .iter()
            .map(|&c| store.demographic(c)[0].label.as_str())
            .collect();
        assert_eq!(
            labels,
            [
                "Female",
                "First Generation",
                "Full-time",
                "Asian",
                "In-State",
                "School of Law"
            ]
        );
    }

    #[test]
    fn test_year_domain_spans_the_table() {
        let store = DatasetStore {
            tuition: vec![
                TuitionRecord { year: 1970, tuition: 405.0 },
                TuitionRecord { year: 1971, tuition: 420.0 },
                TuitionRecord { year: 2024, tuition: 17000.0 },
            ],
            ..Default::default()
        };
        assert_eq!(store.year_domain(), Some((1970, 2024)));
        assert_eq!(DatasetStore::default().year_domain(), None);
    }

    #[test]
    fn test_course_lookup_is_exact_match() {
        let table = ClassGradesTable {
            buckets: vec!["A".to_string(), "B".to_string()],
            rows: vec![GradeRow {
                course: "CS 2100".to_string(),
                counts: vec![2.0, 5.0],
            }],
        };
        assert!(table.row("CS 2100").is_some());
        assert!(table.row("CS 210").is_none());
        assert!(table.row("cs 2100").is_none());
    }
}
