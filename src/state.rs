use crate::chart::spec::ChartSpec;
use crate::chart::views;
use crate::data::model::DatasetStore;
use crate::selection::{DemographicCategory, SchoolSelection, YearRange};

/// Course preselected on startup when the table has it.
const DEFAULT_COURSE: &str = "CS 2100";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state: the immutable dataset store, the current selections,
/// and the chart spec each selection most recently produced.
///
/// Every `set_*` mutator recomputes exactly one chart; nothing else changes.
pub struct AppState {
    pub store: DatasetStore,

    pub tuition_range: YearRange,
    pub course: Option<String>,
    pub school: SchoolSelection,
    pub category: DemographicCategory,

    pub tuition_chart: ChartSpec,
    /// None only when the grades table has no rows at all.
    pub grade_chart: Option<ChartSpec>,
    pub gpa_chart: ChartSpec,
    pub demographic_chart: ChartSpec,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(store: DatasetStore) -> Self {
        let (lo, hi) = store.year_domain().unwrap_or((1970, 2024));
        let tuition_range = YearRange::new(lo, hi);
        let course = if store.class_grades.row(DEFAULT_COURSE).is_some() {
            Some(DEFAULT_COURSE.to_string())
        } else {
            store.class_grades.rows.first().map(|r| r.course.clone())
        };
        let school = SchoolSelection::All;
        let category = DemographicCategory::SchoolCollege;

        let tuition_chart = views::tuition_trend(&store, tuition_range);
        let grade_chart = course
            .as_deref()
            .and_then(|c| views::course_grade_distribution(&store, c).ok());
        let gpa_chart = views::school_gpa_histogram(&store, &school);
        let demographic_chart = views::demographic_pie(&store, category);

        Self {
            store,
            tuition_range,
            course,
            school,
            category,
            tuition_chart,
            grade_chart,
            gpa_chart,
            demographic_chart,
            status_message: None,
        }
    }

    /// Move the tuition slider pair and regenerate the line chart.
    pub fn set_tuition_range(&mut self, range: YearRange) {
        self.tuition_range = range;
        self.tuition_chart = views::tuition_trend(&self.store, range);
    }

    /// Switch the course dropdown. An unknown course keeps the previous
    /// chart and selection and surfaces the failure in the status line.
    pub fn set_course(&mut self, course: String) {
        match views::course_grade_distribution(&self.store, &course) {
            Ok(spec) => {
                self.course = Some(course);
                self.grade_chart = Some(spec);
                self.status_message = None;
            }
            Err(e) => {
                log::warn!("{e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Switch the school dropdown and regenerate the GPA histogram.
    pub fn set_school(&mut self, selection: SchoolSelection) {
        self.gpa_chart = views::school_gpa_histogram(&self.store, &selection);
        self.school = selection;
    }

    /// Switch the demographics radio and regenerate the donut.
    pub fn set_category(&mut self, category: DemographicCategory) {
        self.category = category;
        self.demographic_chart = views::demographic_pie(&self.store, category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ClassGradesTable, GradeRow, TuitionRecord};

    fn small_store() -> DatasetStore {
        DatasetStore {
            tuition: vec![
                TuitionRecord { year: 1990, tuition: 3000.0 },
                TuitionRecord { year: 1991, tuition: 3200.0 },
            ],
            class_grades: ClassGradesTable {
                buckets: vec!["A".to_string(), "B".to_string()],
                rows: vec![GradeRow {
                    course: "MATH 1310".to_string(),
                    counts: vec![7.0, 3.0],
                }],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_selections_follow_the_data() {
        let state = AppState::new(small_store());
        assert_eq!(state.tuition_range, YearRange::new(1990, 1991));
        // no CS 2100 in this store → first course wins
        assert_eq!(state.course.as_deref(), Some("MATH 1310"));
        assert_eq!(state.school, SchoolSelection::All);
        assert_eq!(state.category, DemographicCategory::SchoolCollege);
        assert!(state.grade_chart.is_some());
    }

    #[test]
    fn test_unknown_course_keeps_the_previous_chart() {
        let mut state = AppState::new(small_store());
        let before = state.grade_chart.clone();

        state.set_course("CS 9999".to_string());

        assert_eq!(state.grade_chart, before);
        assert_eq!(state.course.as_deref(), Some("MATH 1310"));
        let msg = state.status_message.expect("failure must be surfaced");
        assert!(msg.contains("CS 9999"));
    }

    #[test]
    fn test_range_change_recomputes_only_the_tuition_chart() {
        let mut state = AppState::new(small_store());
        let gpa_before = state.gpa_chart.clone();

        state.set_tuition_range(YearRange::new(1991, 1991));

        match &state.tuition_chart.data {
            crate::chart::spec::ChartData::Line { points } => {
                assert_eq!(points.as_slice(), [[1991.0, 3200.0]])
            }
            other => panic!("expected a line, got {other:?}"),
        }
        assert_eq!(state.gpa_chart, gpa_before);
    }
}
