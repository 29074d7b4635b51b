use std::collections::BTreeMap;

use crate::color;
use crate::data::model::DatasetStore;
use crate::selection::{DemographicCategory, SchoolSelection, SelectionError, YearRange};

use super::spec::{ChartData, ChartSpec, ChartStyle, HistogramBin, PieSlice};

/// Bin count for the GPA histogram.
const GPA_BINS: usize = 20;

// ---------------------------------------------------------------------------
// Selection-to-view functions, one per chart
// ---------------------------------------------------------------------------

/// Tuition rows whose year falls inside `range`, as a connected line.
///
/// Callers keep `lo <= hi`; a reversed range simply matches nothing. A range
/// outside the table's year domain yields an empty series, not a failure.
pub fn tuition_trend(store: &DatasetStore, range: YearRange) -> ChartSpec {
    // store.tuition is sorted ascending, so the line runs earliest → latest
    let points: Vec<[f64; 2]> = store
        .tuition
        .iter()
        .filter(|r| range.contains(r.year))
        .map(|r| [r.year as f64, r.tuition])
        .collect();

    ChartSpec {
        data: ChartData::Line { points },
        style: ChartStyle::axes("Tuition Trends", "Year", "Amount ($)"),
    }
}

/// Grade counts for one course, one bar per bucket in table column order.
pub fn course_grade_distribution(
    store: &DatasetStore,
    course_id: &str,
) -> Result<ChartSpec, SelectionError> {
    let row = store
        .class_grades
        .row(course_id)
        .ok_or_else(|| SelectionError::UnknownCourse(course_id.to_string()))?;

    Ok(ChartSpec {
        data: ChartData::Bars {
            categories: store.class_grades.buckets.clone(),
            values: row.counts.clone(),
        },
        style: ChartStyle::axes(
            format!("Grade Distribution per course: {course_id}"),
            "Grades",
            "Frequency",
        ),
    })
}

/// Histogram of per-course mean GPA, restricted to one school unless the
/// selection is `All`. A school code matching no rows yields an empty
/// histogram.
pub fn school_gpa_histogram(store: &DatasetStore, selection: &SchoolSelection) -> ChartSpec {
    let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for record in &store.school_gpa {
        if let SchoolSelection::Code(code) = selection {
            if record.school != *code {
                continue;
            }
        }
        let entry = sums.entry(record.course.as_str()).or_insert((0.0, 0));
        entry.0 += record.gpa;
        entry.1 += 1;
    }
    let means: Vec<f64> = sums.values().map(|&(sum, n)| sum / n as f64).collect();

    ChartSpec {
        data: ChartData::Histogram {
            bins: bin_values(&means, GPA_BINS),
        },
        style: ChartStyle::axes(
            format!("GPA Distribution per college: {}", selection.label()),
            "Grade Point Average",
            "Frequency",
        ),
    }
}

/// Donut of the selected demographic table with its category palette.
pub fn demographic_pie(store: &DatasetStore, category: DemographicCategory) -> ChartSpec {
    let slices: Vec<PieSlice> = store
        .demographic(category)
        .iter()
        .map(|r| PieSlice {
            label: r.label.clone(),
            value: r.count,
        })
        .collect();
    let palette = color::slice_palette(category, slices.len());

    ChartSpec {
        data: ChartData::Pie { slices },
        style: ChartStyle::pie("Demographics", palette),
    }
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width bins over `values`; empty input yields no bins, and a
/// degenerate value range collapses to a single bin.
fn bin_values(values: &[f64], n_bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lo: min,
            hi: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / n_bins as f64;
    let mut bins: Vec<HistogramBin> = (0..n_bins)
        .map(|i| HistogramBin {
            lo: min + i as f64 * width,
            hi: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for &v in values {
        // the max value lands in the last bin
        let idx = (((v - min) / width) as usize).min(n_bins - 1);
        bins[idx].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{
        ClassGradesTable, DemographicRow, GpaRecord, GradeRow, TuitionRecord,
    };

    fn demographic(rows: &[(&str, f64)]) -> Vec<DemographicRow> {
        rows.iter()
            .map(|&(label, count)| DemographicRow {
                label: label.to_string(),
                count,
            })
            .collect()
    }

    fn gpa(course: &str, school: &str, gpa: f64) -> GpaRecord {
        GpaRecord {
            course: course.to_string(),
            school: school.to_string(),
            gpa,
        }
    }

    fn sample_store() -> DatasetStore {
        DatasetStore {
            tuition: (1970..=2024)
                .map(|year| TuitionRecord {
                    year,
                    tuition: 405.0 + (year - 1970) as f64 * 300.0,
                })
                .collect(),
            class_grades: ClassGradesTable {
                buckets: ["A", "B", "C", "D", "F", "W"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                rows: vec![
                    GradeRow {
                        course: "CS 2100".to_string(),
                        counts: vec![2.0, 5.0, 10.0, 30.0, 20.0, 3.0],
                    },
                    GradeRow {
                        course: "MATH 1310".to_string(),
                        counts: vec![12.0, 9.0, 4.0, 2.0, 1.0, 0.0],
                    },
                ],
            },
            school_gpa: vec![
                gpa("CS 2100", "ENGR", 3.0),
                gpa("CS 2100", "ENGR", 3.4),
                gpa("SYS 2001", "ENGR", 3.8),
                gpa("CS 2100", "CGAS", 2.0),
                gpa("LAW 7001", "LAW", 3.9),
            ],
            genders: demographic(&[("Female", 11000.0), ("Male", 9000.0)]),
            generations: demographic(&[("First Generation", 3000.0), ("Continuing", 17000.0)]),
            loads: demographic(&[("Full-time", 18000.0), ("Part-time", 2000.0)]),
            races: demographic(&[
                ("White", 9000.0),
                ("Asian", 4000.0),
                ("Black or African American", 2000.0),
                ("Hispanic or Latino", 2000.0),
                ("Two or More Races", 1000.0),
                ("Unknown", 900.0),
                ("International", 800.0),
                ("American Indian", 300.0),
            ]),
            residencies: demographic(&[("In-State", 12000.0), ("Out-of-State", 8000.0)]),
            schools: demographic(&[
                ("College of Arts and Sciences", 9000.0),
                ("School of Engineering and Applied Sciences", 4000.0),
                ("McIntire School of Commerce", 1500.0),
                ("School of Law", 1100.0),
                ("Medical School", 1000.0),
                ("School of Data Science", 900.0),
                ("School of Nursing", 800.0),
                ("School of Architecture", 500.0),
                ("School of Education and Human Development", 1200.0),
            ]),
        }
    }

    fn line_points(spec: &ChartSpec) -> &[[f64; 2]] {
        match &spec.data {
            ChartData::Line { points } => points,
            other => panic!("expected a line, got {other:?}"),
        }
    }

    fn histogram_bins(spec: &ChartSpec) -> &[HistogramBin] {
        match &spec.data {
            ChartData::Histogram { bins } => bins,
            other => panic!("expected a histogram, got {other:?}"),
        }
    }

    // ---- tuition ----

    #[test]
    fn test_tuition_filter_is_inclusive_and_ascending() {
        let store = sample_store();
        let spec = tuition_trend(&store, YearRange::new(2000, 2010));
        let points = line_points(&spec);

        assert_eq!(points.len(), 11);
        assert_eq!(points[0][0], 2000.0);
        assert_eq!(points[10][0], 2010.0);
        assert!(points.windows(2).all(|w| w[0][0] < w[1][0]));
    }

    #[test]
    fn test_tuition_range_outside_domain_is_empty_not_an_error() {
        let store = sample_store();
        assert!(tuition_trend(&store, YearRange::new(2030, 2040)).is_empty());
        assert!(tuition_trend(&store, YearRange::new(1900, 1950)).is_empty());
    }

    #[test]
    fn test_tuition_points_carry_table_values() {
        let store = sample_store();
        let spec = tuition_trend(&store, YearRange::new(1970, 1970));
        assert_eq!(line_points(&spec), [[1970.0, 405.0]]);
    }

    // ---- class grades ----

    #[test]
    fn test_grade_distribution_matches_row_in_column_order() {
        let store = sample_store();
        let spec = course_grade_distribution(&store, "CS 2100").unwrap();
        match &spec.data {
            ChartData::Bars { categories, values } => {
                assert_eq!(categories, &["A", "B", "C", "D", "F", "W"]);
                assert_eq!(values, &[2.0, 5.0, 10.0, 30.0, 20.0, 3.0]);
            }
            other => panic!("expected bars, got {other:?}"),
        }
        assert!(spec.style.title.contains("CS 2100"));
    }

    #[test]
    fn test_unknown_course_is_a_named_failure() {
        let store = sample_store();
        let err = course_grade_distribution(&store, "CS 9999").unwrap_err();
        assert_eq!(err, SelectionError::UnknownCourse("CS 9999".to_string()));
    }

    // ---- school GPA ----

    #[test]
    fn test_all_schools_averages_per_course_across_schools() {
        let store = sample_store();
        let spec = school_gpa_histogram(&store, &SchoolSelection::All);
        let bins = histogram_bins(&spec);

        // three distinct courses → three means land in the bins:
        // CS 2100 (3.0+3.4+2.0)/3 = 2.8, SYS 2001 3.8, LAW 7001 3.9
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
        assert_eq!(bins.len(), 20);
        assert!(spec.style.title.ends_with("All"));
    }

    #[test]
    fn test_school_code_restricts_before_averaging() {
        let store = sample_store();
        let spec = school_gpa_histogram(&store, &SchoolSelection::Code("ENGR".to_string()));
        let bins = histogram_bins(&spec);

        // only the 3 ENGR rows count: CS 2100 mean 3.2, SYS 2001 mean 3.8
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);

        // the CGAS-only 2.0 GPA must not drag the binned range down
        assert!(bins.first().unwrap().lo >= 3.19);
    }

    #[test]
    fn test_unmatched_school_code_yields_empty_histogram() {
        let store = sample_store();
        let spec = school_gpa_histogram(&store, &SchoolSelection::Code("NONE".to_string()));
        assert!(histogram_bins(&spec).is_empty());
        assert!(spec.is_empty());
    }

    // ---- demographics ----

    #[test]
    fn test_residency_pie_is_exactly_the_residency_table() {
        let store = sample_store();
        let spec = demographic_pie(&store, DemographicCategory::Residency);
        match &spec.data {
            ChartData::Pie { slices } => {
                assert_eq!(slices.len(), 2);
                assert_eq!(slices[0].label, "In-State");
                assert_eq!(slices[0].value, 12000.0);
                assert_eq!(slices[1].label, "Out-of-State");
                assert_eq!(slices[1].value, 8000.0);
            }
            other => panic!("expected a pie, got {other:?}"),
        }
        assert_eq!(spec.style.palette.len(), 2);
    }

    #[test]
    fn test_every_category_selects_exactly_one_table() {
        let store = sample_store();
        let mut first_labels = Vec::new();
        for category in DemographicCategory::ALL {
            let spec = demographic_pie(&store, category);
            match &spec.data {
                ChartData::Pie { slices } => {
                    assert_eq!(spec.style.palette.len(), slices.len());
                    first_labels.push(slices[0].label.clone());
                }
                other => panic!("expected a pie, got {other:?}"),
            }
        }
        // six categories, six distinct tables
        first_labels.sort();
        first_labels.dedup();
        assert_eq!(first_labels.len(), 6);
    }

    #[test]
    fn test_slice_values_sum_to_the_table_total() {
        let store = sample_store();
        let spec = demographic_pie(&store, DemographicCategory::SchoolCollege);
        match &spec.data {
            ChartData::Pie { slices } => {
                let sum: f64 = slices.iter().map(|s| s.value).sum();
                let expected: f64 = store.schools.iter().map(|r| r.count).sum();
                assert!((sum - expected).abs() < 1e-9);
            }
            other => panic!("expected a pie, got {other:?}"),
        }
    }

    // ---- binning ----

    #[test]
    fn test_bin_edges_cover_the_value_range() {
        let bins = bin_values(&[1.0, 2.0, 3.0, 4.0], 4);
        assert_eq!(bins.len(), 4);
        assert_eq!(bins[0].lo, 1.0);
        assert!((bins[3].hi - 4.0).abs() < 1e-9);
        // the max value belongs to the last bin, not a phantom fifth
        assert_eq!(bins[3].count, 1);
        let total: usize = bins.iter().map(|b| b.count).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn test_identical_values_collapse_to_one_bin() {
        let bins = bin_values(&[3.5, 3.5, 3.5], 20);
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].count, 3);
    }

    #[test]
    fn test_no_values_no_bins() {
        assert!(bin_values(&[], 20).is_empty());
    }
}
