use eframe::egui::{self, Color32, ComboBox, RichText, Slider, Ui};

use crate::chart::spec::ChartSpec;
use crate::selection::{DemographicCategory, SchoolSelection, YearRange};
use crate::state::AppState;
use crate::ui::plot;

/// School dropdown entries: display label plus the code stored in the GPA
/// table's Class Academic Group column.
const SCHOOL_OPTIONS: [(&str, &str); 13] = [
    ("School of Engineering and Applied Sciences", "ENGR"),
    ("College of Arts and Sciences", "CGAS"),
    ("School of Architecture", "ARCH"),
    ("McIntire School of Commerce", "COMM"),
    ("School of Continuing and Professional Studies", "SCPS"),
    ("School of Law", "LAW"),
    ("Frank Batten School of Leadership and Public Policy", "LEAD"),
    ("Executive VP and Provost", "PROV"),
    ("Medical School", "MDS"),
    ("School of Data Science", "DSCI"),
    ("School of Education and Human Development", "EDUC"),
    ("McIntire Darden Grad Business", "MCDG"),
    ("School of Nursing", "NURS"),
];

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / status bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(RichText::new("Campus Data Dashboard").strong());
        ui.separator();

        ui.menu_button("Export", |ui: &mut Ui| {
            let mut export: Option<(ChartSpec, &str)> = None;
            if ui.button("Tuition trends…").clicked() {
                export = Some((state.tuition_chart.clone(), "tuition_trends"));
            }
            if let Some(spec) = &state.grade_chart {
                if ui.button("Grade distribution…").clicked() {
                    export = Some((spec.clone(), "grade_distribution"));
                }
            }
            if ui.button("GPA histogram…").clicked() {
                export = Some((state.gpa_chart.clone(), "gpa_histogram"));
            }
            if ui.button("Demographics…").clicked() {
                export = Some((state.demographic_chart.clone(), "demographics"));
            }
            if let Some((spec, stem)) = export {
                export_spec(state, &spec, stem);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(format!(
            "{} tuition years · {} courses · {} GPA rows",
            state.store.tuition.len(),
            state.store.class_grades.rows.len(),
            state.store.school_gpa.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

/// Write a chart spec as pretty-printed JSON wherever the user points the
/// save dialog.
fn export_spec(state: &mut AppState, spec: &ChartSpec, stem: &str) {
    let file = rfd::FileDialog::new()
        .set_title("Export chart spec")
        .set_file_name(format!("{stem}.json"))
        .add_filter("JSON", &["json"])
        .save_file();

    let Some(path) = file else {
        return;
    };

    let result = serde_json::to_string_pretty(spec)
        .map_err(anyhow::Error::from)
        .and_then(|text| std::fs::write(&path, text).map_err(anyhow::Error::from));

    match result {
        Ok(()) => {
            log::info!("exported chart spec to {}", path.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("failed to export chart spec: {e:#}");
            state.status_message = Some(format!("Export failed: {e:#}"));
        }
    }
}

// ---------------------------------------------------------------------------
// Chart sections – chart above, control below, like the source dashboard
// ---------------------------------------------------------------------------

pub fn tuition_section(ui: &mut Ui, state: &mut AppState) {
    plot::chart(ui, &state.tuition_chart);

    let (min_year, max_year) = state.store.year_domain().unwrap_or((1970, 2024));
    let mut lo = state.tuition_range.lo;
    let mut hi = state.tuition_range.hi;

    ui.horizontal(|ui: &mut Ui| {
        ui.label("From");
        let lo_changed = ui.add(Slider::new(&mut lo, min_year..=max_year)).changed();
        ui.label("To");
        let hi_changed = ui.add(Slider::new(&mut hi, min_year..=max_year)).changed();

        if lo_changed || hi_changed {
            // keep the pair ordered; the moved end pushes the other
            if lo_changed {
                hi = hi.max(lo);
            } else {
                lo = lo.min(hi);
            }
            state.set_tuition_range(YearRange::new(lo, hi));
        }
    });
}

pub fn grade_section(ui: &mut Ui, state: &mut AppState) {
    match &state.grade_chart {
        Some(spec) => plot::chart(ui, spec),
        None => {
            ui.label("The class grades table is empty.");
            return;
        }
    }

    let current = state.course.clone().unwrap_or_default();
    let courses: Vec<String> = state
        .store
        .class_grades
        .course_numbers()
        .map(str::to_string)
        .collect();

    let mut picked: Option<String> = None;
    ComboBox::from_label("Course")
        .selected_text(&current)
        .show_ui(ui, |ui: &mut Ui| {
            for course in &courses {
                if ui.selectable_label(current == *course, course).clicked() {
                    picked = Some(course.clone());
                }
            }
        });

    if let Some(course) = picked {
        if state.course.as_ref() != Some(&course) {
            state.set_course(course);
        }
    }
}

pub fn gpa_section(ui: &mut Ui, state: &mut AppState) {
    plot::chart(ui, &state.gpa_chart);

    let mut picked: Option<SchoolSelection> = None;
    ComboBox::from_label("School")
        .selected_text(school_label(&state.school))
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(state.school == SchoolSelection::All, "All")
                .clicked()
            {
                picked = Some(SchoolSelection::All);
            }
            for (label, code) in SCHOOL_OPTIONS {
                let selected =
                    matches!(&state.school, SchoolSelection::Code(c) if c.as_str() == code);
                if ui.selectable_label(selected, label).clicked() {
                    picked = Some(SchoolSelection::Code(code.to_string()));
                }
            }
        });

    if let Some(selection) = picked {
        if selection != state.school {
            state.set_school(selection);
        }
    }
}

pub fn demographic_section(ui: &mut Ui, state: &mut AppState) {
    let mut category = state.category;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for option in DemographicCategory::ALL {
            ui.radio_value(&mut category, option, option.label());
        }
    });
    if category != state.category {
        state.set_category(category);
    }

    plot::chart(ui, &state.demographic_chart);
}

fn school_label(selection: &SchoolSelection) -> String {
    match selection {
        SchoolSelection::All => "All".to_string(),
        SchoolSelection::Code(code) => SCHOOL_OPTIONS
            .iter()
            .find(|(_, c)| *c == code.as_str())
            .map(|(label, _)| label.to_string())
            .unwrap_or_else(|| code.clone()),
    }
}
