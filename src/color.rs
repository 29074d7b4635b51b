use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::selection::DemographicCategory;

// ---------------------------------------------------------------------------
// Dashboard colors
// ---------------------------------------------------------------------------

/// Primary series and chart-text color.
pub const ACCENT: &str = "#f84c1e";
/// Background behind the axis charts.
pub const CHART_BG: &str = "#222b4c";
/// Background behind the demographics donut.
pub const PIE_BG: &str = "#1c1c1b";

/// Two-tone palette for the binary categories.
const BINARY: [&str; 2] = ["#222b4c", "#f84c1e"];
/// Eight levels for race/ethnicity.
const RACE: [&str; 8] = [
    "#a9a9a9", "#232d4b", "#c9cbd2", "#e57200", "#d3d3d3", "#f9dcbe", "#222b4c", "#f84c1e",
];
/// Nine levels for school/college.
const SCHOOL: [&str; 9] = [
    "#a9a9a9", "#232d4b", "#c9cbd2", "#e57200", "#d3d3d3", "#f9dcbe", "#222b4c", "#f84c1e",
    "#808080",
];

/// The fixed palette assigned to a demographic category.
pub fn demographic_palette(category: DemographicCategory) -> &'static [&'static str] {
    use DemographicCategory::*;
    match category {
        Genders | FirstGeneration | AcademicLoad | Residency => &BINARY,
        RaceEthnicity => &RACE,
        SchoolCollege => &SCHOOL,
    }
}

/// Palette sized for `n` slices: the category's fixed colors, extended with
/// generated hues if the table has more rows than the palette.
pub fn slice_palette(category: DemographicCategory, n: usize) -> Vec<String> {
    let fixed = demographic_palette(category);
    let mut out: Vec<String> = fixed.iter().take(n).map(|s| s.to_string()).collect();
    if n > fixed.len() {
        out.extend(generate_palette(n - fixed.len()));
    }
    out
}

/// Generates `n` visually distinct hex colors using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            format!(
                "#{:02x}{:02x}{:02x}",
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8
            )
        })
        .collect()
}

/// Hex string → egui color; anything unparsable comes out gray.
pub fn color32(hex: &str) -> Color32 {
    Color32::from_hex(hex).unwrap_or(Color32::GRAY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_categories_get_two_colors() {
        for category in [
            DemographicCategory::Genders,
            DemographicCategory::FirstGeneration,
            DemographicCategory::AcademicLoad,
            DemographicCategory::Residency,
        ] {
            assert_eq!(demographic_palette(category).len(), 2);
        }
        assert_eq!(demographic_palette(DemographicCategory::RaceEthnicity).len(), 8);
        assert_eq!(demographic_palette(DemographicCategory::SchoolCollege).len(), 9);
    }

    #[test]
    fn test_slice_palette_matches_slice_count() {
        let two = slice_palette(DemographicCategory::Residency, 2);
        assert_eq!(two, ["#222b4c", "#f84c1e"]);

        // more rows than fixed colors → generated hues fill the gap
        let twelve = slice_palette(DemographicCategory::SchoolCollege, 12);
        assert_eq!(twelve.len(), 12);
        assert_eq!(twelve[..9], slice_palette(DemographicCategory::SchoolCollege, 9)[..]);
    }

    #[test]
    fn test_generated_hues_are_well_formed() {
        let palette = generate_palette(5);
        assert_eq!(palette.len(), 5);
        for hex in &palette {
            assert_eq!(hex.len(), 7);
            assert!(hex.starts_with('#'));
        }
    }
}
