use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Subjects and the school code each one belongs to.
const SUBJECTS: [(&str, &str); 16] = [
    ("CS", "ENGR"),
    ("SYS", "ENGR"),
    ("MATH", "CGAS"),
    ("PHYS", "CGAS"),
    ("HIST", "CGAS"),
    ("ECON", "CGAS"),
    ("ARCH", "ARCH"),
    ("COMM", "COMM"),
    ("SCPS", "SCPS"),
    ("LAW", "LAW"),
    ("LPPP", "LEAD"),
    ("PROV", "PROV"),
    ("MED", "MDS"),
    ("DS", "DSCI"),
    ("EDIS", "EDUC"),
    ("GBUS", "MCDG"),
];

const COURSE_LEVELS: [u32; 4] = [1010, 2100, 3120, 4200];

const GRADE_BUCKETS: [&str; 6] = ["A", "B", "C", "D", "F", "W"];
const GRADE_WEIGHTS: [f64; 6] = [0.32, 0.28, 0.18, 0.08, 0.06, 0.08];

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let mut rng = SimpleRng::new(42);
    let courses: Vec<(String, &str)> = SUBJECTS
        .iter()
        .flat_map(|&(subject, school)| {
            COURSE_LEVELS
                .iter()
                .map(move |level| (format!("{subject} {level}"), school))
        })
        .collect();

    write_tuition(&out_dir, &mut rng)?;
    write_class_grades(&out_dir, &courses, &mut rng)?;
    write_course_gpa(&out_dir, &courses, &mut rng)?;
    write_demographics(&out_dir, &mut rng)?;

    println!("wrote sample dataset to {}", out_dir.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// In-state tuition from 1970 on, compounding with a little noise.
fn write_tuition(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let mut wtr = csv::Writer::from_path(dir.join("tuition.csv")).context("tuition.csv")?;
    wtr.write_record(["Year", "Tuition"])?;

    let mut tuition = 405.0;
    for year in 1970..=2024 {
        wtr.write_record([year.to_string(), format!("{tuition:.2}")])?;
        tuition *= 1.068 + rng.gauss(0.0, 0.012);
    }
    wtr.flush()?;
    Ok(())
}

fn write_class_grades(dir: &Path, courses: &[(String, &str)], rng: &mut SimpleRng) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(dir.join("class_grades.csv")).context("class_grades.csv")?;

    let mut header = vec!["Course Number".to_string()];
    header.extend(GRADE_BUCKETS.iter().map(|b| b.to_string()));
    wtr.write_record(&header)?;

    for (course, _) in courses {
        let enrolled = 40.0 + rng.next_f64() * 160.0;
        let mut record = vec![course.clone()];
        for weight in GRADE_WEIGHTS {
            let jitter = 1.0 + rng.gauss(0.0, 0.25);
            let count = (enrolled * weight * jitter).round().max(0.0) as u32;
            record.push(count.to_string());
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The GPA table goes out as Parquet so both loader paths stay exercised.
fn write_course_gpa(dir: &Path, courses: &[(String, &str)], rng: &mut SimpleRng) -> Result<()> {
    let mut course_col: Vec<String> = Vec::new();
    let mut school_col: Vec<String> = Vec::new();
    let mut gpa_col: Vec<f64> = Vec::new();

    for (course, school) in courses {
        let sections = 1 + (rng.next_u64() % 3) as usize;
        for _ in 0..sections {
            course_col.push(course.clone());
            school_col.push(school.to_string());
            gpa_col.push(rng.gauss(3.1, 0.35).clamp(1.8, 4.0));
        }
    }

    let schema = Arc::new(Schema::new(vec![
        Field::new("Course Number", DataType::Utf8, false),
        Field::new("Class Academic Group", DataType::Utf8, false),
        Field::new("Course GPA", DataType::Float64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(course_col)),
            Arc::new(StringArray::from(school_col)),
            Arc::new(Float64Array::from(gpa_col)),
        ],
    )
    .context("building GPA record batch")?;

    let file = std::fs::File::create(dir.join("course_gpa.parquet")).context("course_gpa.parquet")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("opening parquet writer")?;
    writer.write(&batch).context("writing parquet")?;
    writer.close().context("closing parquet")?;
    Ok(())
}

fn write_demographics(dir: &Path, rng: &mut SimpleRng) -> Result<()> {
    let tables: [(&str, &str, &[(&str, u32)]); 6] = [
        ("genders", "Gender", &[("Female", 11250), ("Male", 9180)]),
        (
            "generations",
            "Generation",
            &[("First Generation", 3120), ("Continuing Generation", 17310)],
        ),
        (
            "loads",
            "Academic Load",
            &[("Full-time", 18460), ("Part-time", 1970)],
        ),
        (
            "races",
            "Race/Ethnicity",
            &[
                ("White", 9120),
                ("Asian", 3940),
                ("Black or African American", 1710),
                ("Hispanic or Latino", 1860),
                ("Two or More Races", 1080),
                ("Unknown", 940),
                ("International", 1530),
                ("American Indian", 250),
            ],
        ),
        (
            "residencies",
            "Residency",
            &[("In-State", 12480), ("Out-of-State", 7950)],
        ),
        (
            "schools",
            "School",
            &[
                ("College of Arts and Sciences", 8930),
                ("School of Engineering and Applied Sciences", 4110),
                ("McIntire School of Commerce", 1480),
                ("School of Law", 1150),
                ("Medical School", 1020),
                ("School of Data Science", 870),
                ("School of Nursing", 790),
                ("School of Architecture", 540),
                ("School of Education and Human Development", 1540),
            ],
        ),
    ];

    for (stem, label_header, rows) in tables {
        let mut wtr =
            csv::Writer::from_path(dir.join(format!("{stem}.csv"))).with_context(|| {
                format!("{stem}.csv")
            })?;
        wtr.write_record([label_header, "Count"])?;
        for &(label, base) in rows {
            let count = base + (rng.next_u64() % 200) as u32;
            wtr.write_record([label.to_string(), count.to_string()])?;
        }
        wtr.flush()?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// SimpleRng – minimal deterministic PRNG (xoshiro256**)
// ---------------------------------------------------------------------------

struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}
