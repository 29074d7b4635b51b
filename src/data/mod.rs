/// Data layer: table types and loading.
///
/// Architecture:
/// ```text
///  data/*.csv | *.parquet | *.json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse each file → typed table
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ DatasetStore  │  nine read-only tables
///   └──────────────┘
///        │
///        ▼
///   chart::views   (selection + store → ChartSpec)
/// ```
pub mod loader;
pub mod model;
