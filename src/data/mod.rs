/// Data layer: core types, loading, and export.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .txt / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  detect header → coerce → drop bad rows → NumericTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │    Signal     │  (x, y) selected by column index
///   └──────────────┘
///        │  normalize::engine
///        ▼
///   ┌──────────┐
///   │  export   │  one CSV per normalized input
///   └──────────┘
/// ```

pub mod export;
pub mod loader;
pub mod model;
