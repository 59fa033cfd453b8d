/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  trim headers, coerce cells, normalize text → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, present columns, distinct filter values
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  category / device / traffic predicates → View
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
