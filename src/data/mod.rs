/// Data layer: discovery, loading, stacking and reductions.
///
/// Architecture:
/// ```text
///  folder + "stats*.txt"
///        │
///        ▼
///   ┌──────────┐
///   │ discover  │  wildcard match → sorted paths
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  delimited text → RunFile (iterations × outputs)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ AggregatedSeries │  output × iteration × replication
///   └─────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  envelope / replication mean / moving average
///   └──────────┘
/// ```

pub mod discover;
pub mod loader;
pub mod model;
pub mod stats;
