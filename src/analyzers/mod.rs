pub mod dataset_analyzer;

pub use dataset_analyzer::{describe_city, DatasetAnalyzer, DatasetStatistics, GeographicBounds};
