pub mod aggregator;
pub mod companion;
pub mod music;
pub mod report;
pub mod tips;
