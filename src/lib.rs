// Library exports for dashgrid

pub mod error;
pub mod table;
pub mod series;
pub mod chart;
pub mod dashboard;
pub mod ingest;
