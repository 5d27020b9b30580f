//! Flat per-player statistics extract adapters.

pub mod csv;

pub use self::csv::CsvExtract;
