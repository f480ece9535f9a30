//! The columnar sink: bronze tables persisted as parquet files.

pub mod columnar;
pub mod error;
