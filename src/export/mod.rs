pub mod error;
pub mod result_table;
pub mod writer;
