//! Runtime value model for Verity

pub mod value;

pub use value::{format_number, Value, UNDEFINED};
