//! # Domain Layer
//!
//! Vehicle records, the transient enrichment values attached to them, and
//! the validation rules they enforce. No I/O happens here.

pub mod entities;
pub mod errors;
pub mod value_objects;
