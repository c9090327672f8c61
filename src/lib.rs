//! tupledesc - Tuple schema descriptors for a row-oriented data engine
//!
//! A [`schema::TupleDesc`] describes the ordered, typed, optionally-named
//! fields of a fixed-width tuple. Descriptors are immutable values and are
//! meant to be shared across every tuple and operator that uses them.

#![allow(clippy::len_without_is_empty)]

pub mod observability;
pub mod schema;
