//! Property-based tests

mod locality_proptest;
mod store_proptest;
