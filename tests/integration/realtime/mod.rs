//! Realtime integration tests

mod hub_test;
