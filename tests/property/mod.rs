//! Property-based tests

mod event_proptest;
#[cfg(feature = "ssr")]
mod registry_proptest;
