//! Test suite for the social media API
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
pub mod property;
