//! API integration tests
//!
//! Integration tests for all API endpoints

mod social_test;
