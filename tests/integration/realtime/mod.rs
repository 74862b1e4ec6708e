//! Notification gateway integration tests

mod gateway_test;
