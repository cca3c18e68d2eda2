//! Unit tests for the property service

mod service_tests;
