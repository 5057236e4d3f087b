// Integration tests module

pub mod registry_validation_tests;
