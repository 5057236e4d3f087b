// Unit tests module

pub mod inline_key_tests;
pub mod reference_tests;
