//! Integration test suite.
//!
//! 1. End-to-end parse → reconcile → emit
//! 2. Script files and post-load validation

pub mod end_to_end_tests;
pub mod helpers;
pub mod script_file_tests;
