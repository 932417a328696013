mod conformance;

mod blueprint_tests;
mod user_tests;
