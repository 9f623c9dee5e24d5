//! Integration tests for Sitelens
//!
//! These tests use wiremock to stand in for target sites and relay services
//! and exercise retrieval, single-page analysis and sitewide runs end-to-end.

mod retrieval_tests;
mod sitewide_tests;
