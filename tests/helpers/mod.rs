// ABOUTME: Test helper module exports for integration tests
// ABOUTME: Houses the axum request/response test harness

pub mod axum_test;
