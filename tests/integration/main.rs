//! End-to-end scenarios against a running server

mod api_tests;
