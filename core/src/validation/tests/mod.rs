//! Tests for request validation

#[cfg(test)]
mod spatial_id_tests;
