//! Tests for boundary logging

#[cfg(test)]
mod capture;
