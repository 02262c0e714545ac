//! Integration tests for Layer 1: Storage
//!
//! Tests for tables, sorted indices, lazy indices, and row sequences.

mod tables;
mod unicode;
