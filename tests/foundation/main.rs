//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: RowId, Ref, IndexKey ordering, Error, and BuildConfig.

mod config;
mod identity;
mod keys;
mod reporting;
