//! Integration tests for Layer 2: Engine
//!
//! Tests for relationships, partners, junctions, hierarchies, variant
//! columns, and labels.

mod junctions;
