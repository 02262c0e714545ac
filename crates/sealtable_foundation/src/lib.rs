//! Core types for Sealtable.
//!
//! This crate provides:
//! - [`RowId`], [`TableId`], [`RowAddr`] - Row and table identity
//! - [`Ref`] and [`OptRef`] - Typed, index-based references between rows
//! - [`IndexKey`] - Total orders over indexable column values
//! - [`Error`] - Rich error types with context
//! - [`BuildConfig`] - Construction-time options

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod id;
pub mod key;

pub use config::{BuildConfig, Validation};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use id::{OptRef, Ref, RowAddr, RowId, TableId};
pub use key::{IndexKey, compare_scalars};
