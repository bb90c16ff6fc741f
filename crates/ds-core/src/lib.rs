//! Core types, errors, and configuration for the design system scanner.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - The read-only host document model ([`SceneNode`], [`Page`], [`Document`])
//! - Paint, style, and variable definitions as the host exposes them
//! - The scan output schema ([`ComponentRecord`], [`ScanSession`])
//! - Error types ([`ConfigError`], [`HostError`])
//! - Configuration structures ([`ScannerConfig`], [`HeuristicThresholds`])
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod types;

pub use config::{HeuristicThresholds, SESSION_VERSION, ScannerConfig};
pub use error::{ConfigError, HostError};
pub use hash::{FxHashMap, FxHashSet, fx_hash_map, fx_hash_set};
pub use types::*;
