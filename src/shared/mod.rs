//! Gemeinsame Laufzeit-Konfiguration.

pub mod options;

pub use options::{GeneratorOptions, DEFAULT_PLACEHOLDER_TOKEN};
