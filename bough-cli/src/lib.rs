//! # Bough CLI Library
//!
//! Command definitions and handlers for the `bough` branch picker.

pub mod cli;
