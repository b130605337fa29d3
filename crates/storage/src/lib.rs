//! Storage layer for Card Studio
//!
//! This crate provides the settings persistence boundary, a versioned JSON
//! file backend, and the settings schema with its load merge.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod persistence;
pub mod settings;
