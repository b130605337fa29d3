//! Application state for Card Studio
//!
//! This crate provides the settings manager (theme repository, font catalog,
//! change events, and batch transactions) and the theme editor controller.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod editor;
pub mod events;
pub mod manager;
