//! Theme core for Card Studio
//!
//! This crate provides the theme data model, the style fragment editor,
//! the global color cascade, and the built-in template catalog.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod background;
pub mod cascade;
pub mod catalog;
pub mod edit;
pub mod fragment;
pub mod model;
pub mod section;
pub mod value;
