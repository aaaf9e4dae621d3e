//! Document parsing utilities
//!
//! This module contains specialized parsing functions for different
//! document elements and features.

pub(crate) mod formatting;
pub mod heading;
pub(crate) mod styles;
pub(crate) mod table;
