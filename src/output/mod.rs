//! Output formatting for sets.
//!
//! This module handles printing a set's header and members:
//! - [`terminal`] - Plain text listing, one address per line

mod terminal;

pub use terminal::{print_header, print_members, print_set};
