//! View-model state shared by the form panels.

mod status;

pub use status::{StatusLevel, StatusMessage};
