pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod docs;
pub mod domain;
pub mod error;
pub mod lockfile;
pub mod manifest;
pub mod readme;
pub mod ui;

pub use error::{ReleaseError, Result};
