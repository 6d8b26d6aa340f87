//! Library components of the Seek demo shell.

pub mod demo;
pub mod logging;
pub mod settings;
pub mod tour;
