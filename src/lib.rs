//! Catalog console runtime
//!
//! Bootstrap and command-line front end for the catalog wizards.

pub mod bootstrap;
pub mod cli;
