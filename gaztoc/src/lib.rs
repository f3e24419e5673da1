//! Command line front end of gaztoc.
//!
//! Exposed as a library so the argument definition can be reused by the
//! xtask (completions, manpage) and exercised from tests.
pub mod cli;
pub mod report;
