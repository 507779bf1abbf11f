//! Page rendered tables through an external pager.
//!
//! [`Pager::page`] sends content to `$PAGER` (default `less -RS`) when it is
//! a table that would not fit the terminal, and writes it directly otherwise.
//! Pager failures never lose output: anything other than the user quitting
//! the pager early falls back to a direct write.

pub mod pager;
pub mod shell;

pub use pager::{should_page, Pager, DEFAULT_PAGER, PAGER_ENV};
pub use shell::{run_pager, PagerError};
