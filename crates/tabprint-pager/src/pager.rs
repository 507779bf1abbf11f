//! Pager selection and the decision of when to page.
//!
//! [`Pager`] resolves the command to run and [`should_page`] decides whether
//! a rendered table is tall or wide enough to need one. Output that is not
//! paged, or whose pager fails, is written directly.

use std::borrow::Cow;
use std::io::{self, Write};

use tabprint_render::{strip_ansi, visible_width, TerminalInfo, TOP_LEFT};
use tracing::{debug, warn};

use crate::shell::run_pager;

/// Pager used when neither an explicit command nor `$PAGER` is set.
pub const DEFAULT_PAGER: &str = "less -RS";

/// Environment variable naming the pager command.
pub const PAGER_ENV: &str = "PAGER";

/// Sends rendered tables through a pager.
///
/// # Example
///
/// ```rust,no_run
/// use tabprint_pager::Pager;
///
/// Pager::new().page("┌─┐\n│x│\n└─┘").unwrap();
/// ```
#[derive(Clone, Debug, Default)]
pub struct Pager {
    command: Option<String>,
    terminal: Option<TerminalInfo>,
}

impl Pager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this command instead of `$PAGER`.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    /// Use this terminal instead of probing stdout.
    pub fn terminal(mut self, terminal: TerminalInfo) -> Self {
        self.terminal = Some(terminal);
        self
    }

    /// The explicit command, else `$PAGER`, else [`DEFAULT_PAGER`].
    pub fn resolved_command(&self) -> String {
        self.command
            .clone()
            .or_else(|| {
                std::env::var(PAGER_ENV)
                    .ok()
                    .filter(|cmd| !cmd.trim().is_empty())
            })
            .unwrap_or_else(|| DEFAULT_PAGER.to_string())
    }

    /// Write `content` to stdout, through the pager when it helps.
    ///
    /// The only error returned is a failure of the direct write itself.
    pub fn page(&self, content: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        self.page_with(content, &mut handle)
    }

    /// Page `content`, writing to `out` whenever the pager is skipped or fails.
    ///
    /// A pager the user quits early counts as success and nothing is written.
    fn page_with<W: Write>(&self, content: &str, out: &mut W) -> io::Result<()> {
        let content = with_trailing_newline(content);
        let terminal = self.terminal.unwrap_or_else(TerminalInfo::stdout);

        if should_page(&content, &terminal) {
            let command = self.resolved_command();
            match run_pager(&command, &content) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_broken_pipe() => {
                    debug!(command = %command, "pager closed early");
                    return Ok(());
                }
                Err(e) => warn!(error = %e, "pager failed, writing output directly"),
            }
        }

        out.write_all(content.as_bytes())?;
        out.flush()
    }

    /// Write `content` to a stream other than stdout. Never pages.
    pub fn page_to<W: Write>(&self, content: &str, out: &mut W) -> io::Result<()> {
        out.write_all(with_trailing_newline(content).as_bytes())
    }
}

fn with_trailing_newline(content: &str) -> Cow<'_, str> {
    if content.ends_with('\n') {
        Cow::Borrowed(content)
    } else {
        Cow::Owned(format!("{}\n", content))
    }
}

/// Whether `content` is worth paging on `terminal`.
///
/// Only rendered tables are paged, only on an interactive terminal, and only
/// when they would not fit on one screen.
pub fn should_page(content: &str, terminal: &TerminalInfo) -> bool {
    if !terminal.interactive {
        debug!("not paging: output is not a terminal");
        return false;
    }
    if !strip_ansi(content).starts_with(TOP_LEFT) {
        debug!("not paging: content is not a table");
        return false;
    }

    let lines: Vec<&str> = content.lines().collect();
    let content_rows = lines.len();
    let (columns, rows) = terminal.size_or_default();

    let raw_columns = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    if rows > content_rows && columns > raw_columns {
        debug!("not paging: content fits the terminal");
        return false;
    }

    let visible_columns = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    if rows > content_rows && columns > visible_columns {
        debug!("not paging: visible content fits the terminal");
        return false;
    }

    true
}
