//! Output plumbing shared by the commands
//!
//! Commands write to a `Box<dyn Write>`. On an interactive terminal that writer
//! feeds the minus pager, otherwise it is plain stdout.

use derive_new::new;
use is_terminal::IsTerminal;
use minus::Pager;
use std::io::{self, Write};

/// Environment variable that disables paging when set.
pub const NO_PAGER: &str = "NO_PAGER";

/// Wrapper that implements `Write` for the minus pager
///
/// Bytes are forwarded as text. A multi-byte character split across two writes
/// is held back until its remaining bytes arrive.
#[derive(new)]
pub struct PagerWriter {
    pager: Pager,
    #[new(default)]
    pending: Vec<u8>,
}

impl PagerWriter {
    pub fn pager(&self) -> &Pager {
        &self.pager
    }
}

impl Write for PagerWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);

        let valid_up_to = match std::str::from_utf8(&self.pending) {
            Ok(text) => text.len(),
            Err(e) if e.error_len().is_none() => e.valid_up_to(),
            Err(e) => {
                self.pending.clear();
                return Err(io::Error::new(io::ErrorKind::InvalidData, e));
            }
        };

        let rest = self.pending.split_off(valid_up_to);
        let text = String::from_utf8(std::mem::replace(&mut self.pending, rest))
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.pager.push_str(text.as_str()).map_err(io::Error::other)?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where command output ends up.
pub enum Output {
    Stdout,
    Pager(Pager),
}

impl Output {
    /// Page when stdout is a terminal and paging was not disabled through [`NO_PAGER`].
    pub fn detect() -> Self {
        if io::stdout().is_terminal() && std::env::var_os(NO_PAGER).is_none() {
            Output::Pager(Pager::new())
        } else {
            Output::Stdout
        }
    }

    pub fn writer(&self) -> Box<dyn Write> {
        match self {
            Output::Stdout => Box::new(io::stdout()),
            Output::Pager(pager) => Box::new(PagerWriter::new(pager.clone())),
        }
    }

    /// Hand the collected output to the pager, if any.
    pub fn finish(self) -> anyhow::Result<()> {
        if let Output::Pager(pager) = self {
            minus::page_all(pager)?;
        }
        Ok(())
    }
}
