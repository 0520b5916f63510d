use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use util::StrExt;

use crate::HISTORY_LIMIT;

const PREFIX: &str = "> ";
const INDENT: &str = "  ";

/// Scrolling message window.
///
/// Messages are kept in chronological order. When more unread text comes
/// in than fits in the window, the box pages through it one screen at a
/// time and the reader must scroll forward to see the rest.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(try_from = "InfoBoxData", rename_all = "kebab-case")]
pub struct InfoBox {
    width: usize,
    height: usize,
    lines: Vec<String>,
    /// Index of first line the reader hasn't seen yet.
    unread: usize,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct InfoBoxData {
    width: usize,
    height: usize,
    lines: Vec<String>,
    unread: usize,
}

impl TryFrom<InfoBoxData> for InfoBox {
    type Error = anyhow::Error;

    fn try_from(data: InfoBoxData) -> Result<Self> {
        if data.width <= PREFIX.len() || data.height < 2 {
            bail!("infobox size {}x{} is too small", data.width, data.height);
        }
        if data.unread > data.lines.len() {
            bail!(
                "infobox read mark {} is past its {} lines",
                data.unread,
                data.lines.len()
            );
        }
        Ok(InfoBox {
            width: data.width,
            height: data.height,
            lines: data.lines,
            unread: data.unread,
        })
    }
}

/// What the infobox currently shows.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Page<'a> {
    pub lines: &'a [String],
    /// There is more unread text after these lines.
    pub more: bool,
}

impl Default for InfoBox {
    fn default() -> Self {
        InfoBox::new(crate::INFOBOX_WIDTH, crate::INFOBOX_HEIGHT)
    }
}

impl InfoBox {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > PREFIX.len(), "InfoBox::new: too narrow");
        assert!(height >= 2, "InfoBox::new: too short");
        InfoBox {
            width,
            height,
            lines: Vec::new(),
            unread: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Add a message, word-wrapped to the box width.
    pub fn write(&mut self, text: &str) {
        let len = self.lines.len();
        let width = self.width - PREFIX.len();
        for (i, line) in text.lines_of(width).enumerate() {
            let lead = if i == 0 { PREFIX } else { INDENT };
            self.lines.push(format!("{lead}{line}"));
        }
        if self.lines.len() == len {
            self.lines.push(PREFIX.trim_end().to_owned());
        }

        if self.lines.len() > HISTORY_LIMIT {
            let excess = self.lines.len() - HISTORY_LIMIT;
            self.lines.drain(..excess);
            self.unread = self.unread.saturating_sub(excess);
        }
    }

    /// There is more unread text than fits on screen at once.
    pub fn is_paging(&self) -> bool {
        self.lines.len() - self.unread > self.height
    }

    pub fn page(&self) -> Page<'_> {
        if self.is_paging() {
            // Leave room for the more prompt.
            Page {
                lines: &self.lines[self.unread..self.unread + self.height - 1],
                more: true,
            }
        } else {
            let start = self.lines.len().saturating_sub(self.height);
            Page {
                lines: &self.lines[start..],
                more: false,
            }
        }
    }

    /// Move to the next page of unread text. Return whether there was a
    /// page to move to.
    ///
    /// When not paging, marks everything written so far as read.
    pub fn scroll(&mut self) -> bool {
        if self.is_paging() {
            self.unread += self.height - 1;
            true
        } else {
            self.unread = self.lines.len();
            false
        }
    }

    /// All remembered lines, oldest first.
    pub fn history(&self) -> &[String] {
        &self.lines
    }
}
