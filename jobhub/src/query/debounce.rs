//! Search input debouncing.
//!
//! Keystrokes go into a [`SearchInput`]; [`SearchTerms::next`] yields a term only after the input
//! has been quiet for the configured period, and never yields the same trimmed term twice in a
//! row. Terms superseded within the quiet period are dropped.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::trace;

pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Creates a connected input/output pair. `initial` is the term already in effect, so re-typing
/// it does not trigger a query.
pub fn debounced_search(quiet: Duration, initial: impl Into<String>) -> (SearchInput, SearchTerms) {
    let (tx, rx) = mpsc::unbounded_channel();
    let initial = initial.into().trim().to_string();
    (SearchInput { tx }, SearchTerms { rx, quiet, last_emitted: initial })
}

#[derive(Debug, Clone)]
pub struct SearchInput {
    tx: mpsc::UnboundedSender<String>,
}

impl SearchInput {
    /// Records a raw input value. Returns `false` once the receiving side is gone.
    pub fn push(&self, raw: impl Into<String>) -> bool {
        self.tx.send(raw.into()).is_ok()
    }
}

#[derive(Debug)]
pub struct SearchTerms {
    rx: mpsc::UnboundedReceiver<String>,
    quiet: Duration,
    last_emitted: String,
}

impl SearchTerms {
    /// Waits for the next effective term. `None` once every [`SearchInput`] is dropped and the
    /// pending value (if any) was flushed.
    pub async fn next(&mut self) -> Option<String> {
        loop {
            let mut pending = self.rx.recv().await?;

            loop {
                match tokio::time::timeout(self.quiet, self.rx.recv()).await {
                    Ok(Some(newer)) => pending = newer,
                    // input closed or quiet period elapsed
                    Ok(None) | Err(_) => break,
                }
            }

            let term = pending.trim().to_string();
            if term == self.last_emitted {
                trace!(term = %term, "Search term unchanged, skipping");
                continue;
            }
            self.last_emitted = term.clone();
            return Some(term);
        }
    }

    pub fn last_emitted(&self) -> &str {
        &self.last_emitted
    }
}
