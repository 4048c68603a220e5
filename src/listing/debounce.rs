use std::time::Duration;

use tokio::sync::watch;

/// Writer half: every keystroke replaces the pending text
#[derive(Debug)]
pub struct SearchInput {
    tx: watch::Sender<String>,
}

impl SearchInput {
    pub fn type_text(&self, text: impl Into<String>) {
        self.tx.send_replace(text.into());
    }
}

/// Reader half: yields text only once it has been stable for the quiet period
#[derive(Debug)]
pub struct DebouncedSearch {
    rx: watch::Receiver<String>,
    quiet: Duration,
}

pub fn debounced(quiet: Duration) -> (SearchInput, DebouncedSearch) {
    let (tx, rx) = watch::channel(String::new());
    (SearchInput { tx }, DebouncedSearch { rx, quiet })
}

impl DebouncedSearch {
    /// Wait for the next settled value.
    ///
    /// Intermediate values are never yielded. If the input is dropped while a
    /// value is pending, that value is flushed; afterwards `None` is returned.
    pub async fn settled(&mut self) -> Option<String> {
        self.rx.changed().await.ok()?;
        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.quiet) => break,
                changed = self.rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        Some(self.rx.borrow_and_update().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn bursts_collapse_to_trailing_value() {
        let (input, mut search) = debounced(Duration::from_millis(500));
        let typist = tokio::spawn(async move {
            for text in ["s", "sh", "sho", "shoe", "shoes"] {
                input.type_text(text);
                tokio::time::sleep(Duration::from_millis(150)).await;
            }
            input
        });

        assert_eq!(search.settled().await.as_deref(), Some("shoes"));
        drop(typist.await.unwrap());
        assert_eq!(search.settled().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn separate_pauses_yield_separate_values() {
        let (input, mut search) = debounced(Duration::from_millis(500));
        input.type_text("red");
        assert_eq!(search.settled().await.as_deref(), Some("red"));
        input.type_text("blue");
        assert_eq!(search.settled().await.as_deref(), Some("blue"));
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_input_flushes_pending_text() {
        let (input, mut search) = debounced(Duration::from_millis(500));
        input.type_text("last");
        drop(input);
        assert_eq!(search.settled().await.as_deref(), Some("last"));
        assert_eq!(search.settled().await, None);
    }
}
