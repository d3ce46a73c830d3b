//! Content-extraction probe: one-shot headless-browser operation that
//! navigates to a URL, waits for a selector, and extracts its content.
//!
//! The browser process is the only external resource this service owns;
//! acquisition is scoped to a single invocation and release is RAII, so it
//! holds on every exit path. Exactly one attempt per invocation; callers
//! decide whether to re-invoke.

pub mod chrome;
pub mod gate;

pub use chrome::ChromeProbe;
pub use gate::ProbeGate;

use async_trait::async_trait;
use models::tracker::CompareMode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Ephemeral probe input; consumed once, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeDraft {
    pub website_url: String,
    pub selector: String,
    pub compare_mode: CompareMode,
}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("navigation failed: {0}")]
    Navigation(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("probe timed out")]
    Timeout,
    #[error("browser error: {0}")]
    Browser(String),
}

#[async_trait]
pub trait ContentProbe: Send + Sync {
    async fn extract(&self, draft: ProbeDraft) -> Result<String, ProbeError>;
}

/// Scripted probe double for tests
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    type Script = Box<dyn Fn(&ProbeDraft) -> Result<String, ProbeError> + Send + Sync>;

    pub struct MockProbe {
        script: Script,
        delay: Option<Duration>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: Mutex<usize>,
    }

    impl MockProbe {
        pub fn returning(
            script: impl Fn(&ProbeDraft) -> Result<String, ProbeError> + Send + Sync + 'static,
        ) -> Self {
            Self {
                script: Box::new(script),
                delay: None,
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: Mutex::new(0),
            }
        }

        pub fn ok(result: &str) -> Self {
            let result = result.to_string();
            Self::returning(move |_| Ok(result.clone()))
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        /// Peak number of concurrently running extracts, for admission tests.
        pub fn max_in_flight(&self) -> usize {
            *self.max_in_flight.lock().unwrap()
        }
    }

    #[async_trait]
    impl ContentProbe for MockProbe {
        async fn extract(&self, draft: ProbeDraft) -> Result<String, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            {
                let mut max = self.max_in_flight.lock().unwrap();
                if running > *max {
                    *max = running;
                }
            }
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let res = (self.script)(&draft);
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            res
        }
    }
}
