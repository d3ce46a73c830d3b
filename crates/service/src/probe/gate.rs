use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::{instrument, warn};

use super::{ContentProbe, ProbeDraft, ProbeError};

/// Admission control for the probe: a bounded semaphore caps how many
/// browser processes may be alive at once (callers beyond the cap queue),
/// and a hard wall-clock timeout bounds how long a caller waits.
///
/// The permit travels with the invocation itself, so capacity only comes
/// back when the underlying work has finished. A timed-out or disconnected
/// caller abandons the wait, but its slot stays taken until the straggling
/// browser process exits; the cap therefore holds even under repeated
/// timeouts.
pub struct ProbeGate {
    inner: Arc<dyn ContentProbe>,
    permits: Arc<Semaphore>,
    capacity: usize,
    wall_clock: Duration,
}

impl ProbeGate {
    pub fn new(inner: Arc<dyn ContentProbe>, max_concurrent: usize, wall_clock: Duration) -> Self {
        Self {
            inner,
            permits: Arc::new(Semaphore::new(max_concurrent)),
            capacity: max_concurrent,
            wall_clock,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Free slots right now; the tests use this to confirm release.
    pub fn available_permits(&self) -> usize {
        self.permits.available_permits()
    }

    #[instrument(skip(self, draft), fields(url = %draft.website_url))]
    pub async fn extract(&self, draft: ProbeDraft) -> Result<String, ProbeError> {
        let permit = Arc::clone(&self.permits)
            .acquire_owned()
            .await
            .map_err(|_| ProbeError::Browser("probe gate closed".into()))?;

        let inner = Arc::clone(&self.inner);
        let work = tokio::spawn(async move {
            // The permit lives inside the task: dropping the wait below
            // must not restore capacity while this is still running.
            let _permit = permit;
            inner.extract(draft).await
        });

        match tokio::time::timeout(self.wall_clock, work).await {
            Ok(Ok(res)) => res,
            Ok(Err(e)) => Err(ProbeError::Browser(format!("probe task failed: {e}"))),
            Err(_) => {
                // The task keeps running detached; its permit is released
                // when the underlying browser work completes.
                warn!(wall_clock_secs = self.wall_clock.as_secs(), "probe exceeded wall clock");
                Err(ProbeError::Timeout)
            }
        }
    }
}
