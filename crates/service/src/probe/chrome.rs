use std::time::Duration;

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use serde_json::Value;
use tracing::{debug, instrument};

use models::tracker::CompareMode;

use super::{ContentProbe, ProbeDraft, ProbeError};

/// Per-stage bounds for a single probe invocation.
#[derive(Debug, Clone)]
pub struct ChromeProbeConfig {
    pub nav_timeout: Duration,
    pub selector_timeout: Duration,
    /// Fixed viewport so extraction is independent of layout defaults.
    pub window_size: (u32, u32),
}

impl Default for ChromeProbeConfig {
    fn default() -> Self {
        Self {
            nav_timeout: Duration::from_secs(20),
            selector_timeout: Duration::from_secs(10),
            window_size: (1512, 823),
        }
    }
}

/// Headless-Chrome probe. Launches one isolated browser process per
/// invocation; the CDP calls are blocking, so they run on the blocking pool.
pub struct ChromeProbe {
    cfg: ChromeProbeConfig,
}

impl ChromeProbe {
    pub fn new(cfg: ChromeProbeConfig) -> Self {
        Self { cfg }
    }
}

#[async_trait]
impl ContentProbe for ChromeProbe {
    #[instrument(skip(self, draft), fields(url = %draft.website_url, selector = %draft.selector))]
    async fn extract(&self, draft: ProbeDraft) -> Result<String, ProbeError> {
        let cfg = self.cfg.clone();
        tokio::task::spawn_blocking(move || run_probe(&cfg, &draft))
            .await
            .map_err(|e| ProbeError::Browser(format!("probe task failed: {e}")))?
    }
}

/// One full probe round trip. The `Browser` handle owns the child process
/// and dropping it terminates the process, so release holds on every exit
/// path including panic unwind.
fn run_probe(cfg: &ChromeProbeConfig, draft: &ProbeDraft) -> Result<String, ProbeError> {
    let opts = LaunchOptions::default_builder()
        .headless(true)
        .window_size(Some(cfg.window_size))
        .build()
        .map_err(|e| ProbeError::Browser(e.to_string()))?;
    let browser = Browser::new(opts).map_err(|e| ProbeError::Browser(e.to_string()))?;

    let tab = browser.new_tab().map_err(|e| ProbeError::Browser(e.to_string()))?;
    tab.set_default_timeout(cfg.nav_timeout);

    tab.navigate_to(&draft.website_url)
        .map_err(|e| ProbeError::Navigation(e.to_string()))?;
    tab.wait_until_navigated()
        .map_err(|e| ProbeError::Navigation(e.to_string()))?;
    debug!(url = %draft.website_url, "page loaded");

    let element = tab
        .wait_for_element_with_custom_timeout(&draft.selector, cfg.selector_timeout)
        .map_err(|_| ProbeError::SelectorNotFound(draft.selector.clone()))?;

    match draft.compare_mode {
        CompareMode::InnerText => element
            .get_inner_text()
            .map_err(|e| ProbeError::Browser(e.to_string())),
        CompareMode::InnerHtml => {
            let obj = element
                .call_js_fn("function() { return this.innerHTML; }", vec![], false)
                .map_err(|e| ProbeError::Browser(e.to_string()))?;
            match obj.value {
                Some(Value::String(s)) => Ok(s),
                _ => Ok(String::new()),
            }
        }
    }
}
