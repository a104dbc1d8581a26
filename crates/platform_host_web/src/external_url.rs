//! External URL host-service adapter for browser contexts.

use platform_host::{ExternalOpenStatus, ExternalUrlFuture, ExternalUrlService};

/// Browsing-context target used for external launches.
pub const EXTERNAL_URL_TARGET: &str = "_blank";

#[derive(Debug, Clone, Copy, Default)]
/// Browser external URL adapter backed by `window.open`.
///
/// A `null` or already-closed window handle is reported as [`ExternalOpenStatus::Blocked`], which
/// is how pop-up blockers surface in every mainstream browser.
pub struct WebExternalUrlService;

impl ExternalUrlService for WebExternalUrlService {
    fn open_url<'a>(
        &'a self,
        url: &'a str,
    ) -> ExternalUrlFuture<'a, Result<ExternalOpenStatus, String>> {
        Box::pin(async move { open_in_new_context(url) })
    }
}

#[cfg(target_arch = "wasm32")]
fn open_in_new_context(url: &str) -> Result<ExternalOpenStatus, String> {
    let window = web_sys::window().ok_or_else(|| "browser window unavailable".to_string())?;
    let handle = window
        .open_with_url_and_target(url, EXTERNAL_URL_TARGET)
        .map_err(|err| format!("window.open failed: {err:?}"))?;
    Ok(classify_handle(
        handle.map(|opened| opened.closed().unwrap_or(true)),
    ))
}

#[cfg(not(target_arch = "wasm32"))]
fn open_in_new_context(_url: &str) -> Result<ExternalOpenStatus, String> {
    Err("external URLs can only be opened when compiled for wasm32".to_string())
}

/// Maps the observed new-window handle (`Some(closed)` or `None`) to a launch status.
pub fn classify_handle(handle_closed: Option<bool>) -> ExternalOpenStatus {
    match handle_closed {
        Some(false) => ExternalOpenStatus::Opened,
        Some(true) | None => ExternalOpenStatus::Blocked,
    }
}
