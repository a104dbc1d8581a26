//! Timer host-service adapter backed by `window.setTimeout`.

use platform_host::{TimerCallback, TimerHandle, TimerService};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

#[derive(Debug, Clone, Copy, Default)]
/// Browser timer adapter.
///
/// On non-wasm targets there is no event loop to run callbacks on, so every request is refused.
pub struct WebTimerService;

impl TimerService for WebTimerService {
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerHandle, String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window is unavailable".to_string())?;
            let callback = Closure::once_into_js(move || callback());
            let delay = i32::try_from(delay_ms).unwrap_or(i32::MAX);
            return window
                .set_timeout_with_callback_and_timeout_and_arguments_0(
                    callback.unchecked_ref(),
                    delay,
                )
                .map(TimerHandle)
                .map_err(|err| format!("setTimeout failed: {err:?}"));
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (delay_ms, callback);
            Err("setTimeout requires a wasm32 browser target".to_string())
        }
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                window.clear_timeout_with_handle(handle.0);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = handle;
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn native_builds_refuse_to_schedule() {
        assert!(WebTimerService.set_timeout(800, Box::new(|| {})).is_err());
    }
}
