//! Browser viewport measurement and resize/orientation subscriptions.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast};

/// Viewport size reported when the browser window cannot be queried.
pub const FALLBACK_VIEWPORT: (u32, u32) = (1024, 768);

/// Browser events that can change the layout viewport.
pub const VIEWPORT_EVENTS: [&str; 2] = ["resize", "orientationchange"];

/// Returns the current `(innerWidth, innerHeight)` of the browser window in CSS pixels.
pub fn measure_viewport() -> (u32, u32) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let read = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback| {
                value
                    .ok()
                    .and_then(|value| value.as_f64())
                    .map(|value| value.max(0.0) as u32)
                    .unwrap_or(fallback)
            };
            return (
                read(window.inner_width(), FALLBACK_VIEWPORT.0),
                read(window.inner_height(), FALLBACK_VIEWPORT.1),
            );
        }
    }

    FALLBACK_VIEWPORT
}

/// Keeps viewport listeners registered until dropped.
pub struct ViewportListener {
    #[cfg(target_arch = "wasm32")]
    callback: Closure<dyn Fn()>,
}

impl std::fmt::Debug for ViewportListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewportListener").finish_non_exhaustive()
    }
}

/// Calls `on_change` with the freshly measured viewport on every resize or orientation change.
///
/// The listener is removed when the returned guard is dropped.
pub fn watch_viewport(on_change: impl Fn(u32, u32) + 'static) -> ViewportListener {
    #[cfg(target_arch = "wasm32")]
    {
        let callback = Closure::<dyn Fn()>::new(move || {
            let (width, height) = measure_viewport();
            on_change(width, height);
        });
        if let Some(window) = web_sys::window() {
            for event in VIEWPORT_EVENTS {
                let _ = window
                    .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
            }
        }
        ViewportListener { callback }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = on_change;
        ViewportListener {}
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for ViewportListener {
    fn drop(&mut self) {
        if let Some(window) = web_sys::window() {
            for event in VIEWPORT_EVENTS {
                let _ = window.remove_event_listener_with_callback(
                    event,
                    self.callback.as_ref().unchecked_ref(),
                );
            }
        }
    }
}
