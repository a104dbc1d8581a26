//! Notification host-service adapter for browser contexts.

use platform_host::{NotificationFuture, NotificationService};

#[derive(Debug, Clone, Copy, Default)]
/// Browser notification adapter backed by the Web Notifications API.
pub struct WebNotificationService;

impl NotificationService for WebNotificationService {
    fn notify<'a>(
        &'a self,
        title: &'a str,
        body: &'a str,
    ) -> NotificationFuture<'a, Result<(), String>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                use wasm_bindgen::JsValue;
                ensure_permission().await?;
                return web_sys::Notification::new(&render_notification(title, body))
                    .map(|_| ())
                    .map_err(|err: JsValue| format!("notification dispatch failed: {err:?}"));
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = render_notification(title, body);
                Ok(())
            }
        })
    }
}

/// Asks for notification permission the first time a notice is raised.
#[cfg(target_arch = "wasm32")]
async fn ensure_permission() -> Result<(), String> {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Notification, NotificationPermission};

    match Notification::permission() {
        NotificationPermission::Granted => return Ok(()),
        NotificationPermission::Denied => {
            return Err("notification permission was denied".to_string())
        }
        _ => {}
    }

    let request = Notification::request_permission()
        .map_err(|err| format!("notification permission request failed: {err:?}"))?;
    let answer = JsFuture::from(request)
        .await
        .map_err(|err| format!("notification permission request failed: {err:?}"))?;
    match answer.as_string().as_deref() {
        Some("granted") => Ok(()),
        _ => Err("notification permission was not granted".to_string()),
    }
}

fn render_notification(title: &str, body: &str) -> String {
    if body.trim().is_empty() {
        title.to_string()
    } else {
        format!("{title}: {body}")
    }
}
