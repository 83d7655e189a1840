//! External URL host service (dock links to profiles outside the desktop).

use std::{future::Future, pin::Pin};

use crate::HostError;

/// Object-safe boxed future used by [`ExternalUrlService`].
pub type ExternalUrlFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Host service for opening URLs outside the simulated desktop.
pub trait ExternalUrlService {
    /// Opens `url` in a new browsing context.
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), HostError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Ignores every request.
pub struct NoopExternalUrlService;

impl ExternalUrlService for NoopExternalUrlService {
    fn open_url<'a>(&'a self, _url: &'a str) -> ExternalUrlFuture<'a, Result<(), HostError>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Opens URLs with `window.open(url, "_blank")`.
pub struct WebExternalUrlService;

impl ExternalUrlService for WebExternalUrlService {
    fn open_url<'a>(&'a self, url: &'a str) -> ExternalUrlFuture<'a, Result<(), HostError>> {
        Box::pin(async move {
            #[cfg(target_arch = "wasm32")]
            {
                let window = web_sys::window().ok_or(HostError::Unavailable("window"))?;
                window
                    .open_with_url_and_target(url, "_blank")
                    .map(|_| ())
                    .map_err(|e| HostError::Backend(format!("window.open failed: {e:?}")))
            }

            #[cfg(not(target_arch = "wasm32"))]
            {
                let _ = url;
                Err(HostError::Unavailable("window"))
            }
        })
    }
}
