//! Waiting for the window manager.
//!
//! Geometry requests are asynchronous and there is no notification once the window manager has
//! dealt with them, so the only way to know is to look again. [`poll_for`] keeps looking until
//! every predicate holds, one of them fails, or the deadline passes.
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::{Result, SnapError};
use crate::models::{Handle, WindowHandle, Xyhw};
use std::time::Duration;
use tokio::time::{sleep, Instant};

/// A test run against the live state of a window. Returning `Ok(true)` means the test passed,
/// an error stops polling immediately.
pub trait Predicate<H: Handle, S: ?Sized> {
    /// # Errors
    ///
    /// Whatever querying the display server returned.
    fn test(&self, server: &S, handle: &WindowHandle<H>) -> Result<bool>;
}

impl<H, S, F> Predicate<H, S> for F
where
    H: Handle,
    S: ?Sized,
    F: Fn(&S, &WindowHandle<H>) -> Result<bool>,
{
    fn test(&self, server: &S, handle: &WindowHandle<H>) -> Result<bool> {
        self(server, handle)
    }
}

/// Passes once the content geometry no longer matches the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct GeometryDiffers(pub Xyhw);

impl<H: Handle, S: DisplayServer<H> + ?Sized> Predicate<H, S> for GeometryDiffers {
    fn test(&self, server: &S, handle: &WindowHandle<H>) -> Result<bool> {
        Ok(server.window_geometry(handle)? != self.0)
    }
}

/// Passes once the decorated geometry no longer matches the snapshot.
#[derive(Debug, Clone, Copy)]
pub struct DecorDiffers(pub Xyhw);

impl<H: Handle, S: DisplayServer<H> + ?Sized> Predicate<H, S> for DecorDiffers {
    fn test(&self, server: &S, handle: &WindowHandle<H>) -> Result<bool> {
        Ok(server.window_decorated_geometry(handle)? != self.0)
    }
}

/// Runs every predicate in order until all of them pass *on the same run*.
///
/// # Errors
///
/// Returns the first predicate error without waiting for the deadline, or
/// [`SnapError::Timeout`] once `timeout` has passed without a successful run.
pub async fn poll_for_timeout<H, S>(
    server: &S,
    handle: &WindowHandle<H>,
    timeout: Duration,
    interval: Duration,
    predicates: &[&dyn Predicate<H, S>],
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let deadline = Instant::now() + timeout;
    loop {
        let mut should_exit = true;
        for (i, predicate) in predicates.iter().enumerate() {
            let passed = predicate.test(server, handle).map_err(|err| {
                tracing::debug!("poll_for: error in predicate {}: {}", i, err);
                err
            })?;
            should_exit = should_exit && passed;
        }

        if should_exit {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(SnapError::Timeout {
                operation: "poll_for",
                duration: timeout,
            });
        }

        // Don't spam the server.
        sleep(interval).await;
    }
}

/// Same as [`poll_for_timeout`] with the configured timeout and interval.
///
/// # Errors
///
/// See [`poll_for_timeout`].
pub async fn poll_for<H, S>(
    server: &S,
    config: &impl Config,
    handle: &WindowHandle<H>,
    predicates: &[&dyn Predicate<H, S>],
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    poll_for_timeout(
        server,
        handle,
        config.move_resize_timeout(),
        config.poll_interval(),
        predicates,
    )
    .await
}

/// Returns the decorated and the content geometry of a window.
///
/// # Errors
///
/// Errors if either query fails.
pub fn geometries<H, S>(server: &S, handle: &WindowHandle<H>) -> Result<(Xyhw, Xyhw)>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let decor = server.window_decorated_geometry(handle)?;
    let base = server.window_geometry(handle)?;
    Ok((decor, base))
}
