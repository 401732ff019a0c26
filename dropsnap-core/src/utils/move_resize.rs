//! Moving and resizing windows, and waiting until the window manager did what we asked.
//!
//! All coordinates are content coordinates. Window managers are free to second-guess every
//! request: fluxbox grows a window by the height of its titlebar when moving it, and terminals
//! ask for their size to be a multiple of their cell size. The functions in here try to end up
//! with the geometry that was asked for anyway.
use super::geometry_sync::{geometries, poll_for, DecorDiffers, GeometryDiffers};
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::{Result, SnapError};
use crate::models::{Handle, WindowHandle, Xyhw};

/// A timeout while waiting for a change only means that we did not see one.
fn ignore_timeout(result: Result<()>, operation: &str) -> Result<()> {
    match result {
        Err(err) if err.is_timeout() => {
            tracing::debug!("{}: no change observed: {}", operation, err);
            Ok(())
        }
        other => other,
    }
}

/// Moves a window and waits until it has moved.
///
/// # Errors
///
/// Errors if the display server fails, or with [`SnapError::Timeout`] if the window never
/// moved.
pub async fn move_window<H, S>(
    server: &S,
    config: &impl Config,
    handle: &WindowHandle<H>,
    x: i32,
    y: i32,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    // Snapshot both sorts of window geometries.
    let (decor, base) = geometries(server, handle)?;
    if base.x() == x && base.y() == y {
        return Ok(());
    }
    tracing::trace!("move: detected geometry of {:?} to be {:?}", handle, base);

    server.request_move(handle, x, y)?;
    server.flush();

    // Some window managers apply a move before the first poll, which looks like nothing
    // happened. The final check below catches windows that really did not move.
    ignore_timeout(
        poll_for(server, config, handle, &[&DecorDiffers(decor)]).await,
        "move",
    )?;

    let post_move = server.window_geometry(handle)?;
    if !post_move.same_size(&base) {
        tracing::debug!(
            "move: resetting dimensions of {:?} to {}x{} due to w/h delta: {}/{}",
            handle,
            base.w(),
            base.h(),
            post_move.w() - base.w(),
            post_move.h() - base.h()
        );
        server.request_resize(handle, base.w(), base.h())?;
        server.flush();
        ignore_timeout(
            poll_for(server, config, handle, &[&GeometryDiffers(post_move)]).await,
            "move",
        )?;
    }

    match poll_for(server, config, handle, &[&DecorDiffers(decor)]).await {
        Err(SnapError::Timeout { duration, .. }) => Err(SnapError::Timeout {
            operation: "move: window did not move",
            duration,
        }),
        other => other,
    }
}

/// Moves and resizes a window in one request, then makes sure the size is the one requested.
///
/// # Errors
///
/// Errors if the display server fails, or with [`SnapError::Timeout`] if the window never
/// reached the requested position.
pub async fn move_resize_window<H, S>(
    server: &S,
    config: &impl Config,
    handle: &WindowHandle<H>,
    geometry: Xyhw,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let base = server.window_geometry(handle)?;
    if base == geometry {
        return Ok(());
    }

    server.request_move_resize(handle, geometry)?;
    server.flush();
    match poll_for(server, config, handle, &[&GeometryDiffers(base)]).await {
        Ok(()) => {}
        Err(SnapError::Timeout { duration, .. }) => {
            // Size hints can round the request back to the current size.
            let current = server.window_geometry(handle)?;
            if current.same_position(&geometry) {
                tracing::debug!(
                    "move_resize: size hints of {:?} keep it at {}x{} instead of {}x{}",
                    handle,
                    current.w(),
                    current.h(),
                    geometry.w(),
                    geometry.h()
                );
                return Ok(());
            }
            return Err(SnapError::Timeout {
                operation: "move_resize: window did not change",
                duration,
            });
        }
        Err(err) => return Err(err),
    }

    let geom = server.window_geometry(handle)?;
    if !geom.same_size(&geometry) {
        tracing::debug!(
            "move_resize: resizing {:?} again after incorrect new dimensions {}x{}",
            handle,
            geom.w(),
            geom.h()
        );
        server.request_resize(handle, geometry.w(), geometry.h())?;
        server.flush();
        ignore_timeout(
            poll_for(server, config, handle, &[&GeometryDiffers(geom)]).await,
            "move_resize",
        )?;

        let corrected = server.window_geometry(handle)?;
        if !corrected.same_size(&geometry) {
            tracing::debug!(
                "move_resize: size hints of {:?} keep it at {}x{} instead of {}x{}",
                handle,
                corrected.w(),
                corrected.h(),
                geometry.w(),
                geometry.h()
            );
        }
    }
    Ok(())
}

/// Resizes a window, keeping its origin, and waits for the new size to show up.
///
/// # Errors
///
/// Errors if the display server fails. A window that refuses the new size is not an error.
pub async fn resize_window<H, S>(
    server: &S,
    config: &impl Config,
    handle: &WindowHandle<H>,
    w: i32,
    h: i32,
) -> Result<()>
where
    H: Handle,
    S: DisplayServer<H>,
{
    let base = server.window_geometry(handle)?;
    if base.w() == w && base.h() == h {
        return Ok(());
    }

    server.request_resize(handle, w, h)?;
    server.flush();
    ignore_timeout(
        poll_for(server, config, handle, &[&GeometryDiffers(base)]).await,
        "resize",
    )
}
