use crate::actions::ActionTable;
use crate::config::Config;
use crate::display_servers::DisplayServer;
use crate::errors::{Result, SnapError, StateError};
use crate::models::{Handle, WindowHandle};
use serde::{Deserialize, Serialize};

/// An icon window that applies an action to whatever is dropped on it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DropZone<H: Handle> {
    #[serde(bound = "")]
    pub icon: WindowHandle<H>,
    /// Name of the action in the [`ActionTable`].
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragInteractionState<H: Handle> {
    pub dragging: bool,
    /// The window being dragged.
    pub incoming: Option<WindowHandle<H>>,
    /// The window it will be dropped on.
    pub target: Option<WindowHandle<H>>,
}

impl<H: Handle> Default for DragInteractionState<H> {
    fn default() -> Self {
        Self {
            dragging: false,
            incoming: None,
            target: None,
        }
    }
}

/// Drags one window over another and applies the action of the drop zone it is released on.
#[derive(Debug)]
pub struct DragHandler<H: Handle> {
    state: DragInteractionState<H>,
    actions: ActionTable,
    drop_zones: Vec<DropZone<H>>,
}

impl<H: Handle> Default for DragHandler<H> {
    fn default() -> Self {
        Self::new(ActionTable::default())
    }
}

impl<H: Handle> DragHandler<H> {
    pub fn new(actions: ActionTable) -> Self {
        Self {
            state: DragInteractionState::default(),
            actions,
            drop_zones: vec![],
        }
    }

    pub const fn state(&self) -> &DragInteractionState<H> {
        &self.state
    }

    pub const fn actions(&self) -> &ActionTable {
        &self.actions
    }

    /// Starts a new drag with `incoming`. A target left over from an earlier drag is dropped.
    pub fn start_drag(&mut self, incoming: WindowHandle<H>) {
        tracing::trace!("drag: started with {:?}", incoming);
        self.state = DragInteractionState {
            dragging: true,
            incoming: Some(incoming),
            target: None,
        };
    }

    pub fn set_target(&mut self, target: WindowHandle<H>) {
        self.state.target = Some(target);
    }

    /// Applies the action bound to `drop_zone` to the target and the incoming window. The drag
    /// is over afterwards, whether or not this succeeds.
    ///
    /// # Errors
    ///
    /// Errors with a [`StateError`] if the drag never started or has no target,
    /// [`SnapError::UnboundAction`] if the drop zone names an unknown action, or whatever the
    /// action returned.
    pub async fn end_drag<S: DisplayServer<H>>(
        &mut self,
        server: &S,
        config: &impl Config,
        drop_zone: &DropZone<H>,
    ) -> Result<()> {
        let state = std::mem::take(&mut self.state);
        let (target, incoming) = match state {
            DragInteractionState {
                dragging: false,
                incoming: None,
                target: None,
            } => return Err(StateError::NotDragging.into()),
            DragInteractionState { incoming: None, .. } => {
                return Err(StateError::NoIncomingWindow.into())
            }
            DragInteractionState { target: None, .. } => {
                return Err(StateError::NoTargetWindow.into())
            }
            DragInteractionState {
                dragging: true,
                incoming: Some(incoming),
                target: Some(target),
            } => (target, incoming),
            DragInteractionState { dragging: false, .. } => {
                return Err(StateError::NotDragging.into())
            }
        };

        let action = self
            .actions
            .get(&drop_zone.action)
            .ok_or_else(|| SnapError::UnboundAction(drop_zone.action.clone()))?;
        let result = action.apply(server, config, &target, &incoming).await;
        if let Err(err) = &result {
            tracing::error!(
                "drag: {} of {:?} onto {:?} failed: {}",
                action,
                incoming,
                target,
                err
            );
        }
        result
    }

    /// Binds an icon window to the action called `action`.
    pub fn register_drop_zone(&mut self, icon: WindowHandle<H>, action: impl Into<String>) {
        let action = action.into();
        match self.drop_zones.iter_mut().find(|zone| zone.icon == icon) {
            Some(zone) => zone.action = action,
            None => self.drop_zones.push(DropZone { icon, action }),
        }
    }

    pub fn drop_zones(&self) -> &[DropZone<H>] {
        &self.drop_zones
    }

    /// The drop zone whose icon is under the pointer, if any.
    ///
    /// # Errors
    ///
    /// Errors if the display server fails.
    pub fn drop_zone_under_pointer<S: DisplayServer<H>>(
        &self,
        server: &S,
    ) -> Result<Option<&DropZone<H>>> {
        Ok(server
            .toplevel_under_pointer()?
            .and_then(|handle| self.drop_zones.iter().find(|zone| zone.icon == handle)))
    }

    /// Starts dragging the window under the pointer. Returns `false` if there is none.
    ///
    /// # Errors
    ///
    /// Errors if the display server fails.
    pub fn drag_start<S: DisplayServer<H>>(&mut self, server: &S, x: i32, y: i32) -> Result<bool> {
        match server.window_under_pointer()? {
            Some(handle) => {
                self.start_drag(handle);
                Ok(true)
            }
            None => {
                tracing::debug!("drag: no window under the pointer at {}x{}", x, y);
                Ok(false)
            }
        }
    }

    /// Makes the managed window under the pointer the drop target.
    ///
    /// # Errors
    ///
    /// Errors if the display server fails.
    pub fn drag_step<S: DisplayServer<H>>(&mut self, server: &S, x: i32, y: i32) -> Result<()> {
        if !self.state.dragging {
            return Ok(());
        }
        let Some(handle) = server.window_under_pointer()? else {
            return Ok(());
        };
        let is_icon = self.drop_zones.iter().any(|zone| zone.icon == handle);
        if Some(handle) != self.state.incoming && !is_icon && Some(handle) != self.state.target {
            tracing::trace!("drag: target {:?} at {}x{}", handle, x, y);
            self.set_target(handle);
        }
        Ok(())
    }

    /// Drops the window on the drop zone under the pointer.
    ///
    /// # Errors
    ///
    /// Errors with [`SnapError::NoDropZone`] if the pointer is not over a drop zone, otherwise
    /// see [`DragHandler::end_drag`].
    pub async fn drag_end<S: DisplayServer<H>>(
        &mut self,
        server: &S,
        config: &impl Config,
        x: i32,
        y: i32,
    ) -> Result<()> {
        let zone = match self.drop_zone_under_pointer(server).map(|zone| zone.cloned()) {
            Ok(Some(zone)) => zone,
            Ok(None) => {
                tracing::debug!("drag: released outside of any drop zone at {}x{}", x, y);
                self.state = DragInteractionState::default();
                return Err(SnapError::NoDropZone);
            }
            Err(err) => {
                self.state = DragInteractionState::default();
                return Err(err);
            }
        };
        self.end_drag(server, config, &zone).await
    }
}
