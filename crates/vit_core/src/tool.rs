//! The image tool: one focus point and one crop zone over a bound image.
//!
//! [`ImageTool`] ties the pieces together. Public mutations clamp through the
//! model, re-render the affected overlay and then notify the host. Pointer
//! gestures arrive through [`ImageTool::pointer_down`], [`ImageTool::pointer_move`]
//! and [`ImageTool::pointer_up`].

use crate::config::ToolConfig;
use crate::error::ToolError;
use crate::frame::ImageFrame;
use crate::geometry::{CropZone, FocusPoint, Point, Rect, Size};
use crate::interaction::{self, InteractionSession};
use crate::model::{AnnotationModel, Snapshot, Transition};
use crate::notifier::ChangeNotifier;
use crate::render::OverlayRenderer;
use crate::surface::{Cursor, OverlayElement, OverlaySurface, PointerTarget};

/// Everything a live tool owns. Dropped as a whole by `destroy()`.
#[derive(Debug)]
struct ToolState<S> {
    surface: S,
    config: ToolConfig,
    frame: ImageFrame,
    model: AnnotationModel,
    session: InteractionSession,
    renderer: OverlayRenderer,
    notifier: ChangeNotifier,
}

/// Focus point + crop zone editor bound to one image.
#[derive(Debug)]
pub struct ImageTool<S: OverlaySurface> {
    state: Option<ToolState<S>>,
}

impl<S: OverlaySurface> ImageTool<S> {
    /// Bind a tool to `surface`.
    ///
    /// Measures the image and creates (hidden) overlay elements for every
    /// enabled annotation.
    pub fn new(surface: S, config: ToolConfig) -> Self {
        let frame = ImageFrame::new(surface.natural_size(), surface.rendered_size());
        let mut state = ToolState {
            surface,
            renderer: OverlayRenderer::new(config.debug),
            config,
            frame,
            model: AnnotationModel::new(),
            session: InteractionSession::Idle,
            notifier: ChangeNotifier::none(),
        };

        if state.config.focus_point.enabled {
            state.ensure_marker();
        }
        if state.config.crop_zone.enabled {
            state.ensure_crop_overlay();
        }

        if state.config.debug {
            log::debug!(
                "Image tool bound: natural={:?} display={:?}",
                state.frame.natural(),
                state.frame.display()
            );
        }

        Self { state: Some(state) }
    }

    /// Set the handler called with a snapshot after every mutation.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&Snapshot) + 'static,
    {
        if let Some(state) = self.state.as_mut() {
            state.notifier = ChangeNotifier::new(f);
        }
        self
    }

    fn live(&self) -> Result<&ToolState<S>, ToolError> {
        self.state.as_ref().ok_or(ToolError::Disposed)
    }

    fn live_mut(&mut self) -> Result<&mut ToolState<S>, ToolError> {
        self.state.as_mut().ok_or(ToolError::Disposed)
    }

    /// Enable, disable or flip (`None`) the focus point.
    ///
    /// A no-op without notification when the focus point is disabled in the
    /// configuration.
    pub fn toggle_focus_point(&mut self, active: Option<bool>) -> Result<&mut Self, ToolError> {
        let state = self.live_mut()?;
        if !state.config.focus_point.enabled {
            return Ok(self);
        }

        match state.model.toggle_focus(&state.frame, active) {
            Transition::Activated => {
                state.ensure_marker();
                state
                    .surface
                    .set_visible(OverlayElement::FocusMarker, true);
                state.render_focus();
            }
            Transition::Deactivated => {
                state
                    .surface
                    .set_visible(OverlayElement::FocusMarker, false);
            }
            Transition::Unchanged => {}
        }

        state.notify();
        Ok(self)
    }

    /// Enable, disable or flip (`None`) the crop zone.
    pub fn toggle_crop_zone(&mut self, active: Option<bool>) -> Result<&mut Self, ToolError> {
        let state = self.live_mut()?;
        if !state.config.crop_zone.enabled {
            return Ok(self);
        }

        match state.model.toggle_crop(&state.frame, active) {
            Transition::Activated => {
                state.ensure_crop_overlay();
                state.surface.set_visible(OverlayElement::CropZone, true);
                state.render_crop();
            }
            Transition::Deactivated => {
                state.surface.set_visible(OverlayElement::CropZone, false);
            }
            Transition::Unchanged => {}
        }

        state.notify();
        Ok(self)
    }

    /// Set the focus point in natural pixels. Out-of-range values are clamped.
    pub fn set_focus_point(&mut self, x: f64, y: f64) -> Result<&mut Self, ToolError> {
        self.live_mut()?.set_focus_point(x, y);
        Ok(self)
    }

    /// Set the crop zone in natural pixels. Out-of-range values are clamped.
    pub fn set_crop_zone(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<&mut Self, ToolError> {
        self.live_mut()?.set_crop_zone(x, y, width, height);
        Ok(self)
    }

    pub fn focus_point(&self) -> Result<FocusPoint, ToolError> {
        Ok(self.live()?.model.focus_point())
    }

    pub fn crop_zone(&self) -> Result<CropZone, ToolError> {
        Ok(self.live()?.model.crop_zone())
    }

    /// Natural size of the bound image (1x1 until it loads).
    pub fn image_dimensions(&self) -> Result<Size, ToolError> {
        Ok(self.live()?.frame.natural())
    }

    pub fn is_focus_active(&self) -> Result<bool, ToolError> {
        Ok(self.live()?.model.is_focus_active())
    }

    pub fn is_crop_active(&self) -> Result<bool, ToolError> {
        Ok(self.live()?.model.is_crop_active())
    }

    /// Same value the change handler receives.
    pub fn snapshot(&self) -> Result<Snapshot, ToolError> {
        Ok(self.live()?.model.snapshot())
    }

    pub fn frame(&self) -> Result<ImageFrame, ToolError> {
        Ok(self.live()?.frame)
    }

    pub fn session(&self) -> Result<InteractionSession, ToolError> {
        Ok(self.live()?.session)
    }

    pub fn surface(&self) -> Result<&S, ToolError> {
        Ok(&self.live()?.surface)
    }

    /// Re-measure the image and re-place active overlays.
    ///
    /// Called on image load and viewport resize. Does not notify.
    pub fn refresh(&mut self) -> Result<(), ToolError> {
        self.live_mut()?.refresh();
        Ok(())
    }

    /// Start a gesture. Returns whether one was started.
    ///
    /// Ignored unless idle, and for overlays that are not active.
    pub fn pointer_down(&mut self, target: PointerTarget, pointer: Point) -> Result<bool, ToolError> {
        let state = self.live_mut()?;
        if !state.session.is_idle() {
            return Ok(false);
        }

        let session = match target {
            PointerTarget::FocusMarker if state.model.is_focus_active() => {
                let center = state.surface.image_origin() + state.frame.to_display(state.model.focus_point());
                state
                    .surface
                    .set_cursor(Some(OverlayElement::FocusMarker), Cursor::Grabbing);
                InteractionSession::DraggingFocus {
                    grab_offset: pointer - center,
                }
            }
            PointerTarget::CropBody if state.model.is_crop_active() => {
                let zone = state.model.crop_zone();
                state
                    .surface
                    .set_cursor(Some(OverlayElement::CropZone), Cursor::Grabbing);
                InteractionSession::DraggingCrop {
                    start_origin: state.frame.to_display(zone.origin()),
                    start_pointer: pointer,
                }
            }
            PointerTarget::CropHandle(handle) if state.model.is_crop_active() => {
                let zone = state.model.crop_zone();
                state.surface.set_cursor(None, Cursor::Resize(handle));
                InteractionSession::ResizingCrop {
                    handle,
                    start: state.frame.rect_to_display(zone),
                    start_pointer: pointer,
                }
            }
            _ => return Ok(false),
        };

        log::trace!("Gesture started: {:?}", session);
        state.session = session;
        Ok(true)
    }

    /// Continue the current gesture. A move while idle does nothing.
    pub fn pointer_move(&mut self, pointer: Point) -> Result<(), ToolError> {
        let state = self.live_mut()?;

        match state.session {
            InteractionSession::Idle => {}
            InteractionSession::DraggingFocus { grab_offset } => {
                let display = interaction::focus_drag_target(state.surface.image_origin(), pointer, grab_offset);
                let original = state.frame.to_original(display);
                state.set_focus_point(original.x, original.y);
            }
            InteractionSession::DraggingCrop {
                start_origin,
                start_pointer,
            } => {
                let display = interaction::crop_drag_origin(start_origin, start_pointer, pointer);
                let original = state.frame.to_original(display);
                let zone = state.model.crop_zone();
                state.set_crop_zone(original.x, original.y, zone.width, zone.height);
            }
            InteractionSession::ResizingCrop {
                handle,
                start,
                start_pointer,
            } => {
                let display = interaction::resize_rect(handle, start, pointer - start_pointer);
                let original: Rect = state.frame.rect_to_original(display);
                state.set_crop_zone(original.x, original.y, original.width, original.height);
            }
        }

        Ok(())
    }

    /// End the current gesture (if any) and restore cursors.
    pub fn pointer_up(&mut self) -> Result<(), ToolError> {
        let state = self.live_mut()?;

        match state.session {
            InteractionSession::DraggingFocus { .. } => {
                state
                    .surface
                    .set_cursor(Some(OverlayElement::FocusMarker), Cursor::Move);
            }
            InteractionSession::DraggingCrop { .. } => {
                state
                    .surface
                    .set_cursor(Some(OverlayElement::CropZone), Cursor::Move);
            }
            InteractionSession::ResizingCrop { .. } | InteractionSession::Idle => {}
        }

        state.session = InteractionSession::Idle;
        state.surface.set_cursor(None, Cursor::Default);
        Ok(())
    }

    /// Remove overlay elements and release everything. Safe to call twice.
    pub fn destroy(&mut self) {
        if let Some(mut state) = self.state.take() {
            state.surface.remove_elements();
            log::trace!("Image tool destroyed");
        }
    }

    pub fn is_destroyed(&self) -> bool {
        self.state.is_none()
    }
}

impl<S: OverlaySurface> ToolState<S> {
    fn ensure_marker(&mut self) {
        if !self.surface.has_element(OverlayElement::FocusMarker) {
            self.surface.create_focus_marker(&self.config.focus_point.style);
            self.surface
                .set_cursor(Some(OverlayElement::FocusMarker), Cursor::Move);
            self.surface
                .set_visible(OverlayElement::FocusMarker, false);
            log::trace!("Focus marker created");
        }
    }

    fn ensure_crop_overlay(&mut self) {
        if !self.surface.has_element(OverlayElement::CropZone) {
            self.surface
                .create_crop_overlay(&self.config.crop_zone.style, &self.config.crop_zone.handle_style);
            self.surface
                .set_cursor(Some(OverlayElement::CropZone), Cursor::Move);
            self.surface.set_visible(OverlayElement::CropZone, false);
            log::trace!("Crop overlay created");
        }
    }

    fn set_focus_point(&mut self, x: f64, y: f64) {
        self.model.set_focus_point(&self.frame, x, y);
        if self.model.is_focus_active() {
            self.render_focus();
        }
        self.notify();
    }

    fn set_crop_zone(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.model.set_crop_zone(&self.frame, x, y, width, height);
        if self.model.is_crop_active() {
            self.render_crop();
        }
        self.notify();
    }

    fn refresh(&mut self) {
        self.frame = ImageFrame::new(self.surface.natural_size(), self.surface.rendered_size());
        if self.config.debug {
            log::debug!(
                "Rescaled: natural={:?} display={:?} scale={:?}",
                self.frame.natural(),
                self.frame.display(),
                self.frame.scale()
            );
        }

        if self.model.is_focus_active() {
            self.render_focus();
        }
        if self.model.is_crop_active() {
            self.render_crop();
        }
    }

    /// Place the marker, re-clamping against the current frame first.
    fn render_focus(&mut self) {
        if self.model.reclamp_focus(&self.frame) && self.config.debug {
            log::debug!("Focus point re-clamped to {:?}", self.model.focus_point());
        }
        self.renderer
            .render_focus(&mut self.surface, &self.frame, self.model.focus_point());
    }

    /// Place the crop overlay, re-clamping against the current frame first.
    fn render_crop(&mut self) {
        if self.model.reclamp_crop(&self.frame) && self.config.debug {
            log::debug!("Crop zone re-clamped to {:?}", self.model.crop_zone());
        }
        self.renderer
            .render_crop(&mut self.surface, &self.frame, self.model.crop_zone());
    }

    fn notify(&mut self) {
        let snapshot = self.model.snapshot();
        self.notifier.notify(&snapshot);
    }
}
