use crate::consts::WHEEL_IDLE_MS;
use crate::edit::EditSession;
use crate::font::{Font, Glyph};
use crate::geometry::Point;
use crate::gesture::{TouchTracker, WheelTracker};
use crate::hit::hit_test;
use crate::input::{Button, InputMode, Modifiers, WheelDelta};
use crate::load::{LoadError, PendingLoad};
use crate::viewport::Viewport;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    FontInstalled { ysize: u32, drawable: usize },
    LoadFailed(LoadError),
    EditStarted { character: u8 },
    GlyphEdited(Glyph),
    EditEnded { character: u8 },
    HoverChanged(Option<u8>),
    ViewChanged { zoom: f64, offset: Point },
    RenderNeeded,
}

/// The viewer session: font, viewport, and every piece of gesture state.
///
/// All mutation goes through the handler methods, each of which runs to
/// completion and returns the [`Action`]s the host should react to. The
/// font may be absent until the first successful load; it is only ever
/// replaced whole.
#[derive(Debug)]
pub struct EngineCore {
    pub font: Option<Font>,
    pub viewport: Viewport,
    pub edit: EditSession,
    pub mode: InputMode,
    /// Last known pointer position in screen space.
    pub pointer: Point,
    pub modifiers: Modifiers,
    hovered: Option<u8>,
    wheel: WheelTracker,
    touch: TouchTracker,
    pending: Option<PendingLoad>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_wheel_idle(WHEEL_IDLE_MS)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session whose trackpad wheel state expires after `idle_ms`.
    #[must_use]
    pub fn with_wheel_idle(idle_ms: f64) -> Self {
        Self {
            font: None,
            viewport: Viewport::default(),
            edit: EditSession::default(),
            mode: InputMode::default(),
            pointer: Point::default(),
            modifiers: Modifiers::default(),
            hovered: None,
            wheel: WheelTracker::new(idle_ms),
            touch: TouchTracker::new(),
            pending: None,
        }
    }

    // --- Font ---

    /// Replace the font. Any edit session ends; the hover is recomputed.
    pub fn install_font(&mut self, font: Font) -> Vec<Action> {
        let mut actions = Vec::new();
        self.install(font, &mut actions);
        finish(actions)
    }

    /// Track an asynchronous load. A load that is still pending is replaced;
    /// its result will be discarded.
    pub fn begin_load(&mut self, pending: PendingLoad) {
        if self.pending.is_some() {
            tracing::debug!("superseding pending font load");
        }
        self.pending = Some(pending);
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Install the result of a finished load. On failure the current font
    /// is left untouched.
    pub fn poll_load(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        self.take_load(&mut actions);
        finish(actions)
    }

    // --- Settings ---

    pub fn set_input_mode(&mut self, mode: InputMode) {
        if self.mode != mode {
            tracing::info!(?mode, "input mode changed");
        }
        self.mode = mode;
        self.wheel.reset();
    }

    /// Update the screen size in CSS pixels.
    pub fn set_viewport(&mut self, width: f64, height: f64) -> Vec<Action> {
        let before = self.view_state();
        self.viewport.set_size(width, height);
        let mut actions = Vec::new();
        self.push_view_change(before, &mut actions);
        self.update_hover(&mut actions);
        finish(actions)
    }

    // --- Pointer ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.pointer = screen_pt;
        self.modifiers = modifiers;
        let mut actions = Vec::new();
        match button {
            Button::Primary => {
                if let Some(font) = &self.font {
                    if let Some(character) = self.edit.begin(font, &self.viewport, screen_pt) {
                        tracing::debug!(character, "edit started");
                        actions.push(Action::EditStarted { character });
                    }
                }
            }
            Button::Secondary => {
                self.viewport.begin_pan(screen_pt);
            }
            Button::Middle => {}
        }
        finish(actions)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.pointer = screen_pt;
        self.modifiers = modifiers;
        let before = self.view_state();
        let mut actions = Vec::new();
        self.viewport.drag_pan(screen_pt);
        self.push_view_change(before, &mut actions);
        self.apply_edit(&mut actions);
        self.update_hover(&mut actions);
        finish(actions)
    }

    /// Releasing the primary button ends any edit session. Releasing the
    /// secondary button ends the drag pan.
    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.pointer = screen_pt;
        self.modifiers = modifiers;
        let mut actions = Vec::new();
        match button {
            Button::Primary => {
                if let Some(character) = self.edit.end() {
                    tracing::debug!(character, "edit ended");
                    actions.push(Action::EditEnded { character });
                }
            }
            Button::Secondary => {
                self.viewport.end_pan();
            }
            Button::Middle => {}
        }
        finish(actions)
    }

    /// Modifier keys changed without pointer motion.
    pub fn on_modifiers(&mut self, modifiers: Modifiers) -> Vec<Action> {
        self.modifiers = modifiers;
        let mut actions = Vec::new();
        self.apply_edit(&mut actions);
        finish(actions)
    }

    // --- Wheel ---

    /// In mouse mode each tick is a discrete zoom step around the cursor
    /// (`dy < 0` zooms in). In trackpad mode the delta pans, or zooms
    /// continuously with ctrl held.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, modifiers: Modifiers, now_ms: f64) -> Vec<Action> {
        self.pointer = screen_pt;
        self.modifiers = modifiers;
        let before = self.view_state();
        if self.mode.is_trackpad() {
            // `set_zoom` leaves the drag anchor alone; `step_zoom` re-snaps it itself.
            if self.wheel.on_wheel(&mut self.viewport, delta, modifiers.ctrl, now_ms) {
                self.viewport.resnap_pan(screen_pt);
            }
        } else if delta.dy.is_finite() && delta.dy != 0.0 {
            self.viewport.step_zoom(delta.dy < 0.0, screen_pt);
        }
        let mut actions = Vec::new();
        self.push_view_change(before, &mut actions);
        self.apply_edit(&mut actions);
        self.update_hover(&mut actions);
        finish(actions)
    }

    // --- Touch ---

    pub fn on_touch_start(&mut self, touches: &[Point]) -> Vec<Action> {
        self.touch.start(&self.viewport, touches);
        Vec::new()
    }

    pub fn on_touch_move(&mut self, touches: &[Point]) -> Vec<Action> {
        let before = self.view_state();
        if self.touch.moved(&mut self.viewport, touches) {
            self.viewport.resnap_pan(self.pointer);
        }
        let mut actions = Vec::new();
        self.push_view_change(before, &mut actions);
        self.update_hover(&mut actions);
        finish(actions)
    }

    /// `remaining` lists the touches still down after the change.
    pub fn on_touch_end(&mut self, remaining: &[Point]) -> Vec<Action> {
        let before = self.view_state();
        self.touch.ended(&mut self.viewport, remaining);
        let mut actions = Vec::new();
        self.push_view_change(before, &mut actions);
        self.update_hover(&mut actions);
        finish(actions)
    }

    // --- Frame ---

    /// Advance one frame at `now_ms`.
    ///
    /// Order: pending load, trackpad motion, drag-pan recompute from the
    /// current zoom, edit update, hover.
    pub fn frame(&mut self, now_ms: f64) -> Vec<Action> {
        let mut actions = Vec::new();
        self.take_load(&mut actions);
        let before = self.view_state();
        self.wheel.tick(&mut self.viewport, now_ms);
        self.viewport.drag_pan(self.pointer);
        self.push_view_change(before, &mut actions);
        self.apply_edit(&mut actions);
        self.update_hover(&mut actions);
        finish(actions)
    }

    // --- Queries ---

    #[must_use]
    pub fn font(&self) -> Option<&Font> {
        self.font.as_ref()
    }

    /// Character under the pointer as of the last update.
    #[must_use]
    pub fn hovered(&self) -> Option<u8> {
        self.hovered
    }

    /// Description lines for the hovered glyph.
    #[must_use]
    pub fn tooltip(&self) -> Option<Vec<String>> {
        let font = self.font.as_ref()?;
        self.hovered.map(|character| font.glyph(character).describe())
    }

    #[must_use]
    pub fn status_line(&self) -> String {
        self.viewport.status_line()
    }

    // --- Internals ---

    fn install(&mut self, font: Font, actions: &mut Vec<Action>) {
        if let Some(character) = self.edit.end() {
            actions.push(Action::EditEnded { character });
        }
        let drawable = font.drawable_count();
        tracing::info!(ysize = font.ysize, drawable, "font installed");
        actions.push(Action::FontInstalled { ysize: font.ysize, drawable });
        self.font = Some(font);
        self.update_hover(actions);
    }

    fn take_load(&mut self, actions: &mut Vec<Action>) {
        let Some(result) = self.pending.as_mut().and_then(PendingLoad::try_take) else {
            return;
        };
        self.pending = None;
        match result {
            Ok(font) => self.install(font, actions),
            Err(error) => {
                tracing::warn!(%error, "font load failed");
                actions.push(Action::LoadFailed(error));
            }
        }
    }

    fn view_state(&self) -> (f64, Point) {
        (self.viewport.zoom, self.viewport.offset)
    }

    fn push_view_change(&self, before: (f64, Point), actions: &mut Vec<Action>) {
        let (zoom, offset) = self.view_state();
        if (zoom, offset) != before {
            actions.push(Action::ViewChanged { zoom, offset });
        }
    }

    fn apply_edit(&mut self, actions: &mut Vec<Action>) {
        let Some(font) = self.font.as_mut() else {
            return;
        };
        if let Some(glyph) = self.edit.apply(font, self.viewport.zoom, self.pointer, self.modifiers) {
            actions.push(Action::GlyphEdited(glyph));
        }
    }

    fn update_hover(&mut self, actions: &mut Vec<Action>) {
        let hovered = self
            .font
            .as_ref()
            .and_then(|font| hit_test(self.pointer, font, &self.viewport))
            .map(|hit| hit.character);
        if hovered != self.hovered {
            self.hovered = hovered;
            actions.push(Action::HoverChanged(hovered));
        }
    }
}

/// Append `RenderNeeded` when anything visible changed.
fn finish(mut actions: Vec<Action>) -> Vec<Action> {
    if actions.iter().any(|action| !matches!(action, Action::LoadFailed(_))) {
        actions.push(Action::RenderNeeded);
    }
    actions
}
