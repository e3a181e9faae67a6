use rand::Rng;
use uuid::Uuid;

use crate::catalog::ModelEntry;
use crate::consts::{
    DEFAULT_GRID_SIZE, PLACEMENT_ORIGIN, PLACEMENT_SPREAD, SCALE_CM_PER_PX, ZOOM_STEP,
};
use crate::hit::{Corner, Hit, HitPart, hit_test};
use crate::input::{Button, GestureState, WheelDelta};
use crate::migrate;
use crate::resources::{NoopReleaser, ResourceReleaser};
use crate::scene::{
    Element, ElementId, ElementPatch, ElementType, Model3dPatch, ModelSource, OptPatch, Rect,
    SceneStore,
};
use crate::snap::snap_to_grid;
use crate::viewport::{Point, Viewport};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from editor operations for the host to process.
///
/// The core mutates its own state before returning; actions tell the host
/// what happened so it can persist, broadcast, or redraw. They are facts,
/// not requests.
#[derive(Debug, Clone)]
pub enum Action {
    ElementCreated(Element),
    ElementPatched { id: ElementId, patch: ElementPatch },
    ElementDeleted { id: ElementId },
    SceneCleared,
    SelectionChanged(Option<ElementId>),
    ViewportChanged,
    RenderNeeded,
}

/// Core editor state: the scene, the viewport, and the active gesture.
///
/// Headless by construction; the host owns the canvas and feeds pointer
/// events in screen coordinates. All logic that doesn't depend on a
/// rendering surface lives here so it can be tested directly.
pub struct EditorCore {
    pub scene: SceneStore,
    pub viewport: Viewport,
    pub gesture: GestureState,
    grid_size: f64,
    releaser: Box<dyn ResourceReleaser>,
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorCore {
    #[must_use]
    pub fn new() -> Self {
        Self::with_releaser(NoopReleaser)
    }

    /// Create a core that frees custom model urls through `releaser`.
    #[must_use]
    pub fn with_releaser(releaser: impl ResourceReleaser + 'static) -> Self {
        Self {
            scene: SceneStore::new(),
            viewport: Viewport::default(),
            gesture: GestureState::default(),
            grid_size: DEFAULT_GRID_SIZE,
            releaser: Box::new(releaser),
        }
    }

    // --- Grid ---

    /// The active snap grid size in world units.
    #[must_use]
    pub fn grid_size(&self) -> f64 {
        self.grid_size
    }

    /// Change the snap grid. Non-finite or non-positive sizes are refused;
    /// the previous grid stays active.
    pub fn set_grid_size(&mut self, grid_size: f64) {
        if grid_size.is_finite() && grid_size > 0.0 {
            self.grid_size = grid_size;
        } else {
            tracing::warn!(grid_size, "ignoring invalid grid size");
        }
    }

    // --- Element lifecycle ---

    /// Create an element of `ty`, apply `overrides` on top of the type
    /// defaults, place it near the origin on a grid-snapped spot, and
    /// select it.
    pub fn create_element(&mut self, ty: ElementType, overrides: &ElementPatch) -> Vec<Action> {
        let id = format!("{}_{}", ty.as_str(), Uuid::new_v4().simple());
        let mut element = Element::new(id.clone(), ty);
        let mut rng = rand::rng();
        element.x = snap_to_grid(
            PLACEMENT_ORIGIN + rng.random_range(0.0..PLACEMENT_SPREAD),
            self.grid_size,
        );
        element.y = snap_to_grid(
            PLACEMENT_ORIGIN + rng.random_range(0.0..PLACEMENT_SPREAD),
            self.grid_size,
        );
        let released = element.apply_patch(overrides);
        self.release_urls(released);

        self.scene.insert(element.clone());
        self.scene.select(Some(id.clone()));
        vec![
            Action::ElementCreated(element),
            Action::SelectionChanged(Some(id)),
            Action::RenderNeeded,
        ]
    }

    /// Create a furniture element seeded from a catalog entry: library
    /// model attached, element sized to the entry's real-world footprint.
    pub fn create_from_catalog(&mut self, entry: &ModelEntry) -> Vec<Action> {
        let mut overrides = ElementPatch {
            label: Some(entry.label.to_string()),
            model3d: Some(Model3dPatch {
                source: Some(ModelSource::Library),
                url: Some(OptPatch::Set(entry.url.to_string())),
                height_cm: entry.height_cm.map(OptPatch::Set),
                ..Model3dPatch::default()
            }),
            ..ElementPatch::default()
        };
        if let Some((w_cm, d_cm)) = entry.footprint_cm {
            overrides.w = Some(w_cm / SCALE_CM_PER_PX);
            overrides.h = Some(d_cm / SCALE_CM_PER_PX);
        }
        self.create_element(ElementType::Furniture, &overrides)
    }

    /// Apply a sparse patch to an element. Unknown ids are dropped with a
    /// warning and no actions.
    pub fn patch_element(&mut self, id: &str, patch: &ElementPatch) -> Vec<Action> {
        let Some(released) = self.scene.apply_patch(id, patch) else {
            tracing::warn!(%id, "patch for unknown element dropped");
            return Vec::new();
        };
        self.release_urls(released);
        vec![
            Action::ElementPatched { id: id.to_string(), patch: patch.clone() },
            Action::RenderNeeded,
        ]
    }

    /// Delete an element. Frees its custom model url, clears a selection
    /// pointing at it, and cancels a gesture targeting it.
    pub fn delete_element(&mut self, id: &str) -> Vec<Action> {
        let was_selected = self.scene.selected_id() == Some(id);
        let Some(removed) = self.scene.remove(id) else {
            return Vec::new();
        };
        if let Some(url) = removed.custom_model_url() {
            self.release_urls(vec![url.to_string()]);
        }
        if self.gesture_targets(id) {
            self.gesture = GestureState::Idle;
        }

        let mut actions = vec![Action::ElementDeleted { id: id.to_string() }];
        if was_selected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Remove every element, freeing custom model urls and resetting the
    /// gesture.
    pub fn clear_scene(&mut self) -> Vec<Action> {
        let had_selection = self.scene.selected_id().is_some();
        let removed = self.scene.clear();
        let urls: Vec<String> = removed
            .iter()
            .filter_map(|e| e.custom_model_url().map(String::from))
            .collect();
        self.release_urls(urls);
        self.gesture = GestureState::Idle;

        let mut actions = vec![Action::SceneCleared];
        if had_selection {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Persistence ---

    /// Replace the scene with a persisted JSON payload, migrating old
    /// schemas. A corrupt payload installs an empty scene. Custom model
    /// urls of the displaced elements are freed.
    pub fn load_scene(&mut self, json: &str) -> Vec<Action> {
        let had_selection = self.scene.selected_id().is_some();
        let elements = migrate::load_scene(json);
        let displaced = self.scene.replace_all(elements);
        let urls: Vec<String> = displaced
            .iter()
            .filter_map(|e| e.custom_model_url().map(String::from))
            .collect();
        self.release_urls(urls);
        self.gesture = GestureState::Idle;

        let mut actions = Vec::new();
        if had_selection {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Serialize the scene to its persisted JSON payload.
    #[must_use]
    pub fn scene_json(&self) -> String {
        migrate::scene_to_json(self.scene.elements())
    }

    // --- Selection / queries ---

    /// Select an element, or clear the selection with `None`. Ids not in
    /// the scene clear it too.
    pub fn set_selection(&mut self, id: Option<ElementId>) -> Vec<Action> {
        if self.scene.select(id) {
            vec![
                Action::SelectionChanged(self.scene.selected_id().map(String::from)),
                Action::RenderNeeded,
            ]
        } else {
            Vec::new()
        }
    }

    /// The currently selected element's id, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&str> {
        self.scene.selected_id()
    }

    /// Look up an element by id.
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&Element> {
        self.scene.get(id)
    }

    // --- Input events ---

    /// Pointer-down in screen coordinates. Primary starts a drag or
    /// resize (or changes the selection), middle starts a pan. Ignored
    /// while a gesture is already active.
    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if !self.gesture.is_idle() {
            return Vec::new();
        }
        match button {
            Button::Primary => self.primary_down(screen_pt),
            Button::Middle => {
                self.gesture = GestureState::Panning { last_screen: screen_pt };
                Vec::new()
            }
            Button::Secondary => Vec::new(),
        }
    }

    /// Pointer-move in screen coordinates; advances the active gesture.
    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        match self.gesture.clone() {
            GestureState::Idle => Vec::new(),
            GestureState::Dragging { id, grab_offset } => {
                self.drag_move(&id, grab_offset, screen_pt)
            }
            GestureState::Resizing { id, corner, orig } => {
                self.resize_move(&id, corner, orig, screen_pt)
            }
            GestureState::Panning { last_screen } => {
                self.viewport.pan(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.gesture = GestureState::Panning { last_screen: screen_pt };
                vec![Action::ViewportChanged, Action::RenderNeeded]
            }
        }
    }

    /// Pointer-up ends the active gesture. Every move already committed
    /// its update, so there is nothing left to emit.
    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button) -> Vec<Action> {
        if !self.gesture.is_idle() {
            self.gesture = GestureState::Idle;
        }
        Vec::new()
    }

    /// Wheel zoom about the cursor. Scrolling up zooms in by one step,
    /// down zooms out; a zero delta is ignored.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta) -> Vec<Action> {
        let factor = if delta.dy < 0.0 {
            ZOOM_STEP
        } else if delta.dy > 0.0 {
            1.0 / ZOOM_STEP
        } else {
            return Vec::new();
        };
        self.viewport.zoom_at(screen_pt, factor);
        vec![Action::ViewportChanged, Action::RenderNeeded]
    }

    fn primary_down(&mut self, screen_pt: Point) -> Vec<Action> {
        let world = self.viewport.to_world(screen_pt);
        match hit_test(world, &self.scene, &self.viewport, self.scene.selected_id()) {
            Some(Hit { id, part: HitPart::ResizeHandle(corner) }) => {
                if let Some(orig) = self.scene.get(&id).map(Element::rect) {
                    self.gesture = GestureState::Resizing { id, corner, orig };
                }
                Vec::new()
            }
            Some(Hit { id, part: HitPart::Body }) => {
                let Some(el) = self.scene.get(&id) else {
                    return Vec::new();
                };
                let grab_offset = Point::new(world.x - el.x, world.y - el.y);
                let actions = self.set_selection(Some(id.clone()));
                self.gesture = GestureState::Dragging { id, grab_offset };
                actions
            }
            None => self.set_selection(None),
        }
    }

    fn drag_move(&mut self, id: &str, grab_offset: Point, screen_pt: Point) -> Vec<Action> {
        let world = self.viewport.to_world(screen_pt);
        let patch = ElementPatch {
            x: Some(snap_to_grid(world.x - grab_offset.x, self.grid_size)),
            y: Some(snap_to_grid(world.y - grab_offset.y, self.grid_size)),
            ..ElementPatch::default()
        };
        self.patch_element(id, &patch)
    }

    /// Recompute the rectangle from the gesture's original rect and the
    /// current cursor. The dragged corner snaps to the grid and the
    /// opposite corner stays pinned; dragging the south-east handle past
    /// the origin flips the rectangle instead of collapsing it.
    fn resize_move(&mut self, id: &str, corner: Corner, orig: Rect, screen_pt: Point) -> Vec<Action> {
        let cur = self.viewport.to_world(screen_pt);
        let grid = self.grid_size;
        let snap = |v: f64| snap_to_grid(v, grid);

        let (mut x, mut y, mut w, mut h) = (orig.x, orig.y, orig.w, orig.h);
        match corner {
            Corner::Nw => {
                x = snap(cur.x.min(orig.right()));
                y = snap(cur.y.min(orig.bottom()));
                w = orig.right() - x;
                h = orig.bottom() - y;
            }
            Corner::Ne => {
                y = snap(cur.y.min(orig.bottom()));
                w = (snap(cur.x) - orig.x).max(0.0);
                h = orig.bottom() - y;
            }
            Corner::Sw => {
                x = snap(cur.x.min(orig.right()));
                w = orig.right() - x;
                h = (snap(cur.y) - orig.y).max(0.0);
            }
            Corner::Se => {
                w = snap(cur.x) - orig.x;
                h = snap(cur.y) - orig.y;
            }
        }
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        w = w.max(grid);
        h = h.max(grid);

        let patch = ElementPatch {
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
            ..ElementPatch::default()
        };
        self.patch_element(id, &patch)
    }

    // --- Internal ---

    fn release_urls(&mut self, urls: Vec<String>) {
        for url in urls {
            if let Err(e) = self.releaser.release(&url) {
                tracing::warn!(error = %e, %url, "custom model release failed");
            }
        }
    }

    /// Whether the active gesture is dragging or resizing `id`.
    fn gesture_targets(&self, id: &str) -> bool {
        match &self.gesture {
            GestureState::Dragging { id: target, .. }
            | GestureState::Resizing { id: target, .. } => target == id,
            GestureState::Idle | GestureState::Panning { .. } => false,
        }
    }
}
