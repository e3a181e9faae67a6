//! Scene model: placed elements, sparse patches, and the scene store.
//!
//! An [`Element`] is one rectangle on the floor plan plus a type-specific
//! payload: room modules carry wall configuration, furniture carries
//! 3D-model settings — never both ([`ElementKind`] fixes the pairing at
//! construction). [`ElementPatch`] is the sparse-update type every mutation
//! funnels through; after a merge the element is re-normalized so the
//! at-rest invariants (positive extent, finite numerics, zero-coverage
//! walls disabled) hold whatever the patch contained. [`SceneStore`] owns
//! the live elements in stacking order along with the selection.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::coerce::{finite_or, size_or};
use crate::viewport::Point;
use crate::walls::{WallConfig, Walls};

/// Unique identifier for a placed element.
///
/// Persisted scenes may carry ids of any historical shape, so this is a
/// free-form string; ids minted by the engine are `"<type>_<uuid>"`.
pub type ElementId = String;

/// The placeable element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    /// Room module with configurable walls.
    Module,
    Sofa,
    Table,
    Chair,
    Bed,
    /// Catch-all furniture piece; also the fallback for unknown persisted types.
    Furniture,
}

impl ElementType {
    /// The persisted `type` string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ElementType::Module => "module",
            ElementType::Sofa => "sofa",
            ElementType::Table => "table",
            ElementType::Chair => "chair",
            ElementType::Bed => "bed",
            ElementType::Furniture => "furniture",
        }
    }

    /// Parse a persisted `type` string. Unknown or missing types read as
    /// generic furniture rather than failing the element.
    #[must_use]
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("module") => ElementType::Module,
            Some("sofa") => ElementType::Sofa,
            Some("table") => ElementType::Table,
            Some("chair") => ElementType::Chair,
            Some("bed") => ElementType::Bed,
            _ => ElementType::Furniture,
        }
    }

    #[must_use]
    pub fn is_module(self) -> bool {
        matches!(self, ElementType::Module)
    }

    /// Creation defaults for this type.
    #[must_use]
    pub fn defaults(self) -> ElementDefaults {
        match self {
            ElementType::Module => ElementDefaults { w: 400.0, h: 300.0, color: "#d0d0d0", label: "Module" },
            ElementType::Sofa => ElementDefaults { w: 200.0, h: 90.0, color: "#c58c72", label: "Sofa" },
            ElementType::Table => ElementDefaults { w: 180.0, h: 90.0, color: "#a3c5d9", label: "Table" },
            ElementType::Chair => ElementDefaults { w: 60.0, h: 60.0, color: "#b5b5b5", label: "Chair" },
            ElementType::Bed => ElementDefaults { w: 200.0, h: 150.0, color: "#9fc59f", label: "Bed" },
            ElementType::Furniture => ElementDefaults { w: 100.0, h: 100.0, color: "#c9c9c9", label: "Furniture" },
        }
    }
}

/// Per-type creation defaults.
#[derive(Debug, Clone, Copy)]
pub struct ElementDefaults {
    pub w: f64,
    pub h: f64,
    pub color: &'static str,
    pub label: &'static str,
}

/// Where a furniture piece's 3D model comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelSource {
    /// Procedural placeholder box.
    Default,
    /// Host-provided ephemeral reference (an object URL for an upload).
    Custom,
    /// Entry from the built-in model catalog.
    Library,
}

impl ModelSource {
    /// Parse a persisted source string; unknown values read as [`ModelSource::Default`].
    #[must_use]
    pub fn parse(s: Option<&str>) -> Self {
        match s {
            Some("custom") => ModelSource::Custom,
            Some("library") => ModelSource::Library,
            _ => ModelSource::Default,
        }
    }
}

/// 3D-model settings carried by furniture elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model3d {
    /// Where the model comes from; persisted as `type`.
    #[serde(rename = "type")]
    pub source: ModelSource,
    /// Asset url: a catalog path, or an ephemeral reference for custom
    /// uploads. Custom urls are released through
    /// [`crate::resources::ResourceReleaser`] when displaced.
    pub url: Option<String>,
    /// Uniform scale multiplier.
    pub scale: f64,
    /// Yaw in degrees applied in the 3D view; persisted as `rotationY`.
    #[serde(rename = "rotationY")]
    pub rotation_y: f64,
    /// Stretch the model to the element footprint; persisted as `fitFootprint`.
    #[serde(rename = "fitFootprint")]
    pub fit_footprint: bool,
    /// Real-world height override in centimeters; persisted as `heightCm`.
    #[serde(rename = "heightCm")]
    pub height_cm: Option<f64>,
    /// Vertical offset in world units; persisted as `offsetY`.
    #[serde(rename = "offsetY")]
    pub offset_y: f64,
}

impl Default for Model3d {
    fn default() -> Self {
        Self {
            source: ModelSource::Default,
            url: None,
            scale: 1.0,
            rotation_y: 0.0,
            fit_footprint: true,
            height_cm: None,
            offset_y: 0.0,
        }
    }
}

impl Model3d {
    /// Sanitize numeric fields in place; non-finite values fall back to
    /// their defaults.
    pub fn normalize(&mut self) {
        self.scale = finite_or(self.scale, 1.0);
        self.rotation_y = finite_or(self.rotation_y, 0.0);
        self.offset_y = finite_or(self.offset_y, 0.0);
        if self.height_cm.is_some_and(|h| !h.is_finite()) {
            self.height_cm = None;
        }
    }
}

/// Type-specific payload of an element.
///
/// Modules carry wall configuration and never a 3D model; furniture carries
/// 3D-model settings and never walls.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementKind {
    Module { walls: Walls },
    Sofa { model3d: Model3d },
    Table { model3d: Model3d },
    Chair { model3d: Model3d },
    Bed { model3d: Model3d },
    Furniture { model3d: Model3d },
}

impl ElementKind {
    /// The payload a newly created element of `ty` starts with: modules get
    /// four fully enabled walls, furniture gets default model settings.
    #[must_use]
    pub fn seeded(ty: ElementType) -> Self {
        match ty {
            ElementType::Module => ElementKind::Module { walls: Walls::full() },
            ElementType::Sofa => ElementKind::Sofa { model3d: Model3d::default() },
            ElementType::Table => ElementKind::Table { model3d: Model3d::default() },
            ElementType::Chair => ElementKind::Chair { model3d: Model3d::default() },
            ElementType::Bed => ElementKind::Bed { model3d: Model3d::default() },
            ElementType::Furniture => ElementKind::Furniture { model3d: Model3d::default() },
        }
    }

    /// The element type this payload belongs to.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        match self {
            ElementKind::Module { .. } => ElementType::Module,
            ElementKind::Sofa { .. } => ElementType::Sofa,
            ElementKind::Table { .. } => ElementType::Table,
            ElementKind::Chair { .. } => ElementType::Chair,
            ElementKind::Bed { .. } => ElementType::Bed,
            ElementKind::Furniture { .. } => ElementType::Furniture,
        }
    }

    /// Wall configuration, when this is a module.
    #[must_use]
    pub fn walls(&self) -> Option<&Walls> {
        match self {
            ElementKind::Module { walls } => Some(walls),
            _ => None,
        }
    }

    /// Mutable wall configuration, when this is a module.
    pub fn walls_mut(&mut self) -> Option<&mut Walls> {
        match self {
            ElementKind::Module { walls } => Some(walls),
            _ => None,
        }
    }

    /// 3D-model settings, when this is furniture.
    #[must_use]
    pub fn model3d(&self) -> Option<&Model3d> {
        match self {
            ElementKind::Module { .. } => None,
            ElementKind::Sofa { model3d }
            | ElementKind::Table { model3d }
            | ElementKind::Chair { model3d }
            | ElementKind::Bed { model3d }
            | ElementKind::Furniture { model3d } => Some(model3d),
        }
    }

    /// Mutable 3D-model settings, when this is furniture.
    pub fn model3d_mut(&mut self) -> Option<&mut Model3d> {
        match self {
            ElementKind::Module { .. } => None,
            ElementKind::Sofa { model3d }
            | ElementKind::Table { model3d }
            | ElementKind::Chair { model3d }
            | ElementKind::Bed { model3d }
            | ElementKind::Furniture { model3d } => Some(model3d),
        }
    }
}

/// An axis-aligned rectangle in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    /// X of the right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    /// Y of the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Whether `pt` lies inside, edges inclusive.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.w && pt.y >= self.y && pt.y <= self.y + self.h
    }
}

/// A placed element: one rectangle on the floor plan plus its type payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Stable identifier, assigned at creation and never reused.
    pub id: ElementId,
    /// Type-specific payload (walls or 3D-model settings).
    pub kind: ElementKind,
    /// Left edge in world coordinates.
    pub x: f64,
    /// Top edge in world coordinates.
    pub y: f64,
    /// Width in world units; positive at rest.
    pub w: f64,
    /// Height in world units; positive at rest.
    pub h: f64,
    /// Clockwise rotation in degrees about the rectangle center.
    pub rot: f64,
    /// Display label.
    pub label: String,
    /// Fill color as a CSS color string.
    pub color: String,
    /// Unrecognized persisted fields, retained verbatim for load/save
    /// round-tripping (legacy per-side wall flags land here).
    pub extra: Map<String, Value>,
}

impl Element {
    /// Build an element of `ty` with the per-type creation defaults, placed
    /// at the origin.
    #[must_use]
    pub fn new(id: ElementId, ty: ElementType) -> Self {
        let d = ty.defaults();
        Self {
            id,
            kind: ElementKind::seeded(ty),
            x: 0.0,
            y: 0.0,
            w: d.w,
            h: d.h,
            rot: 0.0,
            label: d.label.to_string(),
            color: d.color.to_string(),
            extra: Map::new(),
        }
    }

    /// The element's type tag.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.kind.element_type()
    }

    /// Wall configuration, when this is a module.
    #[must_use]
    pub fn walls(&self) -> Option<&Walls> {
        self.kind.walls()
    }

    /// 3D-model settings, when this is furniture.
    #[must_use]
    pub fn model3d(&self) -> Option<&Model3d> {
        self.kind.model3d()
    }

    /// The element's unrotated bounding rectangle.
    #[must_use]
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    /// The ephemeral custom model url, when this furniture carries one.
    #[must_use]
    pub fn custom_model_url(&self) -> Option<&str> {
        let model = self.kind.model3d()?;
        if model.source == ModelSource::Custom {
            model.url.as_deref()
        } else {
            None
        }
    }

    /// Re-establish the at-rest invariants after a mutation: finite
    /// position and rotation, positive extent, normalized walls and model
    /// settings.
    pub fn normalize(&mut self) {
        self.x = finite_or(self.x, 0.0);
        self.y = finite_or(self.y, 0.0);
        self.rot = finite_or(self.rot, 0.0);
        self.w = size_or(self.w, 1.0);
        self.h = size_or(self.h, 1.0);
        match &mut self.kind {
            ElementKind::Module { walls } => *walls = walls.normalized(),
            ElementKind::Sofa { model3d }
            | ElementKind::Table { model3d }
            | ElementKind::Chair { model3d }
            | ElementKind::Bed { model3d }
            | ElementKind::Furniture { model3d } => model3d.normalize(),
        }
    }

    /// Merge a sparse patch, then re-normalize. Returns the custom model
    /// urls displaced by the patch, for the caller to release.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> Vec<String> {
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(w) = patch.w {
            self.w = w;
        }
        if let Some(h) = patch.h {
            self.h = h;
        }
        if let Some(rot) = patch.rot {
            self.rot = rot;
        }
        if let Some(ref label) = patch.label {
            self.label.clone_from(label);
        }
        if let Some(ref color) = patch.color {
            self.color.clone_from(color);
        }

        let mut released = Vec::new();
        if let Some(ref wp) = patch.walls {
            if let Some(walls) = self.kind.walls_mut() {
                wp.apply(walls);
            }
        }
        if let Some(ref mp) = patch.model3d {
            if let Some(model) = self.kind.model3d_mut() {
                let was_custom = model.source == ModelSource::Custom;
                let url_before = model.url.clone();
                mp.apply(model);
                if was_custom && model.url != url_before {
                    if let Some(url) = url_before {
                        released.push(url);
                    }
                }
            }
        }
        self.normalize();
        released
    }
}

/// Sparse update for an element. Only present fields are applied; the
/// element is re-normalized after the merge, so the at-rest invariants hold
/// whatever the patch contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub rot: Option<f64>,
    pub label: Option<String>,
    pub color: Option<String>,
    /// Per-side wall updates; ignored unless the element is a module.
    pub walls: Option<WallsPatch>,
    /// 3D-model updates; ignored unless the element is furniture.
    pub model3d: Option<Model3dPatch>,
}

/// Per-side sparse wall updates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallsPatch {
    pub n: Option<WallPatch>,
    pub s: Option<WallPatch>,
    pub e: Option<WallPatch>,
    pub w: Option<WallPatch>,
}

impl WallsPatch {
    fn apply(&self, walls: &mut Walls) {
        if let Some(p) = self.n {
            p.apply(&mut walls.n);
        }
        if let Some(p) = self.s {
            p.apply(&mut walls.s);
        }
        if let Some(p) = self.e {
            p.apply(&mut walls.e);
        }
        if let Some(p) = self.w {
            p.apply(&mut walls.w);
        }
    }
}

/// Sparse update for a single wall side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallPatch {
    pub enabled: Option<bool>,
    pub pct: Option<f64>,
    pub offset: Option<f64>,
}

impl WallPatch {
    fn apply(self, cfg: &mut WallConfig) {
        if let Some(enabled) = self.enabled {
            cfg.enabled = enabled;
        }
        if let Some(pct) = self.pct {
            cfg.pct = pct;
        }
        if let Some(offset) = self.offset {
            cfg.offset = offset;
        }
    }
}

/// Set or clear an optional field.
#[derive(Debug, Clone, PartialEq)]
pub enum OptPatch<T> {
    Set(T),
    Clear,
}

/// Sparse update for furniture 3D-model settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model3dPatch {
    pub source: Option<ModelSource>,
    pub url: Option<OptPatch<String>>,
    pub scale: Option<f64>,
    pub rotation_y: Option<f64>,
    pub fit_footprint: Option<bool>,
    pub height_cm: Option<OptPatch<f64>>,
    pub offset_y: Option<f64>,
}

impl Model3dPatch {
    fn apply(&self, model: &mut Model3d) {
        if let Some(source) = self.source {
            model.source = source;
        }
        match self.url {
            Some(OptPatch::Set(ref url)) => model.url = Some(url.clone()),
            Some(OptPatch::Clear) => model.url = None,
            None => {}
        }
        if let Some(scale) = self.scale {
            model.scale = scale;
        }
        if let Some(rotation_y) = self.rotation_y {
            model.rotation_y = rotation_y;
        }
        if let Some(fit) = self.fit_footprint {
            model.fit_footprint = fit;
        }
        match self.height_cm {
            Some(OptPatch::Set(h)) => model.height_cm = Some(h),
            Some(OptPatch::Clear) => model.height_cm = None,
            None => {}
        }
        if let Some(offset_y) = self.offset_y {
            model.offset_y = offset_y;
        }
    }
}

/// In-memory scene: placed elements in insertion order (which is stacking
/// order, later entries on top) plus the current selection.
pub struct SceneStore {
    elements: Vec<Element>,
    selected: Option<ElementId>,
}

impl SceneStore {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new(), selected: None }
    }

    /// All elements in stacking order (index 0 at the bottom).
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Look up an element by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Append an element on top of the stack.
    pub fn insert(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Apply a sparse patch to an existing element. Returns `None` when no
    /// element has this id; otherwise the custom model urls displaced by
    /// the patch.
    pub fn apply_patch(&mut self, id: &str, patch: &ElementPatch) -> Option<Vec<String>> {
        let element = self.elements.iter_mut().find(|e| e.id == id)?;
        Some(element.apply_patch(patch))
    }

    /// Remove an element by id, returning it if present. Clears the
    /// selection when it pointed at the removed element.
    pub fn remove(&mut self, id: &str) -> Option<Element> {
        let idx = self.elements.iter().position(|e| e.id == id)?;
        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        Some(self.elements.remove(idx))
    }

    /// Replace the whole scene, returning the displaced elements. The
    /// selection is cleared.
    pub fn replace_all(&mut self, elements: Vec<Element>) -> Vec<Element> {
        self.selected = None;
        std::mem::replace(&mut self.elements, elements)
    }

    /// Remove every element, returning them. The selection is cleared.
    pub fn clear(&mut self) -> Vec<Element> {
        self.replace_all(Vec::new())
    }

    /// Select `id`, or clear with `None`. Ids not present in the scene
    /// clear the selection instead. Returns `true` when the selection
    /// actually changed.
    pub fn select(&mut self, id: Option<ElementId>) -> bool {
        let next = id.filter(|i| self.get(i).is_some());
        if next == self.selected {
            false
        } else {
            self.selected = next;
            true
        }
    }

    /// The selected element's id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// The selected element, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&Element> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Number of elements in the scene.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` when the scene holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl Default for SceneStore {
    fn default() -> Self {
        Self::new()
    }
}
