//! Scene persistence: JSON load/save with schema migration.
//!
//! Persisted scenes are JSON arrays of element records. Older saves predate
//! per-side wall configs (modules carried boolean `wallN`..`wallW` flags)
//! and furniture 3D-model settings; [`migrate_element`] lifts any
//! historical record to the current schema at the JSON level, preserving
//! unrecognized fields verbatim. Migration is idempotent: migrating a
//! current record changes nothing. The typed layer
//! ([`element_from_value`] / [`element_to_value`]) converts between
//! migrated records and [`Element`], and [`load_scene`] / [`scene_to_json`]
//! wrap the whole pipeline for host callers.
//!
//! Loading is lenient by policy: a corrupt payload yields an empty scene
//! and malformed entries are skipped, each with a warning, so one bad
//! record never takes the whole floor plan down.

#[cfg(test)]
#[path = "migrate_test.rs"]
mod migrate_test;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::warn;

use crate::coerce::{bool_or, num_or, positive_num_or, str_or};
use crate::scene::{Element, ElementId, ElementKind, ElementType, Model3d, ModelSource};
use crate::walls::{Side, WallConfig, Walls};

/// Fields the engine owns on a persisted record. Everything else is
/// carried through load/save untouched.
const CANONICAL_KEYS: [&str; 11] = [
    "id", "type", "x", "y", "w", "h", "rot", "label", "color", "walls", "model3d",
];

/// Boolean wall flags used by pre-`walls` saves.
const LEGACY_WALL_FLAGS: [(&str, Side); 4] = [
    ("wallN", Side::North),
    ("wallS", Side::South),
    ("wallE", Side::East),
    ("wallW", Side::West),
];

// --- JSON-level migration ---

/// Lift one persisted record to the current schema.
///
/// Modules get a normalized `walls` object (synthesized from the legacy
/// boolean flags when absent); non-modules get a `model3d` object with
/// missing fields filled from defaults. Position and extent are repaired
/// to finite numbers. The `id` and all unrecognized fields — the legacy
/// flags included — pass through verbatim. Non-object values are returned
/// unchanged.
#[must_use]
pub fn migrate_element(value: &Value) -> Value {
    let Some(obj) = value.as_object() else {
        return value.clone();
    };
    let mut out = obj.clone();

    let ty = ElementType::parse(obj.get("type").and_then(Value::as_str));
    if ty.is_module() {
        out.insert("walls".to_string(), to_value_or_null(&migrated_walls(obj)));
    } else {
        let mut model = obj.get("model3d").and_then(Value::as_object).cloned().unwrap_or_default();
        for (key, default) in model3d_defaults() {
            model.entry(key).or_insert(default);
        }
        out.insert("model3d".to_string(), Value::Object(model));
    }

    out.insert("x".to_string(), Value::from(num_or(obj.get("x"), 0.0)));
    out.insert("y".to_string(), Value::from(num_or(obj.get("y"), 0.0)));
    out.insert("w".to_string(), Value::from(positive_num_or(obj.get("w"), 1.0)));
    out.insert("h".to_string(), Value::from(positive_num_or(obj.get("h"), 1.0)));
    out.insert("rot".to_string(), Value::from(num_or(obj.get("rot"), 0.0)));
    Value::Object(out)
}

/// Migrate a whole scene value. Non-array payloads yield an empty scene;
/// non-object entries are dropped.
#[must_use]
pub fn migrate_scene(value: &Value) -> Vec<Value> {
    let Some(items) = value.as_array() else {
        return Vec::new();
    };
    items.iter().filter(|v| v.is_object()).map(migrate_element).collect()
}

/// Wall configs for a module record, either from a present `walls` object
/// (absent or malformed sides read as full walls) or synthesized from the
/// legacy boolean flags, where only a genuine JSON `true` enables a side.
fn migrated_walls(obj: &Map<String, Value>) -> Walls {
    let mut walls = Walls::full();
    if let Some(walls_obj) = obj.get("walls").and_then(Value::as_object) {
        for side in Side::ALL {
            *walls.side_mut(side) = match walls_obj.get(side.key()).and_then(Value::as_object) {
                Some(cfg) => WallConfig {
                    enabled: bool_or(cfg.get("enabled"), true),
                    pct: num_or(cfg.get("pct"), 100.0),
                    offset: num_or(cfg.get("offset"), 0.0),
                }
                .normalized(),
                None => WallConfig::full(),
            };
        }
    } else {
        for (flag, side) in LEGACY_WALL_FLAGS {
            *walls.side_mut(side) = if bool_or(obj.get(flag), false) {
                WallConfig::full()
            } else {
                WallConfig::disabled()
            };
        }
    }
    walls
}

/// 3D-model settings parsed from a `model3d` value, with every missing or
/// malformed field read as its default.
fn migrated_model3d(value: Option<&Value>) -> Model3d {
    let obj = value.and_then(Value::as_object);
    let field = |key: &str| obj.and_then(|o| o.get(key));
    let mut model = Model3d {
        source: ModelSource::parse(field("type").and_then(Value::as_str)),
        url: field("url").and_then(Value::as_str).map(String::from),
        scale: num_or(field("scale"), 1.0),
        rotation_y: num_or(field("rotationY"), 0.0),
        fit_footprint: bool_or(field("fitFootprint"), true),
        height_cm: field("heightCm").and_then(Value::as_f64),
        offset_y: num_or(field("offsetY"), 0.0),
    };
    model.normalize();
    model
}

fn model3d_defaults() -> Map<String, Value> {
    let mut defaults = Map::new();
    defaults.insert("type".to_string(), Value::from("default"));
    defaults.insert("url".to_string(), Value::Null);
    defaults.insert("scale".to_string(), Value::from(1.0));
    defaults.insert("rotationY".to_string(), Value::from(0.0));
    defaults.insert("fitFootprint".to_string(), Value::from(true));
    defaults.insert("heightCm".to_string(), Value::Null);
    defaults.insert("offsetY".to_string(), Value::from(0.0));
    defaults
}

// --- typed conversion ---

/// Parse one persisted record into an [`Element`], migrating first.
///
/// Returns `None` when the value is not an object or has no usable id
/// (string, or number which is stringified). Unknown `type` strings read
/// as generic furniture; unrecognized fields land in [`Element::extra`].
#[must_use]
pub fn element_from_value(value: &Value) -> Option<Element> {
    let migrated = migrate_element(value);
    let obj = migrated.as_object()?;
    let id = element_id(obj.get("id"))?;

    let ty = ElementType::parse(obj.get("type").and_then(Value::as_str));
    let kind = if ty.is_module() {
        ElementKind::Module { walls: migrated_walls(obj) }
    } else {
        let model3d = migrated_model3d(obj.get("model3d"));
        match ty {
            ElementType::Sofa => ElementKind::Sofa { model3d },
            ElementType::Table => ElementKind::Table { model3d },
            ElementType::Chair => ElementKind::Chair { model3d },
            ElementType::Bed => ElementKind::Bed { model3d },
            _ => ElementKind::Furniture { model3d },
        }
    };

    let d = ty.defaults();
    let mut element = Element {
        id,
        kind,
        x: num_or(obj.get("x"), 0.0),
        y: num_or(obj.get("y"), 0.0),
        w: positive_num_or(obj.get("w"), 1.0),
        h: positive_num_or(obj.get("h"), 1.0),
        rot: num_or(obj.get("rot"), 0.0),
        label: str_or(obj.get("label"), d.label),
        color: str_or(obj.get("color"), d.color),
        extra: obj
            .iter()
            .filter(|(k, _)| !CANONICAL_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect(),
    };
    element.normalize();
    Some(element)
}

/// Serialize an element to its persisted record, re-attaching the
/// carried-through extra fields.
#[must_use]
pub fn element_to_value(element: &Element) -> Value {
    let mut obj = element.extra.clone();
    obj.insert("id".to_string(), Value::from(element.id.clone()));
    obj.insert("type".to_string(), Value::from(element.element_type().as_str()));
    obj.insert("x".to_string(), Value::from(element.x));
    obj.insert("y".to_string(), Value::from(element.y));
    obj.insert("w".to_string(), Value::from(element.w));
    obj.insert("h".to_string(), Value::from(element.h));
    obj.insert("rot".to_string(), Value::from(element.rot));
    obj.insert("label".to_string(), Value::from(element.label.clone()));
    obj.insert("color".to_string(), Value::from(element.color.clone()));
    match &element.kind {
        ElementKind::Module { walls } => {
            obj.insert("walls".to_string(), to_value_or_null(walls));
        }
        ElementKind::Sofa { model3d }
        | ElementKind::Table { model3d }
        | ElementKind::Chair { model3d }
        | ElementKind::Bed { model3d }
        | ElementKind::Furniture { model3d } => {
            obj.insert("model3d".to_string(), to_value_or_null(model3d));
        }
    }
    Value::Object(obj)
}

fn element_id(value: Option<&Value>) -> Option<ElementId> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn to_value_or_null<T: Serialize>(value: &T) -> Value {
    // only string-keyed structs pass through here, so this cannot fail
    serde_json::to_value(value).unwrap_or(Value::Null)
}

// --- host-facing API ---

/// Parse a persisted scene payload into elements, migrating every record.
///
/// Corrupt JSON or a non-array payload yields an empty scene; entries
/// without a usable id are skipped. Each drop is logged.
#[must_use]
pub fn load_scene(json: &str) -> Vec<Element> {
    let value: Value = match serde_json::from_str(json) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "scene payload is not valid JSON; loading empty scene");
            return Vec::new();
        }
    };
    let Some(items) = value.as_array() else {
        warn!("scene payload is not an array; loading empty scene");
        return Vec::new();
    };
    let mut elements = Vec::with_capacity(items.len());
    for item in items {
        match element_from_value(item) {
            Some(el) => elements.push(el),
            None => warn!("skipping scene entry without an object shape or usable id"),
        }
    }
    elements
}

/// Serialize a scene to its persisted JSON payload.
#[must_use]
pub fn scene_to_json(elements: &[Element]) -> String {
    let records: Vec<Value> = elements.iter().map(element_to_value).collect();
    Value::Array(records).to_string()
}
