//! Built-in 3D model library.
//!
//! A static table of bundled furniture models the host can offer in a
//! picker. Entries carry enough metadata to size the placed element
//! ([`ModelEntry::footprint_cm`]) and the rendered model
//! ([`ModelEntry::height_cm`]) without loading the asset.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

/// One bundled model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelEntry {
    /// Stable catalog id.
    pub id: &'static str,
    /// Display name for pickers.
    pub label: &'static str,
    /// Asset path, bundled with the host.
    pub url: &'static str,
    /// Real-world footprint (width, depth) in centimeters, used to size
    /// the placed element. `None` leaves the element at its type default.
    pub footprint_cm: Option<(f64, f64)>,
    /// Real-world height in centimeters.
    pub height_cm: Option<f64>,
}

/// The bundled models, in picker order.
pub const MODEL_LIBRARY: [ModelEntry; 3] = [
    ModelEntry {
        id: "chair",
        label: "Chair",
        url: "/models/chair.glb",
        footprint_cm: Some((60.0, 60.0)),
        height_cm: Some(90.0),
    },
    ModelEntry {
        id: "sofa",
        label: "Sofa",
        url: "/models/sofa.glb",
        footprint_cm: Some((200.0, 90.0)),
        height_cm: Some(80.0),
    },
    ModelEntry {
        id: "table",
        label: "Table",
        url: "/models/table.glb",
        footprint_cm: Some((180.0, 90.0)),
        height_cm: Some(75.0),
    },
];

/// Look up a catalog entry by id.
#[must_use]
pub fn entry_by_id(id: &str) -> Option<&'static ModelEntry> {
    MODEL_LIBRARY.iter().find(|e| e.id == id)
}

/// Look up a catalog entry by asset url.
#[must_use]
pub fn entry_by_url(url: &str) -> Option<&'static ModelEntry> {
    MODEL_LIBRARY.iter().find(|e| e.url == url)
}
