//! Scene geometry engine for an interactive floor-plan editor.
//!
//! This crate is the headless core of a floor-plan editor: it owns the scene
//! data model (placed elements with their wall and 3D-model settings),
//! viewport pan/zoom math, grid snapping, partial-wall segment geometry, and
//! the pointer/wheel gesture state machine. The host layer (a 2D plan view
//! and a 3D preview) is responsible only for feeding input events into
//! [`engine::EditorCore`] and drawing from the resulting state and
//! [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level editor core: gestures plus scene-level operations |
//! | [`scene`] | Element data model, sparse patches, and the scene store |
//! | [`walls`] | Per-side wall configuration and partial-wall segments |
//! | [`migrate`] | Persisted-scene migration and the JSON codec |
//! | [`viewport`] | Pan/zoom viewport and coordinate conversions |
//! | [`snap`] | Grid snapping |
//! | [`hit`] | Hit-testing element bodies and resize handles |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`catalog`] | Built-in furniture model library |
//! | [`resources`] | Release hook for ephemeral model resources |
//! | [`coerce`] | Coerce-or-default helpers for untrusted input |
//! | [`consts`] | Shared numeric constants (grid sizes, zoom limits, etc.) |

pub mod catalog;
pub mod coerce;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod migrate;
pub mod resources;
pub mod scene;
pub mod snap;
pub mod viewport;
pub mod walls;
