//! Typed parameter validation for remote calls into a live studio.
//!
//! A client session delivers `(request_type, request_data)` pairs. Before a
//! handler acts on one it needs typed values and live handles on the host's
//! object graph: sources, scenes, and scene items. This crate provides that
//! view through [`Request`].
//!
//! # Layers
//!
//! - [`Request::validate_basic`] checks presence.
//! - Scalar checks ([`Request::validate_number`], [`Request::validate_string`],
//!   [`Request::validate_boolean`]) and container checks
//!   ([`Request::validate_object`], [`Request::validate_array`]) check shape.
//! - Resolvers ([`Request::validate_source`], [`Request::validate_scene`],
//!   [`Request::validate_input`], [`Request::validate_scene_item`]) look names
//!   up through an [`ObjectGraph`].
//!
//! Every check returns `Result<_, RequestError>`; a failure carries one
//! [`RequestStatus`] and a message naming the offending key.
//!
//! # Handle ownership
//!
//! Resolvers return graph handles that each hold one reference. Dropping the
//! handle releases it. [`MemoryGraph`] provides an in-memory graph whose
//! reference counts can be inspected.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use studio_request::{MemoryGraph, NumberRange, Request, SceneFilter, SessionState};
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_scene("Main").unwrap();
//!
//! let session = SessionState::default();
//! let request = Request::new(
//!     &session,
//!     "SetSceneItemIndex",
//!     json!({"sceneName": "Main", "sceneItemIndex": 2}),
//! );
//!
//! let scene = request.validate_scene(&graph, "sceneName", SceneFilter::SceneOnly).unwrap();
//! assert_eq!(scene.name(), "Main");
//!
//! let index = request.validate_number("sceneItemIndex", NumberRange::at_least(0.0)).unwrap();
//! assert_eq!(index, 2.0);
//! ```

mod error;
mod graph;
mod memory;
mod request;
mod resolve;
mod session;
mod status;
pub mod telemetry;

pub use error::RequestError;
pub use graph::{ObjectGraph, SceneFilter, SourceKind};
pub use memory::{MemoryGraph, MemoryGraphError, SceneItemRef, SourceRef};
pub use request::{NumberRange, Request};
pub use session::{Session, SessionState};
pub use status::RequestStatus;

#[cfg(test)]
mod tests;
