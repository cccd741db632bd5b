//! Resolution of request parameters into object-graph handles.
//!
//! Resolvers compose: a scene lookup is a source lookup plus a kind check, and
//! a scene-item lookup is a scene lookup plus an ID check. Every handle taken
//! along the way is owned by a local binding, so any early return releases it.
//! A successful resolver transfers exactly one reference to the caller.

use serde_json::Value;

use crate::error::{RequestError, ResourceType};
use crate::graph::{ObjectGraph, SceneFilter, SourceKind};
use crate::request::{NumberRange, Request};

impl Request<'_> {
    /// Resolves the string under `key` to a source of any kind.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_string`] failure, and `ResourceNotFound` if no
    /// source has that name.
    pub fn validate_source<G: ObjectGraph>(
        &self,
        graph: &G,
        key: &str,
    ) -> Result<G::Source, RequestError> {
        let name = self.validate_string(key, false)?;
        graph
            .source_by_name(name)
            .ok_or_else(|| self.reject(key, RequestError::source_not_found(name)))
    }

    /// Resolves the string under `key` to a scene or group permitted by
    /// `filter`.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_source`] failure, and `InvalidResourceType` if
    /// the source is not scene-kind or is rejected by `filter`.
    pub fn validate_scene<G: ObjectGraph>(
        &self,
        graph: &G,
        key: &str,
        filter: SceneFilter,
    ) -> Result<G::Source, RequestError> {
        let source = self.validate_source(graph, key)?;
        if graph.source_kind(&source) != SourceKind::Scene {
            return Err(self.reject(key, RequestError::wrong_resource(ResourceType::Scene)));
        }

        let is_group = graph.is_group(&source);
        match filter {
            SceneFilter::SceneOnly if is_group => {
                Err(self.reject(key, RequestError::wrong_resource(ResourceType::Scene)))
            }
            SceneFilter::GroupOnly if !is_group => {
                Err(self.reject(key, RequestError::wrong_resource(ResourceType::Group)))
            }
            _ => Ok(source),
        }
    }

    /// Resolves the string under `key` to an input.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_source`] failure, and `InvalidResourceType` if
    /// the source is not an input.
    pub fn validate_input<G: ObjectGraph>(
        &self,
        graph: &G,
        key: &str,
    ) -> Result<G::Source, RequestError> {
        let source = self.validate_source(graph, key)?;
        if graph.source_kind(&source) != SourceKind::Input {
            return Err(self.reject(key, RequestError::wrong_resource(ResourceType::Input)));
        }
        Ok(source)
    }

    /// Resolves the scene under `scene_key` and the item ID under `item_key`
    /// to a scene item.
    ///
    /// The scene handle is released before this returns, whatever the
    /// outcome; only the scene item handle reaches the caller.
    ///
    /// # Errors
    ///
    /// Any [`Request::validate_scene`] failure, any
    /// [`Request::validate_number`] failure for a non-negative ID, and
    /// `ResourceNotFound` if the scene holds no item with that ID.
    pub fn validate_scene_item<G: ObjectGraph>(
        &self,
        graph: &G,
        scene_key: &str,
        item_key: &str,
        filter: SceneFilter,
    ) -> Result<G::SceneItem, RequestError> {
        let scene = self.validate_scene(graph, scene_key, filter)?;
        let item_id = self.scene_item_id(item_key)?;

        let scene_item = graph.scene_item_by_id(&scene, item_id);
        drop(scene);

        scene_item.ok_or_else(|| {
            let scene_name = self
                .request_data()
                .get(scene_key)
                .and_then(Value::as_str)
                .unwrap_or_default();
            self.reject(
                item_key,
                RequestError::scene_item_not_found(scene_name, item_id),
            )
        })
    }

    /// Reads a non-negative scene item ID, truncating any fractional part.
    fn scene_item_id(&self, key: &str) -> Result<i64, RequestError> {
        let number = self.validate_number(key, NumberRange::at_least(0.0))?;
        let exact = self.request_data().get(key).and_then(Value::as_i64);
        Ok(exact.unwrap_or_else(|| truncate_to_id(number)))
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "scene item IDs are integral; fractional input truncates and oversized input saturates"
)]
const fn truncate_to_id(number: f64) -> i64 {
    number as i64
}

#[cfg(test)]
mod tests {
    use super::truncate_to_id;

    const TRUNCATED: i64 = truncate_to_id(2.9);

    #[test]
    fn item_ids_truncate_in_const_context() {
        assert_eq!(TRUNCATED, 2);
        assert_eq!(truncate_to_id(f64::MAX), i64::MAX);
        assert_eq!(truncate_to_id(0.0), 0);
    }
}
