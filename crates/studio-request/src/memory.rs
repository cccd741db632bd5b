//! In-memory object graph with observable reference counts.
//!
//! [`MemoryGraph`] implements [`ObjectGraph`] over `Arc`-backed nodes. Every
//! handle it returns is an `Arc` clone, so the strong count of a node minus
//! the graph's own reference equals the number of outstanding handles. Tests
//! and embedders without a native host use it to check reference discipline.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use thiserror::Error;

use crate::graph::{ObjectGraph, SourceKind};

#[derive(Debug)]
struct SourceNode {
    name: String,
    kind: SourceKind,
    group: bool,
}

#[derive(Debug)]
struct SceneItemNode {
    id: i64,
    scene_name: String,
    source_name: String,
}

/// Handle holding one reference on a source in a [`MemoryGraph`].
#[derive(Debug, Clone)]
pub struct SourceRef(Arc<SourceNode>);

impl SourceRef {
    /// Unique name of the source.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.name.as_str()
    }

    /// Category of the source.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.0.kind
    }

    /// Whether the source is a group.
    #[must_use]
    pub fn is_group(&self) -> bool {
        self.0.group
    }
}

/// Handle holding one reference on a scene item in a [`MemoryGraph`].
#[derive(Debug, Clone)]
pub struct SceneItemRef(Arc<SceneItemNode>);

impl SceneItemRef {
    /// ID of the item, unique within its scene.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.0.id
    }

    /// Name of the scene containing the item.
    #[must_use]
    pub fn scene_name(&self) -> &str {
        self.0.scene_name.as_str()
    }

    /// Name of the source the item places.
    #[must_use]
    pub fn source_name(&self) -> &str {
        self.0.source_name.as_str()
    }
}

/// Errors raised while populating a [`MemoryGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryGraphError {
    /// A source with the same name already exists.
    #[error("a source named '{0}' already exists")]
    DuplicateSource(String),
    /// The named source does not exist.
    #[error("no source named '{0}'")]
    UnknownSource(String),
    /// The named source exists but cannot contain scene items.
    #[error("source '{0}' is not a scene or group")]
    NotAScene(String),
    /// The scene already holds an item with the same ID.
    #[error("scene '{scene}' already holds an item with ID {item_id}")]
    DuplicateSceneItem {
        /// Scene holding the existing item.
        scene: String,
        /// Conflicting item ID.
        item_id: i64,
    },
}

/// Object graph held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryGraph {
    sources: HashMap<String, Arc<SourceNode>>,
    scene_items: HashMap<String, Vec<Arc<SceneItemNode>>>,
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input source.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryGraphError::DuplicateSource`] if the name is taken.
    pub fn add_input(&mut self, name: impl Into<String>) -> Result<(), MemoryGraphError> {
        self.add_source(name.into(), SourceKind::Input, false)
    }

    /// Adds a source of an arbitrary kind.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryGraphError::DuplicateSource`] if the name is taken.
    pub fn add_source_of_kind(
        &mut self,
        name: impl Into<String>,
        kind: SourceKind,
    ) -> Result<(), MemoryGraphError> {
        self.add_source(name.into(), kind, false)
    }

    /// Adds a plain scene.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryGraphError::DuplicateSource`] if the name is taken.
    pub fn add_scene(&mut self, name: impl Into<String>) -> Result<(), MemoryGraphError> {
        self.add_source(name.into(), SourceKind::Scene, false)
    }

    /// Adds a group, a scene flagged as nested.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryGraphError::DuplicateSource`] if the name is taken.
    pub fn add_group(&mut self, name: impl Into<String>) -> Result<(), MemoryGraphError> {
        self.add_source(name.into(), SourceKind::Scene, true)
    }

    /// Places an existing source into a scene or group under `item_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if either source is missing, the container is not
    /// scene-kind, or the ID is already used within the container.
    pub fn add_scene_item(
        &mut self,
        scene: &str,
        item_id: i64,
        source: &str,
    ) -> Result<(), MemoryGraphError> {
        let container = self
            .sources
            .get(scene)
            .ok_or_else(|| MemoryGraphError::UnknownSource(scene.to_owned()))?;
        if container.kind != SourceKind::Scene {
            return Err(MemoryGraphError::NotAScene(scene.to_owned()));
        }
        if !self.sources.contains_key(source) {
            return Err(MemoryGraphError::UnknownSource(source.to_owned()));
        }

        let items = self.scene_items.entry(scene.to_owned()).or_default();
        if items.iter().any(|item| item.id == item_id) {
            return Err(MemoryGraphError::DuplicateSceneItem {
                scene: scene.to_owned(),
                item_id,
            });
        }
        items.push(Arc::new(SceneItemNode {
            id: item_id,
            scene_name: scene.to_owned(),
            source_name: source.to_owned(),
        }));
        Ok(())
    }

    /// Number of outstanding handles on a source, or `None` if it is unknown.
    #[must_use]
    pub fn source_references(&self, name: &str) -> Option<usize> {
        self.sources
            .get(name)
            .map(|node| Arc::strong_count(node).saturating_sub(1))
    }

    /// Number of outstanding handles on a scene item, or `None` if it is
    /// unknown.
    #[must_use]
    pub fn scene_item_references(&self, scene: &str, item_id: i64) -> Option<usize> {
        self.find_scene_item(scene, item_id)
            .map(|node| Arc::strong_count(node).saturating_sub(1))
    }

    fn add_source(
        &mut self,
        name: String,
        kind: SourceKind,
        group: bool,
    ) -> Result<(), MemoryGraphError> {
        match self.sources.entry(name) {
            Entry::Occupied(entry) => Err(MemoryGraphError::DuplicateSource(entry.key().clone())),
            Entry::Vacant(entry) => {
                let key = entry.key().clone();
                entry.insert(Arc::new(SourceNode {
                    name: key,
                    kind,
                    group,
                }));
                Ok(())
            }
        }
    }

    fn find_scene_item(&self, scene: &str, item_id: i64) -> Option<&Arc<SceneItemNode>> {
        self.scene_items
            .get(scene)?
            .iter()
            .find(|item| item.id == item_id)
    }
}

impl ObjectGraph for MemoryGraph {
    type Source = SourceRef;
    type SceneItem = SceneItemRef;

    fn source_by_name(&self, name: &str) -> Option<SourceRef> {
        self.sources.get(name).map(|node| SourceRef(Arc::clone(node)))
    }

    fn source_kind(&self, source: &SourceRef) -> SourceKind {
        source.kind()
    }

    fn is_group(&self, source: &SourceRef) -> bool {
        source.is_group()
    }

    fn scene_item_by_id(&self, scene: &SourceRef, item_id: i64) -> Option<SceneItemRef> {
        self.find_scene_item(scene.name(), item_id)
            .map(|node| SceneItemRef(Arc::clone(node)))
    }
}
