//! Capability boundary for the host application's object graph.
//!
//! The host owns every source, scene, and scene item; the request layer only
//! looks them up. Lookups hand back handle values that each carry one
//! reference on the underlying object. Dropping a handle releases that
//! reference, so an early return from a resolver can never leak one.

/// Broad category of a source in the host object graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// A producer of audio or video that is neither a scene nor a group.
    Input,
    /// A processing stage attached to another source.
    Filter,
    /// A transition between scenes.
    Transition,
    /// A scene or group: a container of scene items.
    Scene,
}

/// Restricts which scene-kind sources a scene lookup accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SceneFilter {
    /// Plain scenes only; groups are rejected.
    #[default]
    SceneOnly,
    /// Groups only; plain scenes are rejected.
    GroupOnly,
    /// Either a plain scene or a group.
    SceneOrGroup,
}

/// Lookups the request layer performs against the host object graph.
///
/// Implementations must be called from whichever thread the host requires;
/// the request layer never retains a graph reference beyond one call.
pub trait ObjectGraph {
    /// Handle holding one reference on a source. Dropping it releases the
    /// reference; cloning it adds one.
    type Source;

    /// Handle holding one reference on a scene item. Dropping it releases the
    /// reference; cloning it adds one.
    type SceneItem;

    /// Finds a source by its unique name.
    fn source_by_name(&self, name: &str) -> Option<Self::Source>;

    /// Reports the category of a source.
    fn source_kind(&self, source: &Self::Source) -> SourceKind;

    /// Reports whether a scene-kind source is flagged as a group.
    fn is_group(&self, source: &Self::Source) -> bool;

    /// Finds a scene item by ID within a scene-kind source.
    fn scene_item_by_id(&self, scene: &Self::Source, item_id: i64) -> Option<Self::SceneItem>;
}
