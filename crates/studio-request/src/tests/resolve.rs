//! Entity resolution against the in-memory graph.

use rstest::rstest;
use serde_json::{Value, json};

use super::support::{assert_rejected, studio};
use crate::{
    MemoryGraph, ObjectGraph, Request, RequestStatus, SceneFilter, SessionState, SourceKind,
};

fn session() -> SessionState {
    SessionState::default()
}

#[rstest]
fn source_resolves_with_one_reference(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(&session, "GetSourceActive", json!({"sourceName": "Camera"}));

    let source = request
        .validate_source(&studio, "sourceName")
        .expect("Camera exists");
    assert_eq!(source.name(), "Camera");
    assert_eq!(studio.source_references("Camera"), Some(1));

    drop(source);
    assert_eq!(studio.source_references("Camera"), Some(0));
}

#[rstest]
fn unknown_source_is_not_found(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(&session, "GetSourceActive", json!({"x": "nonexistent"}));

    assert_rejected(
        request.validate_source(&studio, "x"),
        RequestStatus::ResourceNotFound,
        &["nonexistent"],
    );
}

#[rstest]
#[case(json!({}), RequestStatus::MissingRequestParameter)]
#[case(json!({"x": 3}), RequestStatus::InvalidRequestParameterType)]
#[case(json!({"x": ""}), RequestStatus::RequestParameterEmpty)]
fn source_propagates_string_failures(
    studio: MemoryGraph,
    #[case] payload: Value,
    #[case] status: RequestStatus,
) {
    let session = session();
    let request = Request::new(&session, "GetSourceActive", payload);

    assert_rejected(request.validate_source(&studio, "x"), status, &["`x`"]);
}

#[rstest]
#[case("Main", SceneFilter::SceneOnly)]
#[case("Main", SceneFilter::SceneOrGroup)]
#[case("Lower Third", SceneFilter::GroupOnly)]
#[case("Lower Third", SceneFilter::SceneOrGroup)]
fn scene_filter_accepts(studio: MemoryGraph, #[case] name: &str, #[case] filter: SceneFilter) {
    let session = session();
    let request = Request::new(&session, "GetSceneItemList", json!({ "sceneName": name }));

    let scene = request
        .validate_scene(&studio, "sceneName", filter)
        .expect("scene accepted");
    assert_eq!(studio.source_kind(&scene), SourceKind::Scene);
    assert_eq!(studio.source_references(name), Some(1));
}

#[rstest]
#[case("Main", SceneFilter::GroupOnly, "not a group")]
#[case("Lower Third", SceneFilter::SceneOnly, "not a scene")]
#[case("Camera", SceneFilter::SceneOrGroup, "not a scene")]
#[case("Camera", SceneFilter::GroupOnly, "not a scene")]
fn scene_filter_rejects_without_leaking(
    studio: MemoryGraph,
    #[case] name: &str,
    #[case] filter: SceneFilter,
    #[case] phrase: &str,
) {
    let session = session();
    let request = Request::new(&session, "GetSceneItemList", json!({ "sceneName": name }));

    assert_rejected(
        request.validate_scene(&studio, "sceneName", filter),
        RequestStatus::InvalidResourceType,
        &[phrase],
    );
    assert_eq!(studio.source_references(name), Some(0));
}

#[test]
fn scene_default_filter_rejects_groups() {
    assert_eq!(SceneFilter::default(), SceneFilter::SceneOnly);
}

#[rstest]
fn input_resolves(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(&session, "GetInputMute", json!({"inputName": "Overlay"}));

    let input = request
        .validate_input(&studio, "inputName")
        .expect("Overlay is an input");
    assert_eq!(input.kind(), SourceKind::Input);
}

#[rstest]
#[case("Main")]
#[case("Lower Third")]
fn scenes_are_not_inputs(studio: MemoryGraph, #[case] name: &str) {
    let session = session();
    let request = Request::new(&session, "GetInputMute", json!({ "inputName": name }));

    assert_rejected(
        request.validate_input(&studio, "inputName"),
        RequestStatus::InvalidResourceType,
        &["not an input"],
    );
    assert_eq!(studio.source_references(name), Some(0));
}

#[test]
fn filters_are_not_inputs() {
    let mut graph = MemoryGraph::new();
    graph
        .add_source_of_kind("Colour Correction", SourceKind::Filter)
        .expect("add filter");
    let session = session();
    let request = Request::new(
        &session,
        "GetInputMute",
        json!({"inputName": "Colour Correction"}),
    );

    assert_rejected(
        request.validate_input(&graph, "inputName"),
        RequestStatus::InvalidResourceType,
        &["not an input"],
    );
}

#[rstest]
fn scene_item_resolves_and_releases_scene(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(
        &session,
        "GetSceneItemEnabled",
        json!({"sceneName": "Main", "sceneItemId": 2}),
    );

    let item = request
        .validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::SceneOnly)
        .expect("item 2 exists");

    assert_eq!(item.id(), 2);
    assert_eq!(item.source_name(), "Overlay");
    assert_eq!(item.scene_name(), "Main");
    assert_eq!(studio.scene_item_references("Main", 2), Some(1));
    assert_eq!(studio.source_references("Main"), Some(0));

    drop(item);
    assert_eq!(studio.scene_item_references("Main", 2), Some(0));
}

#[rstest]
fn scene_item_in_group_needs_group_filter(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(
        &session,
        "GetSceneItemEnabled",
        json!({"sceneName": "Lower Third", "sceneItemId": 7}),
    );

    assert_rejected(
        request.validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::SceneOnly),
        RequestStatus::InvalidResourceType,
        &["not a scene"],
    );
    let item = request
        .validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::GroupOnly)
        .expect("group item exists");
    assert_eq!(item.id(), 7);
    assert_eq!(studio.source_references("Lower Third"), Some(0));
}

#[rstest]
fn missing_scene_item_names_scene_and_id(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(
        &session,
        "GetSceneItemEnabled",
        json!({"sceneName": "Main", "sceneItemId": 3}),
    );

    assert_rejected(
        request.validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::SceneOnly),
        RequestStatus::ResourceNotFound,
        &["`Main`", "`3`"],
    );
    assert_eq!(studio.source_references("Main"), Some(0));
}

#[rstest]
#[case(json!({"sceneName": "Main", "sceneItemId": -1}), RequestStatus::RequestParameterOutOfRange)]
#[case(json!({"sceneName": "Main", "sceneItemId": "1"}), RequestStatus::InvalidRequestParameterType)]
#[case(json!({"sceneName": "Main"}), RequestStatus::MissingRequestParameter)]
fn invalid_scene_item_id_releases_scene(
    studio: MemoryGraph,
    #[case] payload: Value,
    #[case] status: RequestStatus,
) {
    let session = session();
    let request = Request::new(&session, "GetSceneItemEnabled", payload);

    assert_rejected(
        request.validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::SceneOnly),
        status,
        &["`sceneItemId`"],
    );
    assert_eq!(studio.source_references("Main"), Some(0));
}

#[rstest]
fn scene_failure_is_reported_before_item_id(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(
        &session,
        "GetSceneItemEnabled",
        json!({"sceneName": "Nowhere", "sceneItemId": -5}),
    );

    assert_rejected(
        request.validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::SceneOnly),
        RequestStatus::ResourceNotFound,
        &["Nowhere"],
    );
}

#[rstest]
fn fractional_scene_item_id_truncates(studio: MemoryGraph) {
    let session = session();
    let request = Request::new(
        &session,
        "GetSceneItemEnabled",
        json!({"sceneName": "Main", "sceneItemId": 1.75}),
    );

    let item = request
        .validate_scene_item(&studio, "sceneName", "sceneItemId", SceneFilter::SceneOnly)
        .expect("truncates to item 1");
    assert_eq!(item.id(), 1);
}

#[test]
fn graph_rejects_inconsistent_population() {
    let mut graph = MemoryGraph::new();
    graph.add_scene("Main").expect("add Main");
    graph.add_input("Camera").expect("add Camera");

    assert!(graph.add_input("Main").is_err());
    assert!(graph.add_scene_item("Main", 1, "Missing").is_err());
    assert!(graph.add_scene_item("Camera", 1, "Main").is_err());
    assert!(graph.add_scene_item("Main", 1, "Camera").is_ok());
    assert!(graph.add_scene_item("Main", 1, "Camera").is_err());
    assert_eq!(graph.source_references("Missing"), None);
    assert_eq!(graph.scene_item_references("Main", 9), None);
}
