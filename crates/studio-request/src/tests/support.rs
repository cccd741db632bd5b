//! Shared fixtures for request and resolver tests.

use std::cell::Cell;

use rstest::fixture;

use crate::{MemoryGraph, RequestError, RequestStatus, Session};

/// Session whose values can change after a request has been built.
#[derive(Debug)]
pub(super) struct MutableSession {
    pub(super) rpc_version: Cell<u32>,
    pub(super) ignore_non_fatal_request_checks: Cell<bool>,
}

impl MutableSession {
    pub(super) fn new(rpc_version: u32, ignore: bool) -> Self {
        Self {
            rpc_version: Cell::new(rpc_version),
            ignore_non_fatal_request_checks: Cell::new(ignore),
        }
    }
}

impl Session for MutableSession {
    fn rpc_version(&self) -> u32 {
        self.rpc_version.get()
    }

    fn ignore_non_fatal_request_checks(&self) -> bool {
        self.ignore_non_fatal_request_checks.get()
    }
}

/// Graph with one input, two scenes, and one group.
///
/// - `Main` holds items 1 (`Camera`) and 2 (`Overlay`).
/// - `Backstage` is an empty scene.
/// - `Lower Third` is a group holding item 7 (`Overlay`).
#[fixture]
pub(super) fn studio() -> MemoryGraph {
    let mut graph = MemoryGraph::new();
    graph.add_input("Camera").expect("add Camera");
    graph.add_input("Overlay").expect("add Overlay");
    graph.add_scene("Main").expect("add Main");
    graph.add_scene("Backstage").expect("add Backstage");
    graph.add_group("Lower Third").expect("add Lower Third");
    graph.add_scene_item("Main", 1, "Camera").expect("place Camera");
    graph.add_scene_item("Main", 2, "Overlay").expect("place Overlay");
    graph
        .add_scene_item("Lower Third", 7, "Overlay")
        .expect("place Overlay in group");
    graph
}

/// Asserts that `result` failed with `status` and a comment containing every
/// fragment.
#[track_caller]
pub(super) fn assert_rejected<T: std::fmt::Debug>(
    result: Result<T, RequestError>,
    status: RequestStatus,
    fragments: &[&str],
) {
    let error = result.expect_err("check should fail");
    assert_eq!(error.status(), status, "unexpected status for: {error}");
    for fragment in fragments {
        assert!(
            error.comment().contains(fragment),
            "expected {fragment:?} in comment, got: {error}"
        );
    }
}
