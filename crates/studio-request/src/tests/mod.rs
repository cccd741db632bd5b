//! Unit tests for the studio-request crate.

mod resolve;
mod support;

mod status_tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use crate::{RequestError, RequestStatus};

    #[test]
    fn codes_are_unique() {
        let codes: HashSet<u16> = RequestStatus::iter().map(RequestStatus::code).collect();
        assert_eq!(codes.len(), RequestStatus::iter().count());
    }

    #[test]
    fn codes_are_stable() {
        assert_eq!(RequestStatus::MissingRequestParameter.code(), 300);
        assert_eq!(RequestStatus::MissingRequestData.code(), 301);
        assert_eq!(RequestStatus::InvalidRequestParameterType.code(), 401);
        assert_eq!(RequestStatus::RequestParameterOutOfRange.code(), 402);
        assert_eq!(RequestStatus::RequestParameterEmpty.code(), 403);
        assert_eq!(RequestStatus::ResourceNotFound.code(), 600);
        assert_eq!(RequestStatus::InvalidResourceType.code(), 602);
    }

    #[test]
    fn status_serialises_as_numeric_code() {
        let encoded = serde_json::to_string(&RequestStatus::ResourceNotFound).expect("serialise");
        assert_eq!(encoded, "600");
    }

    #[test]
    fn status_displays_by_name() {
        assert_eq!(
            RequestStatus::RequestParameterEmpty.to_string(),
            "RequestParameterEmpty"
        );
    }

    #[test]
    fn error_displays_comment() {
        let error = RequestError::missing_parameter("sceneName");
        assert_eq!(
            error.to_string(),
            "Your request is missing the `sceneName` parameter."
        );
        let (status, comment) = error.into_parts();
        assert_eq!(status, RequestStatus::MissingRequestParameter);
        assert!(comment.contains("sceneName"));
    }
}

mod session_tests {
    use studio_config::Config;

    use crate::{Session, SessionState};

    #[test]
    fn default_session_follows_default_config() {
        let session = SessionState::default();
        let config = Config::default();
        assert_eq!(session.rpc_version(), config.rpc_version);
        assert!(!session.ignore_non_fatal_request_checks());
    }

    #[test]
    fn builders_override_config_values() {
        let config = Config {
            rpc_version: 3,
            ..Config::default()
        };
        let session = SessionState::from_config(&config)
            .with_ignore_non_fatal_request_checks(true)
            .with_rpc_version(4);
        assert_eq!(session.rpc_version(), 4);
        assert!(session.ignore_non_fatal_request_checks());
    }
}
