//! JSON bodies exchanged with the acquisition backend.

use carsift_model::{EntityKey, JobPhase, JobStatus, MediaCount, SourceRef};
use serde::{Deserialize, Serialize};

/// `GET /media-count/{entity_key}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCountResponse {
    pub count: u32,
}

impl From<MediaCountResponse> for MediaCount {
    fn from(value: MediaCountResponse) -> Self {
        MediaCount::new(value.count)
    }
}

/// `POST /acquire-media`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquireMediaRequest {
    pub entity_key: EntityKey,
    pub source_ref: SourceRef,
}

/// `GET /acquisition-progress/{entity_key}`
///
/// `current`/`total` default to zero when the backend omits them; an unknown
/// `status` string is a shape error and fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquisitionProgressResponse {
    pub status: JobPhase,
    #[serde(default)]
    pub current: u32,
    #[serde(default)]
    pub total: u32,
}

impl From<AcquisitionProgressResponse> for JobStatus {
    fn from(value: AcquisitionProgressResponse) -> Self {
        JobStatus::new(value.status, value.current, value.total)
    }
}

impl From<JobStatus> for AcquisitionProgressResponse {
    fn from(value: JobStatus) -> Self {
        Self {
            status: value.phase,
            current: value.current,
            total: value.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_body_uses_camel_case() {
        let body = AcquireMediaRequest {
            entity_key: EntityKey::new("202401").unwrap(),
            source_ref: SourceRef::new("https://example.test/ad/202401")
                .unwrap(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["entityKey"], "202401");
        assert_eq!(json["sourceRef"], "https://example.test/ad/202401");
    }

    #[test]
    fn trigger_body_validates_identifiers() {
        let parsed: AcquireMediaRequest = serde_json::from_str(
            r#"{"entityKey":"  202401 ","sourceRef":"https://example.test/ad/202401"}"#,
        )
        .unwrap();
        assert_eq!(parsed.entity_key.as_str(), "202401");

        for body in [
            r#"{"entityKey":"   ","sourceRef":"https://example.test/ad/1"}"#,
            r#"{"entityKey":"../etc","sourceRef":"https://example.test/ad/1"}"#,
            r#"{"entityKey":"202401","sourceRef":""}"#,
        ] {
            let err = serde_json::from_str::<AcquireMediaRequest>(body)
                .unwrap_err();
            assert!(err.to_string().contains("invalid"), "{body}: {err}");
        }
    }

    #[test]
    fn progress_parses_lowercase_status() {
        let parsed: AcquisitionProgressResponse = serde_json::from_str(
            r#"{"status":"running","current":2,"total":9}"#,
        )
        .unwrap();
        assert_eq!(JobStatus::from(parsed), JobStatus::running(2, 9));
    }

    #[test]
    fn progress_rejects_unknown_status() {
        let parsed = serde_json::from_str::<AcquisitionProgressResponse>(
            r#"{"status":"exploded","current":0,"total":0}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn progress_counters_default_to_zero() {
        let parsed: AcquisitionProgressResponse =
            serde_json::from_str(r#"{"status":"idle"}"#).unwrap();
        assert_eq!(parsed.current, 0);
        assert_eq!(parsed.total, 0);
    }
}
