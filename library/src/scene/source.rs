use std::fs;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;
use thiserror::Error;

/// Advisory limit on waiting for a single scene collection to arrive.
pub const SCENE_FETCH_DEADLINE: Duration = Duration::from_secs(3);

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("scene source unreachable: {what:?}")]
    Unreachable { what: String },
    #[error("scene source did not respond within {deadline:?}")]
    Timeout { deadline: Duration },
    #[error("malformed scene data: {what:?}")]
    Malformed { what: String },
    #[error("invalid scene content: {what:?}")]
    InvalidContent { what: String },
}

/// A blocking scene data supplier. The fetch either returns the whole
/// serialized collection or fails; there is no partial or streaming load.
pub trait SceneSource {
    fn fetch(&self, deadline: Duration) -> Result<String, LoadError>;
}

pub struct FileSceneSource {
    path: PathBuf,
}

impl FileSceneSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SceneSource for FileSceneSource {
    fn fetch(&self, _deadline: Duration) -> Result<String, LoadError> {
        fs::read_to_string(&self.path).map_err(|e| LoadError::Unreachable { what: format!("{}: {}", self.path.display(), e) })
    }
}

/// Network-style acquisition: the payload arrives over a channel filled by
/// some producer, and the fetch blocks until it shows up or the deadline
/// passes.
pub struct ChannelSceneSource {
    payload: Receiver<String>,
}

impl ChannelSceneSource {
    #[must_use]
    pub fn new(payload: Receiver<String>) -> Self {
        Self { payload }
    }
}

impl SceneSource for ChannelSceneSource {
    fn fetch(&self, deadline: Duration) -> Result<String, LoadError> {
        self.payload.recv_timeout(deadline).map_err(|e| match e {
            RecvTimeoutError::Timeout => LoadError::Timeout { deadline },
            RecvTimeoutError::Disconnected => LoadError::Unreachable { what: "scene producer has gone".to_string() },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::mpsc;
    use tempfile::NamedTempFile;

    const TEST_DEADLINE: Duration = Duration::from_millis(20);

    #[test]
    fn test_file_source_fetch() {
        let expected_payload = "[{\"x\": 0.0}]";
        let mut temp_file = NamedTempFile::new().expect("failed to create temp file");
        temp_file.write_all(expected_payload.as_bytes()).expect("failed to write the temp file");

        let system_under_test = FileSceneSource::new(temp_file.path());

        let actual_payload = system_under_test.fetch(TEST_DEADLINE).unwrap();
        assert_eq!(actual_payload, expected_payload);
    }

    #[test]
    fn test_file_source_missing_file() {
        let system_under_test = FileSceneSource::new("definitely/not/a/scene.json");

        let fetch_result = system_under_test.fetch(TEST_DEADLINE);
        assert!(matches!(fetch_result, Err(LoadError::Unreachable { .. })));
    }

    #[test]
    fn test_channel_source_fetch() {
        let expected_payload = "[]".to_string();
        let (producer, consumer) = mpsc::channel();
        producer.send(expected_payload.clone()).unwrap();

        let system_under_test = ChannelSceneSource::new(consumer);

        let actual_payload = system_under_test.fetch(TEST_DEADLINE).unwrap();
        assert_eq!(actual_payload, expected_payload);
    }

    #[test]
    fn test_channel_source_deadline_expires() {
        let (_producer, consumer) = mpsc::channel::<String>();
        let system_under_test = ChannelSceneSource::new(consumer);

        let fetch_result = system_under_test.fetch(TEST_DEADLINE);

        assert!(matches!(fetch_result, Err(LoadError::Timeout { deadline }) if deadline == TEST_DEADLINE));
    }

    #[test]
    fn test_channel_source_producer_gone() {
        let (producer, consumer) = mpsc::channel::<String>();
        drop(producer);
        let system_under_test = ChannelSceneSource::new(consumer);

        let fetch_result = system_under_test.fetch(TEST_DEADLINE);

        assert!(matches!(fetch_result, Err(LoadError::Unreachable { .. })));
    }
}
