use serde::{Deserialize, Serialize};

/// Opaque handle to a live data stream, either a raw sensor output or the
/// output of an earlier pipeline stage. The pipeline builder resolves the
/// handle to the concrete upstream stream identifier when it emits the
/// firmware command for a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamToken {
    stream_id: String,
}

impl StreamToken {
    pub fn new(stream_id: &str) -> Self {
        Self {
            stream_id: stream_id.to_string(),
        }
    }

    pub fn stream_id(&self) -> &str {
        &self.stream_id
    }
}
