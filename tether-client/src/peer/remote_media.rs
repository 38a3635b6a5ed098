use std::collections::HashMap;
use std::fmt;

/// Remote tracks sharing one media stream id, grouped the way the far side
/// sent them (e.g. a camera's audio and video).
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteMedia<T> {
    id: String,
    tracks: Vec<T>,
}

impl<T> RemoteMedia<T> {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tracks(&self) -> &[T] {
        &self.tracks
    }
}

impl<T> fmt::Debug for RemoteMedia<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteMedia")
            .field("id", &self.id)
            .field("tracks", &self.tracks.len())
            .finish()
    }
}

/// Collects incoming tracks into their streams.
pub struct StreamGroups<T> {
    streams: HashMap<String, RemoteMedia<T>>,
}

impl<T: Clone> StreamGroups<T> {
    pub fn new() -> Self {
        Self {
            streams: HashMap::new(),
        }
    }

    /// Files `track` under `stream_id` and returns the stream as it stands
    /// now.
    pub fn add(&mut self, stream_id: &str, track: T) -> RemoteMedia<T> {
        let stream = self
            .streams
            .entry(stream_id.to_owned())
            .or_insert_with(|| RemoteMedia {
                id: stream_id.to_owned(),
                tracks: Vec::new(),
            });
        stream.tracks.push(track);
        stream.clone()
    }
}

impl<T: Clone> Default for StreamGroups<T> {
    fn default() -> Self {
        Self::new()
    }
}
