use crate::error::MediaError;
use async_trait::async_trait;

/// Where local audio/video tracks come from (camera, microphone, file...).
#[async_trait]
pub trait MediaSource<T>: Send + Sync {
    async fn acquire(&self) -> Result<Vec<T>, MediaError>;
}

/// Tracks the application has already created.
pub struct PreparedTracks<T>(pub Vec<T>);

#[async_trait]
impl<T> MediaSource<T> for PreparedTracks<T>
where
    T: Clone + Send + Sync,
{
    async fn acquire(&self) -> Result<Vec<T>, MediaError> {
        if self.0.is_empty() {
            return Err(MediaError::new("no local tracks"));
        }
        Ok(self.0.clone())
    }
}
