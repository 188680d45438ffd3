//! Asynchronous seams used by the paste flow.

use std::future::Future;
use std::time::Duration;

use crate::error::ClipboardError;

/// Something that can hand over the current clipboard text.
pub trait ClipboardSource {
    fn read_text(&self) -> impl Future<Output = Result<String, ClipboardError>>;
}

/// Timer used to schedule the busy-to-idle transition.
pub trait Delay {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// Clipboard whose content is known up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticClipboard {
    content: Result<String, ClipboardError>,
}

impl StaticClipboard {
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            content: Ok(text.into()),
        }
    }

    pub fn failing(error: ClipboardError) -> Self {
        Self { content: Err(error) }
    }
}

impl ClipboardSource for StaticClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.content.clone()
    }
}
