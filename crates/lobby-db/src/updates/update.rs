//! Update (announcement) patch builder.

use serde::{Deserialize, Deserializer, Serialize};

/// Partial edit of an update. `image_url: Some(None)` clears the image;
/// `None` leaves it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdatePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_url: Option<Option<String>>,
}

impl UpdatePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_url.is_none()
    }
}

// A present key (even `null`) becomes `Some(..)`; an absent key stays `None` via `default`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub struct UpdatePatchBuilder(UpdatePatch);

impl UpdatePatchBuilder {
    pub fn new() -> Self {
        Self(UpdatePatch::default())
    }

    pub fn title(mut self, val: impl Into<String>) -> Self {
        self.0.title = Some(val.into());
        self
    }

    pub fn content(mut self, val: impl Into<String>) -> Self {
        self.0.content = Some(val.into());
        self
    }

    pub fn image_url(mut self, val: Option<String>) -> Self {
        self.0.image_url = Some(val);
        self
    }

    pub fn build(self) -> UpdatePatch {
        self.0
    }
}

impl Default for UpdatePatchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
