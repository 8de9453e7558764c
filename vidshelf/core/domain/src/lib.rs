pub(crate) mod utils;

pub mod projection;
pub mod youtube;

pub use crate::projection::project;
pub use crate::projection::Projection;
pub use crate::youtube::build_embed_document;
pub use crate::youtube::resolve;
pub use crate::youtube::YoutubeId;

use ::serde::Deserialize;
use ::serde::Serialize;

use crate::utils::aliases::MaybeOwnedString;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: MaybeOwnedString,

    #[serde(default)]
    pub parent: Option<FolderId>,

    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

pub type FolderId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    pub id: VideoId,
    pub title: MaybeOwnedString,
    pub youtube_url: MaybeOwnedString,

    #[serde(default)]
    pub folder: Option<FolderId>,

    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

pub type VideoId = u64;

/// Server-issued timestamp, carried through untouched.
pub type Timestamp = MaybeOwnedString;

impl Video {
    /// Whether the video carries anything worth handing to the player.
    pub fn is_playable(&self) -> bool {
        !self.youtube_url.trim().is_empty()
    }

    pub fn youtube_id(&self) -> Option<YoutubeId> {
        resolve(&self.youtube_url)
    }
}
