use crate::Folder;
use crate::FolderId;
use crate::Video;

/// The slice of the catalog visible from one cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection<'a> {
    pub child_folders: Vec<&'a Folder>,
    pub child_videos: Vec<&'a Video>,
}

impl Projection<'_> {
    pub fn is_empty(&self) -> bool {
        self.child_folders.is_empty() && self.child_videos.is_empty()
    }
}

/// Selects the direct children of `cursor`, where `None` stands for the root.
///
/// Only one level is inspected, so malformed parent chains (including cycles)
/// cannot make this loop. Input order and duplicates are kept as given.
pub fn project<'a, Folders, Videos>(folders: Folders, videos: Videos, cursor: Option<FolderId>) -> Projection<'a>
where
    Folders: IntoIterator<Item = &'a Folder>,
    Videos: IntoIterator<Item = &'a Video>,
{
    let child_folders = folders
        .into_iter()
        .filter(|folder| folder.parent == cursor)
        .collect();

    let child_videos = videos
        .into_iter()
        .filter(|video| video.folder == cursor)
        .collect();

    Projection { child_folders, child_videos }
}
