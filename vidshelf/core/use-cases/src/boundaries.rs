use ::async_trait::async_trait;
use ::derive_new::new;
use ::domain::Folder;
use ::domain::FolderId;
use ::domain::Video;
use ::domain::VideoId;

use crate::models::errors::Outcome;
use crate::models::notices::Notice;
use crate::models::state::ViewState;
use crate::utils::aliases::Fallible;
use crate::utils::aliases::MaybeOwnedString;

#[async_trait]
pub trait Accept<Request>: Send + Sync {
    async fn accept(self: ::std::sync::Arc<Self>, request: Request) -> Outcome<()>;
}

#[async_trait]
pub trait Update<Event>: Send + Sync {
    async fn update(self: ::std::sync::Arc<Self>, event: &Event) -> Fallible<()>;
}

/// Brackets a stretch of remote work, e.g. to show a spinner.
#[async_trait]
pub trait Activate: Send + Sync {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()>;
    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()>;
}

pub trait BrowserOutputBoundary: Activate + Update<ViewState> + Update<Notice> {}

impl<Boundary> BrowserOutputBoundary for Boundary where Boundary: Activate + Update<ViewState> + Update<Notice> {}

/// Reads the stored token into the session without touching the catalog.
pub struct ResumeSessionRequestModel;

pub struct RestoreSessionRequestModel;

pub struct RefreshRequestModel;

#[derive(new)]
pub struct LoginRequestModel {
    #[new(into)]
    pub username: MaybeOwnedString,
    #[new(into)]
    pub password: MaybeOwnedString,
}

#[derive(new)]
pub struct RegisterRequestModel {
    #[new(into)]
    pub username: MaybeOwnedString,
    #[new(into)]
    pub password: MaybeOwnedString,
}

pub struct LogoutRequestModel;

pub struct ToggleLoginPanelRequestModel;

#[derive(new)]
pub struct EnterFolderRequestModel {
    pub folder: Folder,
}

pub struct GoToRootRequestModel;

#[derive(new)]
pub struct CreateFolderRequestModel {
    #[new(into)]
    pub name: MaybeOwnedString,
}

#[derive(new)]
pub struct DeleteFolderRequestModel {
    pub id: FolderId,
}

#[derive(new)]
pub struct CreateVideoRequestModel {
    #[new(into)]
    pub title: MaybeOwnedString,
    #[new(into)]
    pub url: MaybeOwnedString,
}

#[derive(new)]
pub struct DeleteVideoRequestModel {
    pub id: VideoId,
}

#[derive(new)]
pub struct SelectVideoRequestModel {
    pub video: Video,
}

pub struct ClosePlayerRequestModel;

pub struct OpenInYoutubeRequestModel;
