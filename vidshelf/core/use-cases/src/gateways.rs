use ::async_trait::async_trait;
use ::domain::Folder;
use ::domain::FolderId;
use ::domain::Video;
use ::domain::VideoId;
use ::domain::YoutubeId;

use crate::models::descriptors::Credentials;
use crate::models::descriptors::FolderDraft;
use crate::models::descriptors::VideoDraft;
use crate::models::descriptors::VideoMetadata;
use crate::models::errors::GatewayResult;
use crate::models::state::Token;
use crate::utils::aliases::Fallible;

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn get_folders(self: ::std::sync::Arc<Self>) -> GatewayResult<Vec<Folder>>;
    async fn get_videos(self: ::std::sync::Arc<Self>) -> GatewayResult<Vec<Video>>;

    async fn insert_folder(self: ::std::sync::Arc<Self>, draft: FolderDraft, token: Token) -> GatewayResult<()>;
    async fn delete_folder(self: ::std::sync::Arc<Self>, id: FolderId, token: Token) -> GatewayResult<()>;

    async fn insert_video(self: ::std::sync::Arc<Self>, draft: VideoDraft, token: Token) -> GatewayResult<()>;
    async fn delete_video(self: ::std::sync::Arc<Self>, id: VideoId, token: Token) -> GatewayResult<()>;
}

#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(self: ::std::sync::Arc<Self>, credentials: Credentials) -> GatewayResult<Token>;
    async fn register(self: ::std::sync::Arc<Self>, credentials: Credentials) -> GatewayResult<()>;
}

/// The single `userToken` slot that outlives the process.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(self: ::std::sync::Arc<Self>) -> Fallible<Option<Token>>;
    async fn set(self: ::std::sync::Arc<Self>, token: Token) -> Fallible<()>;
    async fn delete(self: ::std::sync::Arc<Self>) -> Fallible<()>;
}

#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn lookup(self: ::std::sync::Arc<Self>, id: YoutubeId) -> GatewayResult<VideoMetadata>;
}

#[async_trait]
pub trait UrlLauncher: Send + Sync {
    async fn launch(self: ::std::sync::Arc<Self>, url: &str) -> Fallible<()>;
}
