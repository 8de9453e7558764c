#![allow(dead_code)]

use ::std::sync::atomic::AtomicBool;
use ::std::sync::atomic::AtomicUsize;
use ::std::sync::atomic::Ordering;
use ::std::sync::Arc;

use ::async_trait::async_trait;
use ::domain::Folder;
use ::domain::FolderId;
use ::domain::Video;
use ::domain::VideoId;
use ::domain::YoutubeId;
use ::tokio::sync::Mutex;
use ::tokio::sync::Notify;
use ::use_cases::boundaries::Accept;
use ::use_cases::boundaries::Activate;
use ::use_cases::boundaries::LoginRequestModel;
use ::use_cases::boundaries::Update;
use ::use_cases::gateways::Authenticator;
use ::use_cases::gateways::CatalogRepository;
use ::use_cases::gateways::CredentialStore;
use ::use_cases::gateways::MetadataLookup;
use ::use_cases::gateways::UrlLauncher;
use ::use_cases::interactors::BrowserInteractor;
use ::use_cases::models::descriptors::Credentials;
use ::use_cases::models::descriptors::FolderDraft;
use ::use_cases::models::descriptors::VideoDraft;
use ::use_cases::models::descriptors::VideoMetadata;
use ::use_cases::models::errors::GatewayError;
use ::use_cases::models::errors::GatewayResult;
use ::use_cases::models::notices::Notice;
use ::use_cases::models::state::Token;
use ::use_cases::models::state::ViewState;
use ::use_cases::utils::aliases::Fallible;

pub const USERNAME: &str = "ana";
pub const PASSWORD: &str = "hunter2";
pub const TOKEN: &str = "0123456789abcdef";

pub fn folder(id: FolderId, parent: Option<FolderId>) -> Folder {
    Folder {
        id,
        name: format!("folder-{id}").into(),
        parent,
        created_at: None,
        updated_at: None,
    }
}

pub fn video(id: VideoId, folder: Option<FolderId>, url: &'static str) -> Video {
    Video {
        id,
        title: format!("video-{id}").into(),
        youtube_url: url.into(),
        folder,
        created_at: None,
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub states: Mutex<Vec<ViewState>>,
    pub notices: Mutex<Vec<Notice>>,
    pub activations: AtomicUsize,
}

#[async_trait]
impl Activate for RecordingView {
    async fn activate(self: Arc<Self>) -> Fallible<()> {
        self.activations.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }

    async fn deactivate(self: Arc<Self>) -> Fallible<()> {
        Ok(())
    }
}

#[async_trait]
impl Update<ViewState> for RecordingView {
    async fn update(self: Arc<Self>, state: &ViewState) -> Fallible<()> {
        self.states.lock().await.push(state.clone());

        Ok(())
    }
}

#[async_trait]
impl Update<Notice> for RecordingView {
    async fn update(self: Arc<Self>, notice: &Notice) -> Fallible<()> {
        self.notices.lock().await.push(notice.clone());

        Ok(())
    }
}

#[derive(Default)]
pub struct FakeCatalog {
    pub folders: Mutex<Vec<Folder>>,
    pub videos: Mutex<Vec<Video>>,

    pub fetches: AtomicUsize,
    pub mutations: AtomicUsize,
    pub tokens: Mutex<Vec<Token>>,
    pub video_drafts: Mutex<Vec<VideoDraft>>,

    pub fail_fetches: AtomicBool,
    pub reject_mutations: Mutex<Option<&'static str>>,
}

impl FakeCatalog {
    async fn mutate(&self, token: Token) -> GatewayResult<()> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.tokens.lock().await.push(token);

        match *self.reject_mutations.lock().await {
            Some(body) => Err(GatewayError::Rejected { status: 400, body: body.into() }),
            None => Ok(()),
        }
    }

    pub fn calls(&self) -> usize {
        self.fetches.load(Ordering::SeqCst) + self.mutations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogRepository for FakeCatalog {
    async fn get_folders(self: Arc<Self>) -> GatewayResult<Vec<Folder>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(::anyhow::anyhow!("connection reset").into());
        }

        Ok(self.folders.lock().await.clone())
    }

    async fn get_videos(self: Arc<Self>) -> GatewayResult<Vec<Video>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(::anyhow::anyhow!("connection reset").into());
        }

        Ok(self.videos.lock().await.clone())
    }

    async fn insert_folder(self: Arc<Self>, draft: FolderDraft, token: Token) -> GatewayResult<()> {
        self.mutate(token).await?;

        let mut folders = self.folders.lock().await;
        let id = folders.iter().map(|folder| folder.id).max().unwrap_or_default() + 1;

        folders.push(Folder {
            id,
            name: draft.name,
            parent: draft.parent,
            created_at: None,
            updated_at: None,
        });

        Ok(())
    }

    async fn delete_folder(self: Arc<Self>, id: FolderId, token: Token) -> GatewayResult<()> {
        self.mutate(token).await?;
        self.folders.lock().await.retain(|folder| folder.id != id);

        Ok(())
    }

    async fn insert_video(self: Arc<Self>, draft: VideoDraft, token: Token) -> GatewayResult<()> {
        self.mutate(token).await?;
        self.video_drafts.lock().await.push(draft.clone());

        let mut videos = self.videos.lock().await;
        let id = videos.iter().map(|video| video.id).max().unwrap_or_default() + 1;

        videos.push(Video {
            id,
            title: draft.title,
            youtube_url: draft.youtube_url,
            folder: draft.folder,
            created_at: None,
        });

        Ok(())
    }

    async fn delete_video(self: Arc<Self>, id: VideoId, token: Token) -> GatewayResult<()> {
        self.mutate(token).await?;
        self.videos.lock().await.retain(|video| video.id != id);

        Ok(())
    }
}

#[derive(Default)]
pub struct FakeAuthenticator {
    pub logins: AtomicUsize,
    pub registrations: AtomicUsize,
    pub offline: AtomicBool,
}

#[async_trait]
impl Authenticator for FakeAuthenticator {
    async fn login(self: Arc<Self>, credentials: Credentials) -> GatewayResult<Token> {
        self.logins.fetch_add(1, Ordering::SeqCst);

        if self.offline.load(Ordering::SeqCst) {
            return Err(::anyhow::anyhow!("dns error").into());
        }

        match (&*credentials.username, &*credentials.password) {
            (USERNAME, PASSWORD) => Ok(TOKEN.into()),
            _ => Err(GatewayError::Rejected { status: 400, body: "".into() }),
        }
    }

    async fn register(self: Arc<Self>, _: Credentials) -> GatewayResult<()> {
        self.registrations.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    pub slot: Mutex<Option<Token>>,
    pub writes: AtomicUsize,
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(self: Arc<Self>) -> Fallible<Option<Token>> {
        Ok(self.slot.lock().await.clone())
    }

    async fn set(self: Arc<Self>, token: Token) -> Fallible<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().await = Some(token);

        Ok(())
    }

    async fn delete(self: Arc<Self>) -> Fallible<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        *self.slot.lock().await = None;

        Ok(())
    }
}

#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupBehavior {
    #[default]
    Succeed,
    Fail,
    Hang,
}

#[derive(Default)]
pub struct FakeMetadataLookup {
    pub behavior: Mutex<LookupBehavior>,
    pub lookups: Mutex<Vec<YoutubeId>>,
    pub called: Notify,
}

#[async_trait]
impl MetadataLookup for FakeMetadataLookup {
    async fn lookup(self: Arc<Self>, id: YoutubeId) -> GatewayResult<VideoMetadata> {
        self.lookups.lock().await.push(id);
        self.called.notify_one();

        match *self.behavior.lock().await {
            LookupBehavior::Succeed => Ok(VideoMetadata {
                title: Some("Never Gonna Give You Up".into()),
                thumbnail_url: None,
            }),
            LookupBehavior::Fail => Err(::anyhow::anyhow!("oembed unavailable").into()),
            LookupBehavior::Hang => ::std::future::pending().await,
        }
    }
}

#[derive(Default)]
pub struct RecordingLauncher {
    pub urls: Mutex<Vec<String>>,
    pub broken: AtomicBool,
}

#[async_trait]
impl UrlLauncher for RecordingLauncher {
    async fn launch(self: Arc<Self>, url: &str) -> Fallible<()> {
        self.urls.lock().await.push(url.to_owned());

        if self.broken.load(Ordering::SeqCst) {
            ::anyhow::bail!("no browser available");
        }

        Ok(())
    }
}

pub struct TestBrowser {
    pub interactor: Arc<BrowserInteractor>,

    pub view: Arc<RecordingView>,
    pub catalog: Arc<FakeCatalog>,
    pub authenticator: Arc<FakeAuthenticator>,
    pub credentials: Arc<MemoryCredentialStore>,
    pub metadata: Arc<FakeMetadataLookup>,
    pub launcher: Arc<RecordingLauncher>,
}

impl TestBrowser {
    pub fn new() -> Self {
        let view = Arc::new(RecordingView::default());
        let catalog = Arc::new(FakeCatalog::default());
        let authenticator = Arc::new(FakeAuthenticator::default());
        let credentials = Arc::new(MemoryCredentialStore::default());
        let metadata = Arc::new(FakeMetadataLookup::default());
        let launcher = Arc::new(RecordingLauncher::default());

        let interactor = Arc::new(BrowserInteractor::new(
            view.clone(),
            catalog.clone(),
            authenticator.clone(),
            credentials.clone(),
            metadata.clone(),
            launcher.clone(),
        ));

        Self { interactor, view, catalog, authenticator, credentials, metadata, launcher }
    }

    pub async fn with_catalog(folders: Vec<Folder>, videos: Vec<Video>) -> Self {
        let browser = Self::new();

        *browser.catalog.folders.lock().await = folders;
        *browser.catalog.videos.lock().await = videos;

        browser
    }

    pub async fn sign_in(&self) {
        Arc::clone(&self.interactor)
            .accept(LoginRequestModel::new(USERNAME, PASSWORD))
            .await
            .expect("fake credentials should be accepted");
    }

    pub async fn state(&self) -> ViewState {
        self.interactor.state().await
    }

    pub async fn last_notice(&self) -> Option<Notice> {
        self.view.notices.lock().await.last().cloned()
    }
}
