use ::async_trait::async_trait;
use ::derive_new::new;
use ::domain::Video;

use crate::boundaries::Accept;
use crate::boundaries::Activate;
use crate::boundaries::BrowserOutputBoundary;
use crate::boundaries::ClosePlayerRequestModel;
use crate::boundaries::CreateFolderRequestModel;
use crate::boundaries::CreateVideoRequestModel;
use crate::boundaries::DeleteFolderRequestModel;
use crate::boundaries::DeleteVideoRequestModel;
use crate::boundaries::EnterFolderRequestModel;
use crate::boundaries::GoToRootRequestModel;
use crate::boundaries::LoginRequestModel;
use crate::boundaries::LogoutRequestModel;
use crate::boundaries::OpenInYoutubeRequestModel;
use crate::boundaries::RefreshRequestModel;
use crate::boundaries::RegisterRequestModel;
use crate::boundaries::RestoreSessionRequestModel;
use crate::boundaries::ResumeSessionRequestModel;
use crate::boundaries::SelectVideoRequestModel;
use crate::boundaries::ToggleLoginPanelRequestModel;
use crate::boundaries::Update;
use crate::gateways::Authenticator;
use crate::gateways::CatalogRepository;
use crate::gateways::CredentialStore;
use crate::gateways::MetadataLookup;
use crate::gateways::UrlLauncher;
use crate::models::descriptors::Credentials;
use crate::models::descriptors::FolderDraft;
use crate::models::descriptors::VideoDraft;
use crate::models::errors::BrowserError;
use crate::models::errors::GatewayError;
use crate::models::errors::Outcome;
use crate::models::notices::Notice;
use crate::models::state::Selection;
use crate::models::state::Token;
use crate::models::state::Transition;
use crate::models::state::ViewState;

/// Drives the folder/video browser: owns the view state and performs the
/// remote calls each request implies.
///
/// The state lock is only held while reducing, never across a remote call, so
/// a response that arrives late is applied on top of whatever happened meanwhile.
#[derive(new)]
pub struct BrowserInteractor {
    pub output_boundary: ::std::sync::Arc<dyn BrowserOutputBoundary>,

    pub catalog: ::std::sync::Arc<dyn CatalogRepository>,
    pub authenticator: ::std::sync::Arc<dyn Authenticator>,
    pub credentials: ::std::sync::Arc<dyn CredentialStore>,
    pub metadata: ::std::sync::Arc<dyn MetadataLookup>,
    pub launcher: ::std::sync::Arc<dyn UrlLauncher>,

    #[new(default)]
    state: ::tokio::sync::Mutex<ViewState>,
}

impl BrowserInteractor {
    pub async fn state(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    /// Applies `transition` and publishes the result, returning the states before and after.
    async fn transition(&self, transition: Transition) -> (ViewState, ViewState) {
        let (before, after) = {
            let mut state = self.state.lock().await;

            let before = state.clone();
            *state = ::std::mem::take(&mut *state).reduce(transition);

            (before, state.clone())
        };

        if let Err(err) = Update::<ViewState>::update(::std::sync::Arc::clone(&self.output_boundary), &after).await {
            ::tracing::warn!(error = %err, "failed to present view state");
        }

        (before, after)
    }

    async fn notify(&self, notice: Notice) {
        if let Err(err) = Update::<Notice>::update(::std::sync::Arc::clone(&self.output_boundary), &notice).await {
            ::tracing::warn!(error = %err, "failed to present notice");
        }
    }

    async fn fail<T: Send>(&self, err: BrowserError) -> Outcome<T> {
        self.notify(Notice::error(err.to_string())).await;

        Err(err)
    }

    async fn token(&self) -> Outcome<Token> {
        match self.state.lock().await.session.token.clone() {
            Some(token) => Ok(token),
            None => Err(BrowserError::Unauthorized),
        }
    }

    /// Runs one remote call with the output boundary marked busy.
    async fn remote<T, Call>(&self, call: Call) -> T
    where
        Call: ::std::future::Future<Output = T> + Send,
        T: Send,
    {
        if let Err(err) = Activate::activate(::std::sync::Arc::clone(&self.output_boundary)).await {
            ::tracing::warn!(error = %err, "failed to activate output boundary");
        }

        let output = call.await;

        if let Err(err) = Activate::deactivate(::std::sync::Arc::clone(&self.output_boundary)).await {
            ::tracing::warn!(error = %err, "failed to deactivate output boundary");
        }

        output
    }

    async fn request_failed<T: Send>(&self, context: &'static str, err: GatewayError) -> Outcome<T> {
        ::tracing::warn!(error = %err, context, "remote request failed");

        self.fail(BrowserError::request_failed(context, &err)).await
    }

    /// The change already went through, so a failed reload is only noticed, not returned.
    async fn refresh_after_change(self: ::std::sync::Arc<Self>) -> Outcome<()> {
        if let Err(err) = self.accept(RefreshRequestModel).await {
            ::tracing::info!(error = %err, "catalog reload after change failed");
        }

        Ok(())
    }

    fn dispatch_teardown(&self, video: Video) {
        let metadata = ::std::sync::Arc::clone(&self.metadata);

        ::tokio::spawn(tear_down_playback(metadata, video));
    }
}

/// Best-effort metadata lookup once the player goes away. Never reported.
async fn tear_down_playback(metadata: ::std::sync::Arc<dyn MetadataLookup>, video: Video) {
    let Some(id) = video.youtube_id() else {
        return;
    };

    match metadata.lookup(id.clone()).await {
        Ok(metadata) => ::tracing::debug!(
            video_id = %id,
            title = metadata.title.as_deref().unwrap_or("Untitled Video"),
            thumbnail_url = metadata.thumbnail_url.as_deref().unwrap_or_default(),
            "playback torn down",
        ),
        Err(err) => ::tracing::debug!(
            video_id = %id,
            error = %BrowserError::LookupFailed,
            cause = %err,
            "playback torn down",
        ),
    }
}

#[async_trait]
impl Accept<ResumeSessionRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: ResumeSessionRequestModel) -> Outcome<()> {
        match ::std::sync::Arc::clone(&self.credentials).get().await {
            Ok(Some(token)) => {
                self.transition(Transition::SignedIn(token)).await;
            },
            Ok(None) => {},
            Err(err) => ::tracing::warn!(error = %err, "failed to read stored credentials"),
        }

        Ok(())
    }
}

#[async_trait]
impl Accept<RestoreSessionRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: RestoreSessionRequestModel) -> Outcome<()> {
        ::std::sync::Arc::clone(&self).accept(ResumeSessionRequestModel).await?;

        self.accept(RefreshRequestModel).await
    }
}

#[async_trait]
impl Accept<RefreshRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: RefreshRequestModel) -> Outcome<()> {
        let fetched = self
            .remote(async {
                ::tokio::try_join!(
                    ::std::sync::Arc::clone(&self.catalog).get_folders(),
                    ::std::sync::Arc::clone(&self.catalog).get_videos(),
                )
            })
            .await;

        match fetched {
            Ok((folders, videos)) => {
                ::tracing::debug!(folders = folders.len(), videos = videos.len(), "catalog received");
                self.transition(Transition::CatalogReceived { folders, videos }).await;

                Ok(())
            },
            Err(err) => {
                self.transition(Transition::CatalogFetchSettled).await;

                self.request_failed("Failed to load folders and videos", err).await
            },
        }
    }
}

#[async_trait]
impl Accept<LoginRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: LoginRequestModel) -> Outcome<()> {
        let LoginRequestModel { username, password } = request;
        let credentials = Credentials { username, password };

        let token = match self.remote(::std::sync::Arc::clone(&self.authenticator).login(credentials)).await {
            Ok(token) => token,
            Err(GatewayError::Rejected { status, .. }) => {
                ::tracing::info!(status, "login rejected");

                return self.fail(BrowserError::AuthenticationFailed).await;
            },
            Err(err) => return self.request_failed("Login failed", err).await,
        };

        if let Err(err) = ::std::sync::Arc::clone(&self.credentials).set(token.clone()).await {
            ::tracing::warn!(error = %err, "failed to persist credentials");
        }

        self.transition(Transition::SignedIn(token)).await;
        self.notify(Notice::info("Login successful!")).await;

        Ok(())
    }
}

#[async_trait]
impl Accept<RegisterRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: RegisterRequestModel) -> Outcome<()> {
        let RegisterRequestModel { username, password } = request;

        if username.trim().is_empty() || password.is_empty() {
            return self.fail(BrowserError::MissingInput("both username and password")).await;
        }

        let credentials = Credentials { username, password };

        match self.remote(::std::sync::Arc::clone(&self.authenticator).register(credentials)).await {
            Ok(()) => {
                self.notify(Notice::info("Registration successful, you can now log in")).await;

                Ok(())
            },
            Err(err) => self.request_failed("Registration failed", err).await,
        }
    }
}

#[async_trait]
impl Accept<LogoutRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: LogoutRequestModel) -> Outcome<()> {
        if !self.state.lock().await.is_authenticated() {
            return Ok(());
        }

        if let Err(err) = ::std::sync::Arc::clone(&self.credentials).delete().await {
            ::tracing::warn!(error = %err, "failed to forget stored credentials");
        }

        self.transition(Transition::SignedOut).await;

        Ok(())
    }
}

#[async_trait]
impl Accept<ToggleLoginPanelRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: ToggleLoginPanelRequestModel) -> Outcome<()> {
        self.transition(Transition::LoginPanelToggled).await;

        Ok(())
    }
}

#[async_trait]
impl Accept<EnterFolderRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: EnterFolderRequestModel) -> Outcome<()> {
        self.transition(Transition::EnteredFolder(request.folder)).await;

        Ok(())
    }
}

#[async_trait]
impl Accept<GoToRootRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: GoToRootRequestModel) -> Outcome<()> {
        self.transition(Transition::WentToRoot).await;

        Ok(())
    }
}

#[async_trait]
impl Accept<CreateFolderRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: CreateFolderRequestModel) -> Outcome<()> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(err) => return self.fail(err).await,
        };

        let name = request.name.trim();

        if name.is_empty() {
            return self.fail(BrowserError::MissingInput("a folder name")).await;
        }

        let draft = FolderDraft {
            name: name.to_owned().into(),
            parent: self.state.lock().await.cursor.folder_id(),
        };

        let parent = draft.parent;

        if let Err(err) = self.remote(::std::sync::Arc::clone(&self.catalog).insert_folder(draft, token)).await {
            return self.request_failed("Failed to create folder", err).await;
        }

        ::tracing::info!(?parent, "folder created");

        self.refresh_after_change().await
    }
}

#[async_trait]
impl Accept<DeleteFolderRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: DeleteFolderRequestModel) -> Outcome<()> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(err) => return self.fail(err).await,
        };

        if let Err(err) = self.remote(::std::sync::Arc::clone(&self.catalog).delete_folder(request.id, token)).await {
            return self.request_failed("Error deleting folder", err).await;
        }

        ::tracing::info!(id = request.id, "folder deleted");

        self.refresh_after_change().await
    }
}

#[async_trait]
impl Accept<CreateVideoRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: CreateVideoRequestModel) -> Outcome<()> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(err) => return self.fail(err).await,
        };

        let CreateVideoRequestModel { title, url } = request;
        let (title, url) = (title.trim(), url.trim());

        if title.is_empty() || url.is_empty() {
            return self.fail(BrowserError::MissingInput("both video name and URL")).await;
        }

        if ::domain::resolve(url).is_none() {
            return self.fail(BrowserError::InvalidUrl).await;
        }

        let draft = VideoDraft {
            title: title.to_owned().into(),
            youtube_url: url.to_owned().into(),
            folder: self.state.lock().await.cursor.folder_id(),
        };

        if let Err(err) = self.remote(::std::sync::Arc::clone(&self.catalog).insert_video(draft, token)).await {
            return self.request_failed("Failed to add video", err).await;
        }

        ::tracing::info!(url, "video added");
        self.notify(Notice::info("Video added successfully")).await;

        self.refresh_after_change().await
    }
}

#[async_trait]
impl Accept<DeleteVideoRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: DeleteVideoRequestModel) -> Outcome<()> {
        let token = match self.token().await {
            Ok(token) => token,
            Err(err) => return self.fail(err).await,
        };

        if let Err(err) = self.remote(::std::sync::Arc::clone(&self.catalog).delete_video(request.id, token)).await {
            return self.request_failed("Error deleting video", err).await;
        }

        ::tracing::info!(id = request.id, "video deleted");

        self.refresh_after_change().await
    }
}

#[async_trait]
impl Accept<SelectVideoRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, request: SelectVideoRequestModel) -> Outcome<()> {
        self.transition(Transition::VideoSelected(request.video)).await;

        Ok(())
    }
}

#[async_trait]
impl Accept<ClosePlayerRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: ClosePlayerRequestModel) -> Outcome<()> {
        let (before, _) = self.transition(Transition::PlayerClosed).await;

        if let (true, Some(video)) = (before.selection.player_open, before.selection.video) {
            self.dispatch_teardown(video);
        }

        Ok(())
    }
}

#[async_trait]
impl Accept<OpenInYoutubeRequestModel> for BrowserInteractor {
    async fn accept(self: ::std::sync::Arc<Self>, _: OpenInYoutubeRequestModel) -> Outcome<()> {
        let url = match &self.state.lock().await.selection {
            Selection { video: Some(video), player_open: true } if video.is_playable() => video.youtube_url.clone(),
            _ => return Ok(()),
        };

        if let Err(err) = ::std::sync::Arc::clone(&self.launcher).launch(&url).await {
            ::tracing::warn!(error = %err, %url, "failed to open link externally");

            return self.fail(BrowserError::LaunchFailed).await;
        }

        self.accept(ClosePlayerRequestModel).await
    }
}
