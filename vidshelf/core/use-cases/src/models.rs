pub mod state {
    use ::domain::Folder;
    use ::domain::FolderId;
    use ::domain::Projection;
    use ::domain::Video;

    use crate::utils::aliases::MaybeOwnedString;
    use crate::utils::aliases::MaybeOwnedVec;

    pub type Token = MaybeOwnedString;

    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub enum Cursor {
        #[default]
        Root,
        Folder(Folder),
    }

    impl Cursor {
        pub fn folder_id(&self) -> Option<FolderId> {
            match self {
                Self::Root => None,
                Self::Folder(folder) => Some(folder.id),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Session {
        pub token: Option<Token>,
    }

    impl Session {
        pub fn is_authenticated(&self) -> bool {
            self.token.is_some()
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct Selection {
        pub video: Option<Video>,
        pub player_open: bool,
    }

    /// Everything the presentation layer needs to draw the browser.
    ///
    /// Values are only ever replaced through [`ViewState::reduce`].
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ViewState {
        pub folders: MaybeOwnedVec<Folder>,
        pub videos: MaybeOwnedVec<Video>,

        pub cursor: Cursor,
        pub session: Session,
        pub selection: Selection,

        pub loading: bool,
        pub login_panel_visible: bool,
    }

    impl Default for ViewState {
        fn default() -> Self {
            Self::new()
        }
    }

    #[derive(Debug, Clone)]
    pub enum Transition {
        CatalogReceived { folders: Vec<Folder>, videos: Vec<Video> },
        CatalogFetchSettled,

        SignedIn(Token),
        SignedOut,
        LoginPanelToggled,

        EnteredFolder(Folder),
        WentToRoot,

        VideoSelected(Video),
        PlayerClosed,
    }

    impl ViewState {
        pub fn new() -> Self {
            Self {
                folders: MaybeOwnedVec::Borrowed(&[]),
                videos: MaybeOwnedVec::Borrowed(&[]),
                cursor: Cursor::Root,
                session: Session::default(),
                selection: Selection::default(),
                loading: true,
                login_panel_visible: false,
            }
        }

        pub fn reduce(self, transition: Transition) -> Self {
            match transition {
                Transition::CatalogReceived { folders, videos } => Self {
                    folders: folders.into(),
                    videos: videos.into(),
                    loading: false,
                    ..self
                },
                Transition::CatalogFetchSettled => Self { loading: false, ..self },

                Transition::SignedIn(token) => Self {
                    session: Session { token: Some(token) },
                    login_panel_visible: false,
                    ..self
                },
                Transition::SignedOut => Self { session: Session::default(), ..self },
                Transition::LoginPanelToggled if self.session.is_authenticated() => self,
                Transition::LoginPanelToggled => Self {
                    login_panel_visible: !self.login_panel_visible,
                    ..self
                },

                Transition::EnteredFolder(folder) => Self { cursor: Cursor::Folder(folder), ..self },
                Transition::WentToRoot => Self { cursor: Cursor::Root, ..self },

                Transition::VideoSelected(video) if video.is_playable() => Self {
                    selection: Selection { video: Some(video), player_open: true },
                    ..self
                },
                Transition::VideoSelected(_) => self,
                Transition::PlayerClosed => Self {
                    selection: Selection { player_open: false, ..self.selection },
                    ..self
                },
            }
        }

        pub fn projection(&self) -> Projection<'_> {
            ::domain::project(self.folders.iter(), self.videos.iter(), self.cursor.folder_id())
        }

        pub fn title(&self) -> &str {
            match &self.cursor {
                Cursor::Root => "Folders",
                Cursor::Folder(folder) => &folder.name,
            }
        }

        pub fn can_go_back(&self) -> bool {
            matches!(self.cursor, Cursor::Folder(_))
        }

        pub fn is_authenticated(&self) -> bool {
            self.session.is_authenticated()
        }

        /// The player page for the open selection, if its link resolves.
        pub fn player_document(&self) -> Option<String> {
            let Selection { video, player_open } = &self.selection;

            player_open
                .then_some(video.as_ref())
                .flatten()
                .and_then(Video::youtube_id)
                .map(|id| ::domain::build_embed_document(&id))
        }
    }
}

pub mod notices {
    use crate::utils::aliases::MaybeOwnedString;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Notice {
        pub level: NoticeLevel,
        pub message: MaybeOwnedString,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum NoticeLevel {
        Info,
        Error,
    }

    impl Notice {
        pub fn info(message: impl Into<MaybeOwnedString>) -> Self {
            Self { level: NoticeLevel::Info, message: message.into() }
        }

        pub fn error(message: impl Into<MaybeOwnedString>) -> Self {
            Self { level: NoticeLevel::Error, message: message.into() }
        }
    }
}

pub mod errors {
    use crate::utils::aliases::MaybeOwnedString;

    pub type Outcome<T> = ::std::result::Result<T, BrowserError>;

    pub type GatewayResult<T> = ::std::result::Result<T, GatewayError>;

    /// Failures a user can be told about.
    #[derive(Debug, Clone, PartialEq, Eq, ::thiserror::Error)]
    pub enum BrowserError {
        #[error("You must be logged in to do that")]
        Unauthorized,

        #[error("Invalid YouTube URL")]
        InvalidUrl,

        #[error("Invalid credentials")]
        AuthenticationFailed,

        #[error("{0}")]
        RequestFailed(MaybeOwnedString),

        #[error("Video metadata lookup failed")]
        LookupFailed,

        #[error("Could not open YouTube")]
        LaunchFailed,

        #[error("Please enter {0}")]
        MissingInput(&'static str),
    }

    #[derive(Debug, ::thiserror::Error)]
    pub enum GatewayError {
        #[error("request rejected with status {status}")]
        Rejected { status: u16, body: MaybeOwnedString },

        #[error(transparent)]
        Transport(#[from] ::anyhow::Error),
    }

    impl BrowserError {
        /// Wraps a remote failure, appending whatever explanation the server sent back.
        pub fn request_failed(context: &'static str, err: &GatewayError) -> Self {
            match err {
                GatewayError::Rejected { body, .. } if !body.trim().is_empty() => {
                    Self::RequestFailed(format!("{}: {}", context, body.trim()).into())
                },
                _ => Self::RequestFailed(context.into()),
            }
        }
    }
}

pub mod descriptors {
    use ::domain::FolderId;

    use crate::utils::aliases::MaybeOwnedString;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Credentials {
        pub username: MaybeOwnedString,
        pub password: MaybeOwnedString,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct FolderDraft {
        pub name: MaybeOwnedString,
        pub parent: Option<FolderId>,
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct VideoDraft {
        pub title: MaybeOwnedString,
        pub youtube_url: MaybeOwnedString,
        pub folder: Option<FolderId>,
    }

    /// Whatever the oEmbed endpoint knows about a video.
    #[derive(Debug, Clone, PartialEq, Eq, Default)]
    pub struct VideoMetadata {
        pub title: Option<MaybeOwnedString>,
        pub thumbnail_url: Option<MaybeOwnedString>,
    }
}
