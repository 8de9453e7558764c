use ::async_trait::async_trait;
use ::use_cases::boundaries::Activate;
use ::use_cases::boundaries::Update;
use ::use_cases::models::notices::Notice;
use ::use_cases::models::notices::NoticeLevel;
use ::use_cases::models::state::ViewState;

use crate::utils::aliases::Fallible;

/// Terminal presenter: a spinner while requests are in flight, notices on stderr, and the
/// latest view state kept for [`TerminalView::render`].
pub struct TerminalView {
    spinner: ::indicatif::ProgressBar,
    latest: ::tokio::sync::Mutex<Option<ViewState>>,
}

impl TerminalView {
    pub fn new() -> Fallible<Self> {
        let style = ::indicatif::ProgressStyle::with_template("{spinner} {msg}")?;

        let spinner = ::indicatif::ProgressBar::new_spinner()
            .with_style(style)
            .with_message("Talking to the server...");

        spinner.set_draw_target(::indicatif::ProgressDrawTarget::hidden());

        Ok(Self { spinner, latest: ::tokio::sync::Mutex::new(None) })
    }

    /// The most recently presented state, drawn as a listing once the catalog has loaded.
    pub async fn render(&self) -> Option<String> {
        self.latest
            .lock()
            .await
            .as_ref()
            .filter(|state| !state.loading)
            .map(render_listing)
    }
}

#[async_trait]
impl Activate for TerminalView {
    async fn activate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        self.spinner.set_draw_target(::indicatif::ProgressDrawTarget::stderr());
        self.spinner.enable_steady_tick(::std::time::Duration::from_millis(100));

        Ok(())
    }

    async fn deactivate(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        self.spinner.disable_steady_tick();
        self.spinner.finish_and_clear();
        self.spinner.set_draw_target(::indicatif::ProgressDrawTarget::hidden());
        self.spinner.reset();

        Ok(())
    }
}

#[async_trait]
impl Update<ViewState> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, state: &ViewState) -> Fallible<()> {
        ::tracing::debug!(
            title = state.title(),
            loading = state.loading,
            authenticated = state.is_authenticated(),
            player_open = state.selection.player_open,
            "view state presented",
        );

        *self.latest.lock().await = Some(state.clone());

        Ok(())
    }
}

#[async_trait]
impl Update<Notice> for TerminalView {
    async fn update(self: ::std::sync::Arc<Self>, notice: &Notice) -> Fallible<()> {
        let line = render_notice(notice);

        self.spinner.suspend(|| eprintln!("{}", line));

        Ok(())
    }
}

fn render_notice(notice: &Notice) -> String {
    use ::colored::Colorize as _;

    match notice.level {
        NoticeLevel::Info => notice.message.green().to_string(),
        NoticeLevel::Error => format!("{} {}", "error:".red().bold(), notice.message.red()),
    }
}

fn render_listing(state: &ViewState) -> String {
    use ::std::fmt::Write as _;
    use ::colored::Colorize as _;

    let projection = state.projection();
    let mut listing = String::new();

    let session = if state.is_authenticated() { "signed in" } else { "signed out" };
    let _ = writeln!(listing, "{} {}", state.title().white().bold(), format!("({})", session).dimmed());

    if state.can_go_back() {
        let _ = writeln!(listing, "  {}", "..".dimmed());
    }

    for folder in &projection.child_folders {
        let _ = writeln!(listing, "  {:>6}  {}/", format!("#{}", folder.id).dimmed(), folder.name.blue().bold());
    }

    for video in &projection.child_videos {
        let link = if video.is_playable() { &*video.youtube_url } else { "no link" };

        let _ = writeln!(listing, "  {:>6}  {}  {}", format!("#{}", video.id).dimmed(), video.title, link.dimmed());
    }

    if projection.is_empty() {
        let _ = writeln!(listing, "  {}", "Nothing here yet".dimmed());
    }

    listing
}
