pub(crate) mod settings;
pub(crate) mod utils;

use ::anyhow::Context as _;
use ::domain::FolderId;
use ::domain::VideoId;
use ::infrastructures::boundaries::TerminalView;
use ::infrastructures::gateways::api::RestApiClient;
use ::infrastructures::gateways::credentials::FilesystemCredentialStore;
use ::infrastructures::gateways::launchers::SystemUrlLauncher;
use ::infrastructures::gateways::metadata::OembedLookup;
use ::use_cases::boundaries::Accept;
use ::use_cases::boundaries::CreateFolderRequestModel;
use ::use_cases::boundaries::CreateVideoRequestModel;
use ::use_cases::boundaries::DeleteFolderRequestModel;
use ::use_cases::boundaries::DeleteVideoRequestModel;
use ::use_cases::boundaries::EnterFolderRequestModel;
use ::use_cases::boundaries::LoginRequestModel;
use ::use_cases::boundaries::LogoutRequestModel;
use ::use_cases::boundaries::OpenInYoutubeRequestModel;
use ::use_cases::boundaries::RegisterRequestModel;
use ::use_cases::boundaries::RestoreSessionRequestModel;
use ::use_cases::boundaries::ResumeSessionRequestModel;
use ::use_cases::boundaries::SelectVideoRequestModel;
use ::use_cases::interactors::BrowserInteractor;
use ::use_cases::models::errors::Outcome;

use crate::settings::Overrides;
use crate::settings::Settings;
use crate::utils::aliases::Fallible;
use crate::utils::extensions::ArgMatchesExt;

#[tokio::main]
async fn main() -> Fallible<::std::process::ExitCode> {
    let matches = command().get_matches();

    let settings = Settings::load(Overrides {
        file: matches.get_one::<::std::path::PathBuf>("config").map(::std::path::PathBuf::as_path),
        base_url: matches.get_one::<::std::string::String>("api").map(::std::string::String::as_str),
    })?;

    let writer = ::tracing_appender::rolling::daily(&settings.logging.directory, "vidshelf.log");
    let (writer, _guard) = ::tracing_appender::non_blocking(writer);

    ::tracing_subscriber::fmt()
        .with_writer(writer)
        .with_env_filter(
            ::tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| ::tracing_subscriber::EnvFilter::try_new(&settings.logging.filter))?,
        )
        .with_ansi(false)
        .init();

    ::tracing::debug!(?settings, "settings loaded");

    let view = ::std::sync::Arc::new(TerminalView::new()?);

    let api = ::std::sync::Arc::new(
        RestApiClient::builder()
            .base_url(::url::Url::parse(&settings.api.base_url).context("api.base_url is not a valid URL")?)
            .build(),
    );

    let credentials = ::std::sync::Arc::new(
        FilesystemCredentialStore::builder()
            .directory(settings.credentials.directory.clone())
            .build(),
    );

    let metadata = ::std::sync::Arc::new(
        OembedLookup::builder()
            .endpoint(::url::Url::parse(&settings.api.oembed_url).context("api.oembed_url is not a valid URL")?)
            .build(),
    );

    let interactor = ::std::sync::Arc::new(BrowserInteractor::new(
        ::std::sync::Arc::clone(&view) as _,
        ::std::sync::Arc::clone(&api) as _,
        ::std::sync::Arc::clone(&api) as _,
        credentials,
        metadata,
        ::std::sync::Arc::new(SystemUrlLauncher),
    ));

    let outcome = match matches.subcommand() {
        Some(("browse", matches)) => {
            let folder = matches.get_one::<FolderId>("folder").copied();

            prepare(&interactor, folder).await?
        },
        Some(("login", matches)) => {
            let request = LoginRequestModel::new(
                matches.required::<::std::string::String>("username")?.to_owned(),
                matches.required::<::std::string::String>("password")?.to_owned(),
            );

            ::std::sync::Arc::clone(&interactor).accept(request).await
        },
        Some(("register", matches)) => {
            let request = RegisterRequestModel::new(
                matches.required::<::std::string::String>("username")?.to_owned(),
                matches.required::<::std::string::String>("password")?.to_owned(),
            );

            ::std::sync::Arc::clone(&interactor).accept(request).await
        },
        Some(("logout", _)) => {
            match ::std::sync::Arc::clone(&interactor).accept(ResumeSessionRequestModel).await {
                Ok(()) => ::std::sync::Arc::clone(&interactor).accept(LogoutRequestModel).await,
                Err(err) => Err(err),
            }
        },
        Some(("mkdir", matches)) => {
            let name = matches.required::<::std::string::String>("name")?.to_owned();
            let parent = matches.get_one::<FolderId>("parent").copied();

            match prepare(&interactor, parent).await? {
                Ok(()) => ::std::sync::Arc::clone(&interactor).accept(CreateFolderRequestModel::new(name)).await,
                Err(err) => Err(err),
            }
        },
        Some(("rmdir", matches)) => {
            let id = *matches.required::<FolderId>("id")?;

            match restore(&interactor).await {
                Ok(()) => ::std::sync::Arc::clone(&interactor).accept(DeleteFolderRequestModel::new(id)).await,
                Err(err) => Err(err),
            }
        },
        Some(("add-video", matches)) => {
            let title = matches.required::<::std::string::String>("title")?.to_owned();
            let url = matches.required::<::std::string::String>("url")?.to_owned();
            let folder = matches.get_one::<FolderId>("folder").copied();

            match prepare(&interactor, folder).await? {
                Ok(()) => ::std::sync::Arc::clone(&interactor).accept(CreateVideoRequestModel::new(title, url)).await,
                Err(err) => Err(err),
            }
        },
        Some(("rm-video", matches)) => {
            let id = *matches.required::<VideoId>("id")?;

            match restore(&interactor).await {
                Ok(()) => ::std::sync::Arc::clone(&interactor).accept(DeleteVideoRequestModel::new(id)).await,
                Err(err) => Err(err),
            }
        },
        Some(("play", matches)) => {
            let id = *matches.required::<VideoId>("id")?;
            let output = matches.required::<::std::path::PathBuf>("output")?;

            if let Err(err) = restore(&interactor).await {
                return Ok(failure(err));
            }

            let video = interactor
                .state()
                .await
                .videos
                .iter()
                .find(|video| video.id == id)
                .cloned()
                .with_context(|| format!("no video with id {}", id))?;

            ::std::sync::Arc::clone(&interactor).accept(SelectVideoRequestModel::new(video)).await?;

            if matches.get_flag("external") {
                ::std::sync::Arc::clone(&interactor).accept(OpenInYoutubeRequestModel).await
            } else {
                let document = interactor
                    .state()
                    .await
                    .player_document()
                    .with_context(|| format!("video {} has no playable YouTube link", id))?;

                ::tokio::fs::write(output, document).await?;
                println!("{}", output.display());

                return Ok(::std::process::ExitCode::SUCCESS);
            }
        },

        _ => unreachable!(),
    };

    if let Err(err) = outcome {
        return Ok(failure(err));
    }

    if let Some(listing) = view.render().await {
        print!("{}", listing);
    }

    Ok(::std::process::ExitCode::SUCCESS)
}

/// Already shown to the user as a notice, so only logged here.
fn failure(err: ::use_cases::models::errors::BrowserError) -> ::std::process::ExitCode {
    ::tracing::info!(error = %err, "command failed");

    ::std::process::ExitCode::FAILURE
}

async fn restore(interactor: &::std::sync::Arc<BrowserInteractor>) -> Outcome<()> {
    ::std::sync::Arc::clone(interactor).accept(RestoreSessionRequestModel).await
}

/// Restores the session, then moves the cursor to `folder`, which must be in the fetched catalog.
async fn prepare(interactor: &::std::sync::Arc<BrowserInteractor>, folder: Option<FolderId>) -> Fallible<Outcome<()>> {
    if let Err(err) = restore(interactor).await {
        return Ok(Err(err));
    }

    let Some(id) = folder else {
        return Ok(Ok(()));
    };

    let folder = interactor
        .state()
        .await
        .folders
        .iter()
        .find(|folder| folder.id == id)
        .cloned()
        .with_context(|| format!("no folder with id {}", id))?;

    Ok(::std::sync::Arc::clone(interactor).accept(EnterFolderRequestModel::new(folder)).await)
}

fn command() -> ::clap::Command {
    let credentials = [
        ::clap::Arg::new("username")
            .short('u')
            .long("username")
            .required(true)
            .value_parser(::clap::value_parser!(::std::string::String)),
        ::clap::Arg::new("password")
            .short('p')
            .long("password")
            .required(true)
            .value_parser(::clap::value_parser!(::std::string::String)),
    ];

    let folder = ::clap::Arg::new("folder")
        .short('f')
        .long("folder")
        .value_parser(::clap::value_parser!(FolderId));

    ::clap::Command::new("vidshelf")
        .about("Browse and curate a shelf of YouTube videos organised in folders")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            ::clap::Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(::clap::value_parser!(::std::path::PathBuf)),
        )
        .arg(
            ::clap::Arg::new("api")
                .long("api")
                .global(true)
                .value_parser(::clap::value_parser!(::std::string::String)),
        )
        .subcommand(::clap::Command::new("browse").arg(folder.clone()))
        .subcommand(::clap::Command::new("login").args(credentials.clone()))
        .subcommand(::clap::Command::new("register").args(credentials))
        .subcommand(::clap::Command::new("logout"))
        .subcommand(
            ::clap::Command::new("mkdir")
                .arg(
                    ::clap::Arg::new("name")
                        .required(true)
                        .value_parser(::clap::value_parser!(::std::string::String)),
                )
                .arg(
                    ::clap::Arg::new("parent")
                        .long("parent")
                        .value_parser(::clap::value_parser!(FolderId)),
                ),
        )
        .subcommand(
            ::clap::Command::new("rmdir").arg(
                ::clap::Arg::new("id")
                    .required(true)
                    .value_parser(::clap::value_parser!(FolderId)),
            ),
        )
        .subcommand(
            ::clap::Command::new("add-video")
                .arg(
                    ::clap::Arg::new("title")
                        .required(true)
                        .value_parser(::clap::value_parser!(::std::string::String)),
                )
                .arg(
                    ::clap::Arg::new("url")
                        .required(true)
                        .value_parser(::clap::value_parser!(::std::string::String)),
                )
                .arg(folder),
        )
        .subcommand(
            ::clap::Command::new("rm-video").arg(
                ::clap::Arg::new("id")
                    .required(true)
                    .value_parser(::clap::value_parser!(VideoId)),
            ),
        )
        .subcommand(
            ::clap::Command::new("play")
                .arg(
                    ::clap::Arg::new("id")
                        .required(true)
                        .value_parser(::clap::value_parser!(VideoId)),
                )
                .arg(
                    ::clap::Arg::new("output")
                        .short('o')
                        .long("output")
                        .default_value("player.html")
                        .value_parser(::clap::value_parser!(::std::path::PathBuf)),
                )
                .arg(
                    ::clap::Arg::new("external")
                        .long("external")
                        .action(::clap::ArgAction::SetTrue),
                ),
        )
}
