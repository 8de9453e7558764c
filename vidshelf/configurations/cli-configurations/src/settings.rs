use crate::utils::aliases::Fallible;

/// Layered as: built-in defaults, `vidshelf.toml` (or `--config`), `VIDSHELF__*` variables,
/// then command-line overrides.
#[derive(Debug, Clone, Default, ::serde::Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub credentials: CredentialSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, ::serde::Deserialize)]
pub struct ApiSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_oembed_url")]
    pub oembed_url: String,
}

#[derive(Debug, Clone, ::serde::Deserialize)]
pub struct CredentialSettings {
    #[serde(default = "default_credentials_directory")]
    pub directory: ::std::path::PathBuf,
}

#[derive(Debug, Clone, ::serde::Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_logging_directory")]
    pub directory: ::std::path::PathBuf,
    /// Used when `RUST_LOG` is unset.
    #[serde(default = "default_logging_filter")]
    pub filter: String,
}

#[derive(Debug, Default)]
pub struct Overrides<'a> {
    pub file: Option<&'a ::std::path::Path>,
    pub base_url: Option<&'a str>,
}

impl Settings {
    pub fn load(overrides: Overrides<'_>) -> Fallible<Self> {
        let file = match overrides.file {
            Some(path) => ::config::File::from(path).required(true),
            None => ::config::File::with_name("vidshelf").required(false),
        };

        let settings = ::config::Config::builder()
            .add_source(file)
            .add_source(
                ::config::Environment::with_prefix("VIDSHELF")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("api.base_url", overrides.base_url)?
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self { base_url: default_base_url(), oembed_url: default_oembed_url() }
    }
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self { directory: default_credentials_directory() }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self { directory: default_logging_directory(), filter: default_logging_filter() }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_owned()
}

fn default_oembed_url() -> String {
    ::infrastructures::gateways::metadata::YOUTUBE_OEMBED_ENDPOINT.to_owned()
}

fn default_credentials_directory() -> ::std::path::PathBuf {
    ".vidshelf".into()
}

fn default_logging_directory() -> ::std::path::PathBuf {
    ".vidshelf/logs".into()
}

fn default_logging_filter() -> String {
    "info".to_owned()
}
