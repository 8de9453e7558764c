use ::async_trait::async_trait;
use ::use_cases::gateways::CredentialStore;
use ::use_cases::models::state::Token;

use crate::utils::aliases::Fallible;
use crate::utils::aliases::MaybeOwnedPath;

/// Keeps the session token in a `userToken` file under `directory`.
#[derive(::bon::Builder)]
#[builder(on(_, into))]
pub struct FilesystemCredentialStore {
    directory: MaybeOwnedPath,
}

impl FilesystemCredentialStore {
    const SLOT: &'static str = "userToken";

    fn path(&self) -> ::std::path::PathBuf {
        self.directory.join(Self::SLOT)
    }
}

#[async_trait]
impl CredentialStore for FilesystemCredentialStore {
    async fn get(self: ::std::sync::Arc<Self>) -> Fallible<Option<Token>> {
        match ::tokio::fs::read_to_string(self.path()).await {
            Ok(contents) => {
                let token = contents.trim();

                Ok((!token.is_empty()).then(|| token.to_owned().into()))
            },

            Err(err) if err.kind() == ::std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn set(self: ::std::sync::Arc<Self>, token: Token) -> Fallible<()> {
        ::tokio::fs::create_dir_all(&self.directory).await?;
        ::tokio::fs::write(self.path(), token.as_bytes()).await?;

        ::tracing::debug!(path = %self.path().display(), "credentials stored");

        Ok(())
    }

    async fn delete(self: ::std::sync::Arc<Self>) -> Fallible<()> {
        match ::tokio::fs::remove_file(self.path()).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ::std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
