use ::async_trait::async_trait;
use ::use_cases::gateways::UrlLauncher;

use crate::utils::aliases::Fallible;

/// Hands links to whatever the desktop has registered for them.
pub struct SystemUrlLauncher;

#[async_trait]
impl UrlLauncher for SystemUrlLauncher {
    async fn launch(self: ::std::sync::Arc<Self>, url: &str) -> Fallible<()> {
        let url = url.to_owned();

        ::tokio::task::spawn_blocking(move || ::open::that(url)).await??;

        Ok(())
    }
}
