//! Wiring of the client: transports, session and repository.
//!
//! [`App`] is built once per process and hands out one view state holder
//! per screen. Tests build it from mock adapters with [`App::from_parts`].

use std::sync::Arc;

use tracing::{debug, info};

use crate::adapters::{FileSessionStore, ReqwestHttpClient, TungsteniteChatConnector};
use crate::api::GlitchApi;
use crate::config::ClientConfig;
use crate::error::{GlitchResult, NetworkError};
use crate::repository::Repository;
use crate::session::SessionContext;
use crate::traits::{ChatConnector, HttpClient, SessionStore};
use crate::view_state::{AuthView, LiveView, ProfileView, SearchView, SettingsView, StreamView};

#[derive(Clone)]
pub struct App {
    config: ClientConfig,
    repository: Repository,
    connector: Arc<dyn ChatConnector>,
}

impl App {
    /// Production wiring: reqwest, tokio-tungstenite and the session file.
    pub async fn bootstrap(config: ClientConfig) -> GlitchResult<Self> {
        let http = ReqwestHttpClient::with_timeout(config.request_timeout).map_err(|e| {
            NetworkError::from_http(e, &config.api_base_url)
        })?;
        let store = FileSessionStore::new()?;
        debug!(path = %store.path().display(), "Using session file");
        let connector = TungsteniteChatConnector::new(config.reconnect);

        let app = Self::from_parts(config, Arc::new(http), Arc::new(store), Arc::new(connector)).await;
        info!(
            api = %app.config.api_base_url,
            signed_in = app.session().is_signed_in(),
            "Client ready"
        );
        Ok(app)
    }

    pub async fn from_parts(
        config: ClientConfig,
        http: Arc<dyn HttpClient>,
        store: Arc<dyn SessionStore>,
        connector: Arc<dyn ChatConnector>,
    ) -> Self {
        let session = SessionContext::load(store).await;
        let api = GlitchApi::new(config.api_base_url.clone(), http);
        Self {
            repository: Repository::new(api, session),
            config,
            connector,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionContext {
        self.repository.session()
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn auth_view(&self) -> AuthView {
        AuthView::new(self.repository.clone())
    }

    pub fn stream_view(&self) -> StreamView {
        StreamView::new(self.repository.clone(), self.connector.clone(), &self.config)
    }

    pub fn profile_view(&self) -> ProfileView {
        ProfileView::new(self.repository.clone())
    }

    pub fn live_view(&self) -> LiveView {
        LiveView::new(self.repository.clone())
    }

    pub fn search_view(&self) -> SearchView {
        SearchView::new(self.repository.clone())
    }

    pub fn settings_view(&self) -> SettingsView {
        SettingsView::new(self.repository.clone())
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("repository", &self.repository)
            .finish()
    }
}
