use anyhow::Context;
use mailsift_admin::{DashboardController, TodoController};
use mailsift_analysis::{DeepAnalysisController, ThemesController};
use mailsift_api::HttpBackend;
use mailsift_config::{AppConfig, ConfigManager};
use mailsift_core::SharedSelection;
use mailsift_search::{SearchController, SearchOptions};
use mailsift_session::{FileStore, MemoryStore, SessionStore};
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub config_manager: ConfigManager,
    pub config: AppConfig,
    pub search: SearchController<HttpBackend>,
    pub themes: ThemesController<HttpBackend>,
    pub deep: DeepAnalysisController<HttpBackend>,
    pub dashboard: DashboardController<HttpBackend>,
    pub todos: TodoController<HttpBackend>,
}

impl AppState {
    pub fn initialize() -> anyhow::Result<Self> {
        let config_manager = ConfigManager::new().context("initialize config manager")?;
        let config = config_manager.load().context("load app config")?;

        let backend = Arc::new(
            HttpBackend::new(
                config.backend.base_url.clone(),
                Duration::from_secs(config.backend.request_timeout_secs),
                config.backend.retry_gateway_timeout,
            )
            .context("initialize backend client")?,
        );

        let session: Arc<dyn SessionStore> = if config.ui.persist_session {
            Arc::new(
                FileStore::open(config_manager.session_path()).context("open session store")?,
            )
        } else {
            Arc::new(MemoryStore::new())
        };

        let selection = Arc::new(SharedSelection::new());
        let debounce = Duration::from_millis(config.ui.debounce_ms);
        let options = SearchOptions {
            results_per_page: config.search.results_per_page,
            default_min_relevance: config.search.default_min_relevance,
            debounce,
        };

        let search = SearchController::new(backend.clone(), session, selection.clone(), options);
        let themes = ThemesController::new(backend.clone(), selection.clone());
        let deep = DeepAnalysisController::new(backend.clone());
        let dashboard = DashboardController::new(backend.clone(), debounce);
        let todos = TodoController::new(backend);

        Ok(Self {
            config_manager,
            config,
            search,
            themes,
            deep,
            dashboard,
            todos,
        })
    }
}
