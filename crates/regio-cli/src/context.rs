use std::sync::Arc;

use anyhow::Context;
use regio_config::RegioConfig;
use regio_db::RegionDb;
use regio_remote::RemoteClient;
use regio_resolve::CacheFirstResolver;

pub type Resolver = CacheFirstResolver<RegionDb, RemoteClient>;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: RegioConfig,
    pub resolver: Arc<Resolver>,
}

impl AppContext {
    pub async fn init(config: RegioConfig) -> anyhow::Result<Self> {
        let store = RegionDb::open(&config.store)
            .await
            .with_context(|| format!("failed to open region store '{}'", config.store.path))?;
        let source = RemoteClient::new(&config.remote).context("failed to build HTTP client")?;
        tracing::debug!(base_url = source.base_url(), "region source ready");

        Ok(Self {
            resolver: Arc::new(CacheFirstResolver::new(Arc::new(store), Arc::new(source))),
            config,
        })
    }

    pub fn root_title(&self) -> &str {
        &self.config.general.root_title
    }
}
