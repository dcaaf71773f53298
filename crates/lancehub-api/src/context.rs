//! Wires config into the service graph.

use crate::config::ServerConfig;
use lancehub_auth::{CredentialService, SessionVerifier};
use lancehub_commons::SnowflakeGenerator;
use lancehub_filestore::{AssetManager, ProfileImageStore};
use lancehub_profile::ProfileService;
use lancehub_store::{InMemoryBackend, RocksDbBackend, StorageBackend};
use lancehub_system::{AccountsProvider, ApplicationsProvider, StoragePartition};
use lancehub_workflow::ApprovalWorkflow;
use std::path::Path;
use std::sync::Arc;

/// The fully wired service graph behind the operation facade.
pub struct AppContext {
    pub accounts: Arc<AccountsProvider>,
    pub applications: Arc<ApplicationsProvider>,
    pub credentials: CredentialService,
    pub sessions: SessionVerifier,
    pub profiles: ProfileService,
    pub assets: AssetManager,
    pub workflow: ApprovalWorkflow,
}

impl AppContext {
    /// Builds the graph from config: storage backend, providers, then
    /// the services that share them.
    pub fn build(config: &ServerConfig) -> anyhow::Result<Self> {
        let backend: Arc<dyn StorageBackend> = match config.storage.backend.as_str() {
            "memory" => Arc::new(InMemoryBackend::new()),
            _ => {
                let path = Path::new(&config.storage.data_path).join("lancehub");
                Arc::new(RocksDbBackend::open(path, &StoragePartition::all())?)
            }
        };
        Self::with_backend(backend, config)
    }

    /// Same wiring over a caller-supplied backend. Tests and
    /// embedders hand in an in-memory backend here.
    pub fn with_backend(
        backend: Arc<dyn StorageBackend>,
        config: &ServerConfig,
    ) -> anyhow::Result<Self> {
        let ids = Arc::new(SnowflakeGenerator::new(config.auth.id_worker));
        let accounts = Arc::new(AccountsProvider::new(Arc::clone(&backend)));
        let applications = Arc::new(ApplicationsProvider::new(backend));

        let credentials = CredentialService::new(
            Arc::clone(&accounts),
            Arc::clone(&ids),
            config.auth.jwt_secret.clone(),
            config.auth.token_ttl_days,
            config.auth.bcrypt_cost,
        );
        let sessions = SessionVerifier::new(config.auth.jwt_secret.clone());
        let profiles = ProfileService::new(Arc::clone(&accounts));

        let images = ProfileImageStore::open(&config.uploads.path)?;
        let assets = AssetManager::new(Arc::clone(&accounts), images);

        let workflow =
            ApprovalWorkflow::new(Arc::clone(&accounts), Arc::clone(&applications), ids);

        Ok(Self {
            accounts,
            applications,
            credentials,
            sessions,
            profiles,
            assets,
            workflow,
        })
    }
}
