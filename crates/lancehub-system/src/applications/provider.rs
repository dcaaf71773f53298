//! Applications provider.
//!
//! One row per submission, own primary key. No secondary indexes: the
//! only lookups are by application id (approval) and full scans
//! (operator listing).

use crate::error::{SystemError, SystemResult};
use crate::partitions::StoragePartition;
use lancehub_commons::{Application, ApplicationId};
use lancehub_store::{EntityStore, Partition, StorageBackend};
use std::sync::Arc;

pub struct ApplicationsProvider {
    backend: Arc<dyn StorageBackend>,
}

impl EntityStore<ApplicationId, Application> for ApplicationsProvider {
    fn backend(&self) -> &Arc<dyn StorageBackend> {
        &self.backend
    }

    fn partition(&self) -> &str {
        StoragePartition::Applications.name()
    }
}

impl ApplicationsProvider {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let _ = backend.create_partition(&Partition::new(StoragePartition::Applications.name()));
        Self { backend }
    }

    /// Persists a new submission.
    pub fn create_application(&self, application: &Application) -> SystemResult<()> {
        self.put(&application.id, application)?;
        Ok(())
    }

    /// Fetches a submission, failing with `NotFound` when absent,
    /// including after approval deleted the row.
    pub fn get_application(&self, id: &ApplicationId) -> SystemResult<Application> {
        self.get(id)?
            .ok_or_else(|| SystemError::NotFound(format!("Application '{}' not found", id)))
    }

    /// All pending submissions, for operator review listings.
    pub fn list_applications(&self) -> SystemResult<Vec<Application>> {
        Ok(self.scan_all()?)
    }
}
