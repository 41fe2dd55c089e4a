//! Load-mutate-save orchestrations over a single record.
//!
//! None of these are atomic: two contexts racing on the same id can lose an update, the later
//! save rewriting the list from its own stale read.

use std::rc::Rc;

use crate::{
    error::{DirectionError, Result},
    model::{DirectionChangeEvent, DirectionRecord},
    repository::DirectionRepository,
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A saved record plus the change notification a caller can broadcast.
pub struct RecordUpdate {
    /// Record as persisted.
    pub record: DirectionRecord,
    /// Direction and change time of `record`.
    pub event: DirectionChangeEvent,
}

impl From<DirectionRecord> for RecordUpdate {
    fn from(record: DirectionRecord) -> Self {
        let event = DirectionChangeEvent::from(&record);
        Self { record, event }
    }
}

async fn update_record(
    repository: &dyn DirectionRepository,
    config_id: &str,
    mutate: impl FnOnce(&mut DirectionRecord),
) -> Result<RecordUpdate> {
    let mut record = repository
        .find_by_id(config_id)
        .await
        .ok_or(DirectionError::ConfigNotFound)?;
    mutate(&mut record);
    repository.save(&record).await;
    Ok(record.into())
}

#[derive(Clone)]
/// Flips a record between left-to-right and right-to-left.
pub struct ToggleDirectionUseCase {
    repository: Rc<dyn DirectionRepository>,
}

impl ToggleDirectionUseCase {
    /// Creates the use case over `repository`.
    pub fn new(repository: Rc<dyn DirectionRepository>) -> Self {
        Self { repository }
    }

    /// Flips the direction of `config_id` and persists it.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn execute(&self, config_id: &str) -> Result<RecordUpdate> {
        update_record(self.repository.as_ref(), config_id, DirectionRecord::toggle_direction).await
    }
}

#[derive(Clone)]
/// Edits a record's target list and enabled flag.
pub struct ManageUrlUseCase {
    repository: Rc<dyn DirectionRepository>,
}

impl ManageUrlUseCase {
    /// Creates the use case over `repository`.
    pub fn new(repository: Rc<dyn DirectionRepository>) -> Self {
        Self { repository }
    }

    /// Appends `url` to the targets of `config_id` unless already present.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn add_url(&self, config_id: &str, url: &str) -> Result<RecordUpdate> {
        update_record(self.repository.as_ref(), config_id, |record| {
            record.add_target_url(url)
        })
        .await
    }

    /// Removes `url` from the targets of `config_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn remove_url(&self, config_id: &str, url: &str) -> Result<RecordUpdate> {
        update_record(self.repository.as_ref(), config_id, |record| {
            record.remove_target_url(url)
        })
        .await
    }

    /// Flips the enabled flag of `config_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DirectionError::ConfigNotFound`] when no record has `config_id`.
    pub async fn toggle_enabled(&self, config_id: &str) -> Result<RecordUpdate> {
        update_record(self.repository.as_ref(), config_id, DirectionRecord::toggle_enabled).await
    }
}
