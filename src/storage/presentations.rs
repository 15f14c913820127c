use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::{PresentationRecord, Year};
use super::tables::*;

impl Database {
    // ========================================================================
    // Presentation operations
    // ========================================================================

    /// Store a presentation record and update the path and year indexes
    pub fn put_presentation(&self, record: &PresentationRecord) -> Result<(), DatabaseError> {
        debug_assert!(!record.id.is_empty(), "presentation id must not be empty");
        debug_assert!(
            !record.file_path.is_empty(),
            "presentation file_path must not be empty"
        );

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(PRESENTATIONS)?;
            let data = rmp_serde::to_vec_named(record)?;
            table.insert(record.id.as_str(), data.as_slice())?;

            let mut path_table = write_txn.open_table(PRESENTATION_PATHS)?;
            path_table.insert(record.file_path.as_str(), record.id.as_str())?;

            // Maintain year index
            let mut year_table = write_txn.open_table(YEAR_PRESENTATIONS)?;
            let year_label = record.year.label();
            let mut ids: Vec<String> = year_table
                .get(year_label)?
                .map(|v| rmp_serde::from_slice(v.value()).unwrap_or_default())
                .unwrap_or_default();

            if !ids.contains(&record.id) {
                ids.push(record.id.clone());
                let index_data = rmp_serde::to_vec_named(&ids)?;
                year_table.insert(year_label, index_data.as_slice())?;
            }
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a presentation by its UUID
    pub fn get_presentation(&self, id: &str) -> Result<Option<PresentationRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PRESENTATIONS)?;

        match table.get(id)? {
            Some(data) => {
                let record: PresentationRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Get a presentation by its blob path (resolves path -> uuid -> record)
    pub fn get_presentation_by_path(
        &self,
        path: &str,
    ) -> Result<Option<PresentationRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let path_table = read_txn.open_table(PRESENTATION_PATHS)?;

        let id = match path_table.get(path)? {
            Some(data) => data.value().to_string(),
            None => return Ok(None),
        };

        let table = read_txn.open_table(PRESENTATIONS)?;
        match table.get(id.as_str())? {
            Some(data) => {
                let record: PresentationRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Check if a blob path is already in use
    pub fn path_exists(&self, path: &str) -> Result<bool, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PRESENTATION_PATHS)?;
        Ok(table.get(path)?.is_some())
    }

    /// All presentations, newest first. Records that fail to decode (for
    /// example a year label written before the enum was closed) are skipped.
    pub fn list_presentations(&self) -> Result<Vec<PresentationRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PRESENTATIONS)?;

        let mut records = Vec::new();
        for result in table.iter()? {
            let (key, value) = result?;
            match rmp_serde::from_slice::<PresentationRecord>(value.value()) {
                Ok(record) => records.push(record),
                Err(e) => {
                    tracing::warn!(id = key.value(), error = %e, "Skipping undecodable presentation record");
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Presentations for one year category, newest first
    pub fn list_by_year(&self, year: Year) -> Result<Vec<PresentationRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let year_table = read_txn.open_table(YEAR_PRESENTATIONS)?;
        let table = read_txn.open_table(PRESENTATIONS)?;

        let ids: Vec<String> = match year_table.get(year.label())? {
            Some(data) => rmp_serde::from_slice(data.value())?,
            None => return Ok(Vec::new()),
        };

        let mut records = Vec::new();
        for id in ids {
            if let Some(data) = table.get(id.as_str())? {
                match rmp_serde::from_slice::<PresentationRecord>(data.value()) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        tracing::warn!(id = %id, error = %e, "Skipping undecodable presentation record");
                    }
                }
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Delete every presentation in a year category in one transaction.
    /// Returns the deleted records so callers can clean up their blobs.
    pub fn delete_by_year(&self, year: Year) -> Result<Vec<PresentationRecord>, DatabaseError> {
        let write_txn = self.begin_write()?;

        let deleted = {
            let ids: Vec<String> = {
                let year_table = write_txn.open_table(YEAR_PRESENTATIONS)?;
                let ids = match year_table.get(year.label())? {
                    Some(data) => rmp_serde::from_slice(data.value())?,
                    None => Vec::new(),
                };
                ids
            };

            let mut deleted = Vec::with_capacity(ids.len());
            {
                let mut table = write_txn.open_table(PRESENTATIONS)?;
                let mut path_table = write_txn.open_table(PRESENTATION_PATHS)?;
                for id in &ids {
                    let record: Option<PresentationRecord> = match table.get(id.as_str())? {
                        Some(data) => rmp_serde::from_slice(data.value()).ok(),
                        None => None,
                    };
                    table.remove(id.as_str())?;
                    if let Some(record) = record {
                        path_table.remove(record.file_path.as_str())?;
                        deleted.push(record);
                    }
                }
            }
            {
                let mut year_table = write_txn.open_table(YEAR_PRESENTATIONS)?;
                year_table.remove(year.label())?;
            }
            deleted
        };

        write_txn.commit()?;
        Ok(deleted)
    }
}
