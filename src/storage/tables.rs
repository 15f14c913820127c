use redb::TableDefinition;

/// Presentation records: uuid -> PresentationRecord (msgpack)
pub const PRESENTATIONS: TableDefinition<&str, &[u8]> = TableDefinition::new("presentations");

/// Blob path index: "{year}/{file_name}" -> uuid (for /files/ route lookups)
pub const PRESENTATION_PATHS: TableDefinition<&str, &str> =
    TableDefinition::new("presentation_paths");

/// Year index: year label -> msgpack Vec of presentation UUIDs
pub const YEAR_PRESENTATIONS: TableDefinition<&str, &[u8]> =
    TableDefinition::new("year_presentations");
