//! Builds engine inputs from validated configuration.

use std::sync::Arc;

use lotdraw_config::{DrawConfig, StorageConfig};
use lotdraw_core::{EngineSettings, SetupError, Topic, TopicCatalog};
use lotdraw_storage::{JsonFileStore, MemoryStore, SnapshotStore};

/// Engine settings and topic catalog for a draw configuration.
pub fn layout(config: &DrawConfig) -> Result<(EngineSettings, TopicCatalog), SetupError> {
    let catalog = TopicCatalog::new(
        config
            .topics
            .iter()
            .map(|t| Topic::new(t.id, t.text.clone()))
            .collect(),
    )?;

    let settings = EngineSettings {
        slot_count: config.slot_count,
        admin_name: config.admin_name.clone(),
        reserved_slot: config.reserved_slot_number,
        reserved_topic: config.reserved_topic_id,
    };
    settings.check(&catalog)?;

    Ok((settings, catalog))
}

/// Snapshot file store, or a process-local store when persistence is off.
pub fn store_for(config: &StorageConfig) -> Arc<dyn SnapshotStore> {
    if config.enabled {
        Arc::new(JsonFileStore::new(&config.snapshot_path))
    } else {
        Arc::new(MemoryStore::new())
    }
}
