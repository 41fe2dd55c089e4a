//! Direction configuration data model.

mod backup;
mod direction;
mod event;
mod record;
mod url_pattern;

pub use backup::{DirectionState, ExtensionStorage, ImportPayload};
pub use direction::TextDirection;
pub use event::DirectionChangeEvent;
pub use record::DirectionRecord;
pub use url_pattern::{
    generate_config_id, is_valid_url_pattern, normalize_url, should_apply_direction,
};
