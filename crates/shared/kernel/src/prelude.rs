pub use crate::access::{AccessKey, AccessKeyError, StashId};
pub use crate::config::{ConfigError, load_config};
pub use ts64_domain::config::AppConfig;
pub use ts64_domain::media::{InputFile, MediaKind};
pub use ts64_domain::stash::{StatKind, StatsRecord};
