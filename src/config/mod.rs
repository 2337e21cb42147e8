pub mod error;
pub mod load;
pub mod paths;
pub mod save;
pub mod schema;

pub use error::ConfigError;
pub use load::{read_config, read_config_version};
pub use paths::{
    default_install_dir, InstallPaths, CLAUDE_DIR, COMMANDS_NAMESPACE, CONFIG_FILE_NAME,
    CONFIG_ROOT_DIR, EXTERNAL_TOOL_CONFIG_FILE_NAME,
};
pub use save::{ensure_root_dir, write_config};
pub use schema::{
    create_default_config, is_older_schema_version, CollaborationMode, Config, ConfigOverrides,
    LaneRouting, McpProvider, ModelRouting, ModelType, ReviewRouting, RoutingLane,
    RoutingStrategy, SupportedLang, CONFIG_SCHEMA_VERSION,
};
