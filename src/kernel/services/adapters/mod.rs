//! Service adapters: filesystem specific implementations.

pub mod paths;
pub mod settings;

pub use paths::{ensure_log_dir, get_log_dir};
pub use settings::{
    build_config, ensure_settings_file, get_settings_path, load_settings, load_settings_from,
    parse_delimiter_codes, parse_trigger, write_default_settings,
};
