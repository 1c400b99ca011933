//! Infrastructure layer for filesystem and environment interactions.

pub mod paths;

pub use paths::{
    config_file_from_env, data_dir_from_env, expand_tilde, resolve_config_file, resolve_data_dir, STORE_FILE,
};
