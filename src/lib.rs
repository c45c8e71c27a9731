pub mod config;
pub mod naming;
pub mod error;
pub mod ffi;

pub use config::{CaseMode, JoinOrder, NamingConfig, NamingConfigBuilder, TrimFallback};
pub use naming::{NamespaceNamingStrategy, NamingStrategy};
pub use error::NamingError;

// Re-export FFI functions for external use
pub use ffi::{
    namespace_naming_new,
    namespace_naming_validate_config,
    namespace_naming_free,
    namespace_naming_class_to_table_name,
    namespace_naming_property_to_column_name,
    namespace_naming_reference_column_name,
    namespace_naming_join_column_name,
    namespace_naming_join_table_name,
    namespace_naming_join_key_column_name,
    namespace_naming_free_string,
    namespace_naming_version,
    NamingResult,
};
