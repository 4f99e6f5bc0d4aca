pub mod helpers;
pub mod version;

pub use helpers::{build_insert, build_select, quote_ident};
pub use version::{
    CURRENT_LAYOUT, LEGACY_LAYOUT, META_KEY, VersionTableLayout, build_read_version,
    build_record_version, version_document,
};
