//! Admin-managed site content.
pub mod backup;
/// Inline page edits
pub mod edits;

pub use backup::{
    BackupError,
    ContentBackup,
    Section,
    export,
    import,
    save_section,
};
pub use edits::{
    EDITS_KEY,
    EditError,
    EditExport,
    export_edits,
    export_file_name,
    load_edits,
    record_edit,
};
