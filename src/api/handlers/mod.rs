pub mod admin;
pub mod content;
pub mod presentations;
pub mod viewer;

pub use admin::{admin_purge, cleanup_year, health};
pub use content::serve_file;
pub use presentations::{
    create_presentation, download_presentation, get_presentation, list_presentations,
};
pub use viewer::{resolve_viewer, view_presentation};
