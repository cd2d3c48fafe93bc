pub mod environment;
pub mod paths;
pub mod terminal;

pub use environment::get_projects_dir;
pub use paths::{
    CONVERSATION_EXTENSION, conversation_id_from_filename, conversation_path,
    format_path_with_tilde, project_dir, validate_component,
};
