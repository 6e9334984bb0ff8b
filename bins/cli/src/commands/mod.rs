//! Command handlers.

pub mod handlers;
pub mod info;
pub mod pipelines;
pub mod serve;
pub mod settings;
pub mod verify;

pub use handlers::{run_dev_config, run_dev_health};
pub use info::run_info;
pub use pipelines::{run_build_all_command, run_build_flutter_command};
pub use serve::run_serve;
pub use settings::run_settings;
pub use verify::run_verify_structure_command;
