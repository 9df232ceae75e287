pub mod output;
pub mod run_log;

pub use output::OutputDirectory;
pub use run_log::RunLog;
