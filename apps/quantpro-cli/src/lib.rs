//! Building blocks of the `quantpro` binary: result rendering, project
//! scaffolding and log setup.
pub mod init;
pub mod render;
pub mod telemetry;
