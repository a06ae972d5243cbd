//! CLI command implementations.

pub mod init;
pub mod listen;
pub mod logs;
pub mod status;
pub mod sync;
pub mod whoami;
