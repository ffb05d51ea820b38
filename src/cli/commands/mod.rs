pub mod changes;
mod command_result;
pub mod css;
pub mod disable;
pub mod hardcoded;
pub mod helper;
pub mod init;
pub mod keys;

pub use command_result::*;
