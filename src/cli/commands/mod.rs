pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod tree;

pub use command_result::*;
