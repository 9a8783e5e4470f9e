//! Configuration sources, lowest precedence first: global file, local file,
//! environment.

pub mod environment;
pub mod global_file;
pub mod local_file;
