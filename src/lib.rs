pub mod cli;
pub mod config;
pub mod fix;
pub mod init;
pub mod presets;
pub mod rules;
pub mod source;
