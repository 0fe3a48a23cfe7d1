#[cfg(feature = "cli")]
pub mod cli;
pub mod style_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use style_config::StyleConfig;
