/// Command-line parsing and command dispatch
pub mod cli;
/// Wire-format constants and runtime defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// PNG import and export of bit rasters
pub mod image;
/// Progress display for batch commands
pub mod progress;
/// JSON serialization of automata
pub mod wire;
