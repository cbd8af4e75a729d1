//! Wire-format constants and runtime configuration defaults

// Wire format
/// Prefix of every state token, followed by the numeric id
pub const STATE_TOKEN_PREFIX: &str = "q_";
/// Symbol key standing for epsilon transitions in the NFA wire format
pub const EPSILON_KEY: &str = "";

// Raster conversion
/// Luma value at or above which a PNG pixel counts as on
pub const PIXEL_ON_THRESHOLD: u8 = 128;
/// Luma written for on cells when exporting
pub const PIXEL_ON_LUMA: u8 = 255;
/// Luma written for off cells when exporting
pub const PIXEL_OFF_LUMA: u8 = 0;

// Safety limit to prevent excessive memory allocation while decoding
/// Maximum allowed decode resolution
pub const MAX_RESOLUTION: usize = 4096;

// Default values for configurable parameters
/// Default side length when decoding an automaton
pub const DEFAULT_RESOLUTION: usize = 64;

// Output settings
/// Suffix added to automaton files written next to their source images
pub const AUTOMATON_SUFFIX: &str = "_automaton";
/// Suffix added to rendered images written next to their automaton files
pub const DECODED_SUFFIX: &str = "_decoded";
/// Extension of serialized automata
pub const AUTOMATON_EXTENSION: &str = "json";
/// Extension of raster files
pub const IMAGE_EXTENSION: &str = "png";

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
