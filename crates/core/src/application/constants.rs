// Bridge constants (no magic values)

/// Initial capture buffer size in bytes; doubled whenever it fills
pub const INITIAL_CAPTURE_CAPACITY: usize = 4096;

/// Prefix shared by every error message crossing the boundary
pub const ERROR_PREFIX: &str = "ERROR: ";

/// Spawn failure message
pub const SPAWN_FAILED_MESSAGE: &str = "ERROR: popen failed";

/// Initial buffer allocation failure message
pub const INITIAL_ALLOC_FAILED_MESSAGE: &str = "ERROR: malloc failed";

/// Buffer growth allocation failure message
pub const GROWTH_ALLOC_FAILED_MESSAGE: &str = "ERROR: realloc failed";
