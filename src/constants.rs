/// Maximum stored JSON value size in bytes (1MB)
/// Typical WealthFlow documents (budgets, expense lists) are a few KB,
/// so this leaves plenty of headroom for growth
pub const MAX_VALUE_SIZE_BYTES: usize = 1_048_576;

/// Session lifetime in seconds (24 hours)
/// Sessions are not renewed on use; clients log in again after expiry
pub const SESSION_TTL_SECS: i64 = 86_400;

/// Role assigned to newly registered users
pub const DEFAULT_ROLE: &str = "user";

/// Gemini model used by the chat relay
pub const GEMINI_MODEL: &str = "gemini-flash-latest";

/// Base URL for the Gemini generateContent API
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

// =============================================================================
// Error Messages
// =============================================================================

/// Error message for missing registration/login fields
pub const ERR_MISSING_CREDENTIALS: &str = "Username and password required";

/// Error message for a missing storage key
pub const ERR_MISSING_KEY: &str = "Storage key required";

/// Error message returned when a stored value exceeds the size cap
pub const ERR_VALUE_TOO_LARGE: &str = "Stored value exceeds maximum allowed size";
