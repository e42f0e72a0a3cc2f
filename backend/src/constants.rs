// =============================================================================
// Kindred Backend Constants
// =============================================================================
// This file contains all constants used throughout the backend to enable
// easy tuning and configuration from a single location.

// =============================================================================
// MATCH LIFECYCLE
// =============================================================================

/// Upper bound of the compatibility score range
pub const COMPATIBILITY_SCORE_MAX: i32 = 100;

/// Reason stored when an admin rejects a match without supplying one
pub const DEFAULT_REJECTION_REASON: &str = "Not specified by reviewer";

// =============================================================================
// MATCH GENERATION
// =============================================================================

/// Minimum compatibility score a candidate pair needs to become a match
pub const MIN_MATCHABLE_SCORE: i32 = 40;

/// Maximum matches the matchmaker creates per generation cycle
pub const MAX_MATCHES_PER_CYCLE: usize = 100;

/// Default seconds between matchmaker generation cycles
pub const DEFAULT_MATCHMAKER_INTERVAL_SECS: u64 = 300;

/// How often (in cycles) the matchmaker logs the pending-review backlog
pub const PENDING_BACKLOG_LOG_EVERY_N_ITERS: usize = 12;

// =============================================================================
// RATE LIMITING
// =============================================================================

/// Maximum participant actions per minute per user
pub const ACTION_RATE_LIMIT_PER_MINUTE: u32 = 30;

/// Rate limit window duration in seconds
pub const RATE_LIMIT_WINDOW_SECONDS: u64 = 60;

// =============================================================================
// MODERATION LIMITS
// =============================================================================

/// Maximum character limit for a stored rejection reason
pub const REJECTION_REASON_CHAR_LIMIT: usize = 400;

/// Maximum character limit for a profile display name
pub const DISPLAY_NAME_CHAR_LIMIT: usize = 80;

/// Maximum character limit for a single profile interest
pub const INTEREST_CHAR_LIMIT: usize = 40;

/// Maximum number of interests per profile
pub const MAX_PROFILE_INTERESTS: usize = 25;

// =============================================================================
// SERVER CONFIGURATION
// =============================================================================

/// Default server port if not specified in environment
pub const DEFAULT_SERVER_PORT: u16 = 3000;

// =============================================================================
// HELPER FUNCTIONS FOR VALIDATION
// =============================================================================

/// Validates that a compatibility score is within the stored range
pub fn is_valid_score(score: i32) -> bool {
    (0..=COMPATIBILITY_SCORE_MAX).contains(&score)
}
