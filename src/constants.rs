// Constants module for toast-overlay
// Centralizes magic numbers for better maintainability

use std::time::Duration;
use toast_overlay_util::Rect;

// ============================================================================
// Timing Constants
// ============================================================================

/// Period of the aging tick; card lifetimes are counted in these ticks
pub(crate) const TICK_INTERVAL: Duration = Duration::from_secs(1);

// ============================================================================
// Card Queue Constants
// ============================================================================

/// Initial capacity for the live cards vector
pub(crate) const INITIAL_CARDS_CAPACITY: usize = 16;

/// Buffer size for the event loop input channel
pub(crate) const CHANNEL_BUFFER_SIZE: usize = 100;

// ============================================================================
// Headless Backend Constants
// ============================================================================

/// Screen geometry reported by the headless overlay
pub(crate) const DEFAULT_SCREEN: Rect = Rect::new(0, 0, 1920, 1080);

/// Maximum characters of card text echoed into log lines
pub(crate) const LOG_PREVIEW_MAX_CHARS: usize = 48;
