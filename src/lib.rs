//! Corner overlay of transient message cards.
//!
//! [`ToastManager`] admits cards, ages them once per second, expires and
//! evicts them and works out where the stack goes on screen. Drawing is left
//! to an [`Overlay`] backend; [`subscriptions::notifications::run`] is the
//! event loop that drives the tick.

mod constants;
pub mod manager;
pub mod overlay;
pub mod state;
pub mod subscriptions;

pub use manager::{ToastManager, global};
pub use overlay::{CardView, DismissHandle, HeadlessOverlay, Overlay};
pub use toast_overlay_config::ToastConfig;
pub use toast_overlay_util::{Card, CardId, CloseReason, Rect};
