//! The toast manager: admission, aging, eviction and placement of cards.
//!
//! All state changes happen through `&mut ToastManager`, driven by one event
//! loop (see `subscriptions::notifications`). The manager itself never
//! sleeps; it only records whether the 1-second tick should be running and
//! wakes the loop when it has to start.

use crate::overlay::{CardView, DismissHandle, Overlay};
use crate::state::NotificationState;
use std::sync::Arc;
use toast_overlay_config::ToastConfig;
use toast_overlay_util::{Card, CardId, CloseReason, Placement, Rect, normalize_message};
use tokio::sync::Notify;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

/// Run state of the periodic tick.
#[derive(Debug, Default)]
struct TickTimer {
    active: bool,
    wake: Arc<Notify>,
}

impl TickTimer {
    fn start(&mut self) {
        if !self.active {
            self.active = true;
            self.wake.notify_one();
            tracing::debug!("Tick timer started");
        }
    }

    fn stop(&mut self) {
        if self.active {
            self.active = false;
            tracing::debug!("Tick timer stopped");
        }
    }
}

pub struct ToastManager {
    config: ToastConfig,
    overlay: Box<dyn Overlay>,
    state: NotificationState,
    placement: Placement,
    screen: Rect,
    capacity: usize,
    region: Rect,
    timer: TickTimer,
    next_id: u32,
    dismiss_tx: UnboundedSender<CardId>,
    dismiss_rx: Option<UnboundedReceiver<CardId>>,
}

impl ToastManager {
    pub fn new(config: ToastConfig, overlay: Box<dyn Overlay>) -> Self {
        let placement = Placement::from_config(&config);
        let screen = overlay.available_geometry();
        let capacity = placement.capacity(screen);
        let region = placement.region(screen, 0);
        let (dismiss_tx, dismiss_rx) = unbounded_channel();

        tracing::debug!(
            "Toast manager on {}x{} screen, room for {} cards",
            screen.width,
            screen.height,
            capacity
        );

        Self {
            config,
            overlay,
            state: NotificationState::new(),
            placement,
            screen,
            capacity,
            region,
            timer: TickTimer::default(),
            next_id: 1,
            dismiss_tx,
            dismiss_rx: Some(dismiss_rx),
        }
    }

    /// Admit a new card.
    ///
    /// One trailing CRLF or LF is dropped; an empty message is ignored.
    pub fn show_message(&mut self, text: &str) {
        let Some(text) = normalize_message(text) else {
            tracing::trace!("Ignoring empty message");
            return;
        };

        let card = Card::new(self.allocate_id(), text, self.config.lifetime_secs());
        let view = self.view_of(&card);
        self.overlay.attach_card(&view);
        tracing::debug!("Admitted card {} ({}s)", card.id, card.lifetime());
        self.state.push(card);

        self.check_tip_widgets();
        self.settle();
    }

    /// Evict the oldest cards beyond capacity. Returns how many went.
    pub fn check_tip_widgets(&mut self) -> usize {
        let evicted = self.state.evict_excess(self.capacity);
        let count = evicted.len();
        for card in evicted {
            self.close(card, CloseReason::Evicted);
        }
        count
    }

    /// One tick of the timer: evict, age, expire.
    ///
    /// Returns whether the timer keeps running. Ticking a stopped timer does
    /// nothing.
    pub fn tick(&mut self) -> bool {
        if !self.timer.active {
            tracing::trace!("Tick while stopped");
            return false;
        }

        self.check_tip_widgets();
        self.state.age_all();
        for card in self.state.take_due() {
            self.close(card, CloseReason::Expired);
        }

        if self.config.show_header_chrome {
            for card in self.state.visible() {
                self.overlay.update_header(card.id, &card.remaining_label());
            }
        }

        tracing::trace!("Tick: {} cards live", self.state.len());
        self.settle();
        self.timer.active
    }

    /// Close a card on user request. Unknown ids are ignored.
    pub fn dismiss(&mut self, id: CardId) -> bool {
        let Some(card) = self.state.remove(id) else {
            tracing::debug!("Dismiss for card {} which is already gone", id);
            return false;
        };
        self.close(card, CloseReason::Dismissed);
        self.settle();
        true
    }

    /// Apply dismiss requests queued by [`DismissHandle`]s.
    ///
    /// Only useful while nobody took the queue with [`Self::take_dismissals`].
    pub fn process_dismissals(&mut self) -> usize {
        let mut ids = Vec::new();
        if let Some(rx) = self.dismiss_rx.as_mut() {
            while let Ok(id) = rx.try_recv() {
                ids.push(id);
            }
        }
        ids.into_iter().filter(|id| self.dismiss(*id)).count()
    }

    /// Hand the dismiss queue to an event loop.
    pub fn take_dismissals(&mut self) -> Option<UnboundedReceiver<CardId>> {
        self.dismiss_rx.take()
    }

    /// Recompute capacity and placement for a new screen geometry.
    pub fn resize(&mut self, screen: Rect) {
        self.screen = screen;
        self.capacity = self.placement.capacity(screen);
        tracing::debug!(
            "Screen now {}x{}, room for {} cards",
            screen.width,
            screen.height,
            self.capacity
        );

        self.check_tip_widgets();
        self.region = self.placement.region(screen, self.state.len());
        if self.overlay.is_visible() {
            self.overlay.set_geometry(self.region);
        }
        self.settle();
    }

    /// Notified whenever the tick timer goes from stopped to running.
    pub fn tick_wake(&self) -> Arc<Notify> {
        self.timer.wake.clone()
    }

    pub fn tick_active(&self) -> bool {
        self.timer.active
    }

    pub fn cards(&self) -> &[Card] {
        self.state.visible()
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn placement_region(&self) -> Rect {
        self.region
    }

    pub fn is_visible(&self) -> bool {
        self.overlay.is_visible()
    }

    fn allocate_id(&mut self) -> CardId {
        let id = CardId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }

    fn view_of(&self, card: &Card) -> CardView {
        CardView {
            id: card.id,
            text: card.text().to_string(),
            links: card.links(),
            rich: card.is_rich(),
            header: self
                .config
                .show_header_chrome
                .then(|| card.remaining_label()),
            dismiss: self
                .config
                .interactive_close
                .then(|| DismissHandle::new(card.id, self.dismiss_tx.clone())),
        }
    }

    /// Single teardown path for expiry, eviction and dismissal.
    fn close(&mut self, card: Card, reason: CloseReason) {
        self.overlay.detach_card(card.id, reason);
        tracing::debug!(
            "Card {} {} after {}/{}s",
            card.id,
            reason,
            card.elapsed(),
            card.lifetime()
        );
    }

    /// Bring timer, visibility and geometry in line with the card count.
    fn settle(&mut self) {
        if self.state.is_empty() {
            self.timer.stop();
            if self.overlay.is_visible() {
                self.overlay.hide();
                tracing::info!("Overlay hidden");
            }
            self.state.shrink_visible();
            return;
        }

        self.timer.start();

        let region = self.placement.region(self.screen, self.state.len());
        let moved = region != self.region;
        self.region = region;

        if !self.overlay.is_visible() {
            self.overlay.set_geometry(self.region);
            self.overlay.show();
            tracing::info!("Overlay shown");
        } else if moved {
            self.overlay.set_geometry(self.region);
        }
    }
}

/// The process-wide manager instance.
pub mod global {
    use super::ToastManager;
    use crate::overlay::{HeadlessOverlay, Overlay};
    use once_cell::sync::OnceCell;
    use std::sync::{Mutex, MutexGuard};
    use toast_overlay_config::ToastConfig;

    static INSTANCE: OnceCell<Mutex<ToastManager>> = OnceCell::new();

    #[derive(Debug, thiserror::Error)]
    pub enum InstallError {
        #[error("the toast manager is already initialized")]
        AlreadyInitialized,
    }

    /// Create the instance from an explicit configuration and backend.
    ///
    /// Fails if the instance already exists; the arguments are then dropped
    /// without building a second manager.
    pub fn install(
        config: ToastConfig,
        overlay: Box<dyn Overlay>,
    ) -> Result<&'static Mutex<ToastManager>, InstallError> {
        let mut created = false;
        let instance = INSTANCE.get_or_init(|| {
            created = true;
            Mutex::new(ToastManager::new(config, overlay))
        });
        if created {
            Ok(instance)
        } else {
            Err(InstallError::AlreadyInitialized)
        }
    }

    /// The instance, created on first use from the user config and a
    /// headless backend.
    pub fn instance() -> &'static Mutex<ToastManager> {
        INSTANCE.get_or_init(|| {
            let config = ToastConfig::load_or_warn();
            Mutex::new(ToastManager::new(config, Box::new(HeadlessOverlay::default())))
        })
    }

    /// Lock a manager, recovering from a panic on another holder.
    pub fn lock(manager: &Mutex<ToastManager>) -> MutexGuard<'_, ToastManager> {
        manager.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Toast manager lock was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Admit a message on the process-wide instance.
    pub fn show_message(text: &str) {
        lock(instance()).show_message(text);
    }
}
