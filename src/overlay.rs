//! Seam between the card manager and whatever draws the cards.
//!
//! The manager never touches pixels: it tells an [`Overlay`] which cards
//! exist, where the container goes and whether it is shown. Backends report
//! a close-button press through the [`DismissHandle`] handed out with each
//! card.

use crate::constants::LOG_PREVIEW_MAX_CHARS;
use toast_overlay_util::{CardId, CardLink, CloseReason, Rect, sanitize_html, strip_html};
use tokio::sync::mpsc::UnboundedSender;

/// Lets a backend ask for one card to be closed.
///
/// Carries only the card id, so a press that arrives after the card already
/// expired resolves to nothing.
#[derive(Debug, Clone)]
pub struct DismissHandle {
    id: CardId,
    tx: UnboundedSender<CardId>,
}

impl DismissHandle {
    pub(crate) fn new(id: CardId, tx: UnboundedSender<CardId>) -> Self {
        Self { id, tx }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    /// Queue a dismiss request for the card.
    pub fn request(&self) {
        if self.tx.send(self.id).is_err() {
            tracing::debug!("Dismiss for card {} dropped, manager is gone", self.id);
        }
    }
}

/// Everything a backend needs to draw one card.
#[derive(Debug, Clone)]
pub struct CardView {
    pub id: CardId,
    /// Body as given, markup included
    pub text: String,
    pub links: Vec<CardLink>,
    /// Whether `text` carries markup that should be rendered as rich text
    pub rich: bool,
    /// Header line, present when header chrome is enabled
    pub header: Option<String>,
    /// Close affordance, present when interactive close is enabled
    pub dismiss: Option<DismissHandle>,
}

/// Rendering and windowing collaborator of the manager.
pub trait Overlay: Send {
    /// Primary screen area usable by the overlay, OS chrome excluded.
    fn available_geometry(&self) -> Rect;

    /// Create the visual element for a new card.
    fn attach_card(&mut self, card: &CardView);

    /// Replace the header line of a live card.
    fn update_header(&mut self, _id: CardId, _header: &str) {}

    /// Destroy the visual element of a card.
    fn detach_card(&mut self, id: CardId, reason: CloseReason);

    /// Move and resize the overlay container.
    fn set_geometry(&mut self, region: Rect);

    fn show(&mut self);

    fn hide(&mut self);

    fn is_visible(&self) -> bool;
}

/// Backend without a display: keeps the bookkeeping and logs every call.
#[derive(Debug)]
pub struct HeadlessOverlay {
    screen: Rect,
    geometry: Rect,
    visible: bool,
    cards: Vec<CardId>,
}

impl HeadlessOverlay {
    pub fn new(screen: Rect) -> Self {
        Self {
            screen,
            geometry: Rect::default(),
            visible: false,
            cards: Vec::new(),
        }
    }

    pub fn geometry(&self) -> Rect {
        self.geometry
    }

    pub fn card_ids(&self) -> &[CardId] {
        &self.cards
    }
}

impl Default for HeadlessOverlay {
    fn default() -> Self {
        Self::new(crate::constants::DEFAULT_SCREEN)
    }
}

impl Overlay for HeadlessOverlay {
    fn available_geometry(&self) -> Rect {
        self.screen
    }

    fn attach_card(&mut self, card: &CardView) {
        self.cards.push(card.id);
        tracing::info!(
            "Card {}: {}{}",
            card.id,
            preview(&card.text),
            card.header
                .as_deref()
                .map(|h| format!(" [{h}]"))
                .unwrap_or_default()
        );
        for link in &card.links {
            tracing::debug!("Card {} link: {} -> {}", card.id, link.display_text(), link.url);
        }
    }

    fn update_header(&mut self, id: CardId, header: &str) {
        tracing::trace!("Card {} header: {}", id, header);
    }

    fn detach_card(&mut self, id: CardId, reason: CloseReason) {
        self.cards.retain(|c| *c != id);
        tracing::info!("Card {} closed ({})", id, reason);
    }

    fn set_geometry(&mut self, region: Rect) {
        self.geometry = region;
        tracing::debug!(
            "Overlay at {},{} size {}x{}",
            region.x,
            region.y,
            region.width,
            region.height
        );
    }

    fn show(&mut self) {
        self.visible = true;
        tracing::debug!("Overlay shown");
    }

    fn hide(&mut self) {
        self.visible = false;
        tracing::debug!("Overlay hidden");
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}

/// One-line plain-text rendition of a card body for logs.
fn preview(text: &str) -> String {
    let plain = strip_html(&sanitize_html(text));
    let line = plain.lines().next().unwrap_or_default();
    if line.chars().count() > LOG_PREVIEW_MAX_CHARS {
        let cut: String = line.chars().take(LOG_PREVIEW_MAX_CHARS - 3).collect();
        format!("{cut}...")
    } else {
        line.to_string()
    }
}
