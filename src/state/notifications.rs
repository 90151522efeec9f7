use crate::constants::*;
use toast_overlay_util::{Card, CardId};

/// Live cards in admission order, oldest first.
///
/// Pure bookkeeping: callers decide what a removed card means for the
/// overlay.
#[derive(Debug)]
pub struct NotificationState {
    cards: Vec<Card>,
}

impl NotificationState {
    pub fn new() -> Self {
        Self {
            cards: Vec::with_capacity(INITIAL_CARDS_CAPACITY),
        }
    }

    /// Live cards, oldest first
    pub fn visible(&self) -> &[Card] {
        &self.cards
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    #[cfg(test)]
    pub fn get(&self, id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == id)
    }

    #[cfg(test)]
    pub fn ids(&self) -> Vec<CardId> {
        self.cards.iter().map(|c| c.id).collect()
    }

    /// Remove a card by id, returning it if it was live
    pub fn remove(&mut self, id: CardId) -> Option<Card> {
        let pos = self.cards.iter().position(|c| c.id == id)?;
        Some(self.cards.remove(pos))
    }

    /// Remove the oldest cards until at most `capacity` remain.
    ///
    /// Returns the removed cards, oldest first. A second call without an
    /// admission in between removes nothing.
    pub fn evict_excess(&mut self, capacity: usize) -> Vec<Card> {
        let excess = self.cards.len().saturating_sub(capacity);
        self.cards.drain(..excess).collect()
    }

    /// Advance every card's countdown by one second
    pub fn age_all(&mut self) {
        self.cards.iter_mut().for_each(Card::age);
    }

    /// Take every card whose countdown has run out, in admission order.
    pub fn take_due(&mut self) -> Vec<Card> {
        let (due, live): (Vec<Card>, Vec<Card>) =
            std::mem::take(&mut self.cards).into_iter().partition(Card::is_due);
        self.cards = live;
        due
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Release memory left over from a burst once everything is gone
    pub fn shrink_visible(&mut self) {
        if self.cards.is_empty() {
            self.cards.shrink_to(INITIAL_CARDS_CAPACITY);
        }
    }
}

impl Default for NotificationState {
    fn default() -> Self {
        Self::new()
    }
}
