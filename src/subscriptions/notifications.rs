use crate::constants::{CHANNEL_BUFFER_SIZE, TICK_INTERVAL};
use crate::manager::{ToastManager, global::lock};
use std::sync::Mutex;
use toast_overlay_util::{CardId, Rect};
use tokio::sync::mpsc::{Receiver, Sender, UnboundedReceiver, channel};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

/// Requests producers hand to the event loop.
#[derive(Debug)]
pub enum Input {
    /// Admit a message
    Show(String),
    /// Close a card as if its close button was pressed
    Dismiss(CardId),
    /// The available screen area changed
    Resize(Rect),
}

pub fn channel_pair() -> (Sender<Input>, Receiver<Input>) {
    channel(CHANNEL_BUFFER_SIZE)
}

/// Event loop owning every mutation of the manager.
///
/// Runs until the input channel is closed and the last card is gone.
pub async fn run(manager: &'static Mutex<ToastManager>, mut inputs: Receiver<Input>) {
    let (wake, mut dismissals) = {
        let mut manager = lock(manager);
        (manager.tick_wake(), manager.take_dismissals())
    };
    if dismissals.is_none() {
        tracing::warn!("Dismiss queue already taken, close buttons will be ignored");
    }

    let mut ticker: Option<Interval> = None;
    let mut inputs_open = true;

    loop {
        tokio::select! {
            _ = wake.notified(), if ticker.is_none() => {
                tracing::trace!("Woken to start ticking");
            }
            Some(id) = next_dismissal(&mut dismissals) => {
                lock(manager).dismiss(id);
            }
            _ = next_tick(&mut ticker), if ticker.is_some() => {
                let running = lock(manager).tick();
                if !running {
                    ticker = None;
                }
            }
            input = inputs.recv(), if inputs_open => {
                match input {
                    Some(Input::Show(text)) => {
                        lock(manager).show_message(&text);
                    }
                    Some(Input::Dismiss(id)) => {
                        lock(manager).dismiss(id);
                    }
                    Some(Input::Resize(screen)) => {
                        lock(manager).resize(screen);
                    }
                    None => {
                        tracing::debug!("Input channel closed, draining remaining cards");
                        inputs_open = false;
                    }
                }
            }
        }

        let active = lock(manager).tick_active();
        match (&ticker, active) {
            (None, true) => ticker = Some(start_ticker()),
            (Some(_), false) => ticker = None,
            _ => {}
        }

        if !inputs_open && ticker.is_none() {
            tracing::debug!("Nothing left to show, event loop done");
            return;
        }
    }
}

fn start_ticker() -> Interval {
    let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}

async fn next_dismissal(dismissals: &mut Option<UnboundedReceiver<CardId>>) -> Option<CardId> {
    match dismissals {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
