//! End-to-end runs of the manager against the headless backend.

use std::time::Duration;
use toast_overlay::subscriptions::notifications::{Input, channel_pair, run};
use toast_overlay::{HeadlessOverlay, Rect, ToastConfig, ToastManager, global};

fn lifetime(secs: u32) -> ToastConfig {
    ToastConfig {
        default_lifetime_secs: secs,
        ..Default::default()
    }
}

#[test]
fn test_burst_keeps_newest_cards() {
    let mut manager = ToastManager::new(lifetime(10), Box::new(HeadlessOverlay::default()));

    for i in 0..12 {
        manager.show_message(&format!("message {i}\n"));
    }

    assert_eq!(manager.capacity(), 5);
    let texts: Vec<&str> = manager.cards().iter().map(|c| c.text()).collect();
    assert_eq!(
        texts,
        vec!["message 7", "message 8", "message 9", "message 10", "message 11"]
    );
    assert!(manager.is_visible());
    assert!(manager.tick_active());
}

#[test]
fn test_cards_drain_after_lifetime() {
    let mut manager = ToastManager::new(lifetime(2), Box::new(HeadlessOverlay::default()));
    manager.show_message("first");
    assert!(manager.tick());
    manager.show_message("second");

    // first expires, second has one second left
    assert!(manager.tick());
    assert_eq!(manager.cards()[0].text(), "second");

    assert!(!manager.tick());
    assert!(manager.is_empty());
    assert!(!manager.is_visible());
    assert!(!manager.tick());
}

#[test]
fn test_small_screen_rejects_everything() {
    let overlay = HeadlessOverlay::new(Rect::new(0, 0, 800, 150));
    let mut manager = ToastManager::new(ToastConfig::default(), Box::new(overlay));

    manager.show_message("too tall");

    assert_eq!(manager.capacity(), 0);
    assert!(manager.is_empty());
    assert!(!manager.is_visible());
    assert!(!manager.tick_active());
}

#[tokio::test(start_paused = true)]
async fn test_global_instance_through_event_loop() {
    let manager = global::install(lifetime(1), Box::new(HeadlessOverlay::default())).unwrap();
    assert!(global::install(ToastConfig::default(), Box::new(HeadlessOverlay::default())).is_err());
    assert!(std::ptr::eq(manager, global::instance()));

    let (tx, rx) = channel_pair();
    let service = tokio::spawn(run(manager, rx));

    tx.send(Input::Show("from the loop".to_string())).await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    global::show_message("direct");
    assert_eq!(global::lock(manager).len(), 2);

    drop(tx);
    service.await.unwrap();

    let m = global::lock(manager);
    assert!(m.is_empty());
    assert!(!m.is_visible());
}
