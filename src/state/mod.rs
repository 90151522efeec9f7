pub mod notifications;

pub use notifications::NotificationState;
