mod repository;
mod service;

pub use self::repository::{DynExpiryAlertRepository, ExpiryAlertRepositoryTrait};
pub use self::service::{DynNotificationService, NotificationServiceTrait};
