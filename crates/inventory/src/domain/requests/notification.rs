use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Raw query string filters; values are checked against the alert enums by
/// the notification service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NotificationQuery {
    /// `green`, `yellow` or `red`
    pub alert_level: Option<String>,
    /// `pending` or `acknowledged`
    pub notification_status: Option<String>,
}
