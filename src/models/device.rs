use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceKind {
  Watch,
  Phone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
  Connected,
  Disconnected,
}

impl ConnectionStatus {
  pub fn toggled(self) -> Self {
    match self {
      Self::Connected => Self::Disconnected,
      Self::Disconnected => Self::Connected,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
  pub id: String,
  pub name: String,
  #[serde(rename = "type")]
  pub kind: DeviceKind,
  pub status: ConnectionStatus,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub battery_level: Option<u8>,
}

impl Device {
  /// "Connected • 72%", "Connected" or "Disconnected"
  pub fn status_line(&self) -> String {
    match (self.status, self.battery_level) {
      (ConnectionStatus::Connected, Some(level)) => format!("Connected • {}%", level),
      (ConnectionStatus::Connected, None) => "Connected".to_string(),
      (ConnectionStatus::Disconnected, _) => "Disconnected".to_string(),
    }
  }
}

/// Third-party fitness app linked to the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConnection {
  pub id: String,
  pub name: String,
  pub status: ConnectionStatus,
}
