//! Connected wearables and linked apps. Connection state is local only.

use serde::{Serialize, Serializer};
use thiserror::Error;
use tracing::info;

use crate::models::{AppConnection, ConnectionStatus, Device};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceError {
  #[error("Device not found: {0}")]
  NotFound(String),
}

impl Serialize for DeviceError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRegistry {
  devices: Vec<Device>,
  apps: Vec<AppConnection>,
}

impl DeviceRegistry {
  pub fn new(devices: Vec<Device>, apps: Vec<AppConnection>) -> Self {
    Self { devices, apps }
  }

  pub fn devices(&self) -> &[Device] {
    &self.devices
  }

  pub fn apps(&self) -> &[AppConnection] {
    &self.apps
  }

  /// Flip a device between connected and disconnected, returning the new
  /// status
  pub fn toggle(&mut self, device_id: &str) -> Result<ConnectionStatus, DeviceError> {
    let device = self
      .devices
      .iter_mut()
      .find(|d| d.id == device_id)
      .ok_or_else(|| DeviceError::NotFound(device_id.to_string()))?;
    device.status = device.status.toggled();
    info!(device = %device.name, status = ?device.status, "toggled device");
    Ok(device.status)
  }

  pub fn connected_count(&self) -> usize {
    self
      .devices
      .iter()
      .filter(|d| d.status == ConnectionStatus::Connected)
      .count()
  }
}
