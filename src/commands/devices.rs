//! Tauri commands for connected devices

use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::models::{AppConnection, ConnectionStatus, Device};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRow {
  #[serde(flatten)]
  pub device: Device,
  pub status_line: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicesView {
  pub devices: Vec<DeviceRow>,
  pub apps: Vec<AppConnection>,
}

#[tauri::command]
pub async fn get_devices(
  state: State<'_, Arc<AppState>>,
) -> Result<DevicesView, String> {
  let session = state.session.lock().await;
  let registry = session.devices();
  Ok(DevicesView {
    devices: registry
      .devices()
      .iter()
      .map(|d| DeviceRow {
        device: d.clone(),
        status_line: d.status_line(),
      })
      .collect(),
    apps: registry.apps().to_vec(),
  })
}

#[tauri::command]
pub async fn toggle_device(
  state: State<'_, Arc<AppState>>,
  device_id: String,
) -> Result<ConnectionStatus, String> {
  state
    .session
    .lock()
    .await
    .toggle_device(&device_id)
    .map_err(|e| format!("Failed to toggle device: {}", e))
}
