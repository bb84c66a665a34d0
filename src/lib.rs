pub mod catalog;
pub mod config;
pub mod conversation;
pub mod db;
pub mod devices;
pub mod energy;
pub mod logging;
pub mod models;
pub mod modifier;
pub mod onboarding;
pub mod schedule;
pub mod session;
pub mod settings;
pub mod voice;

#[cfg(feature = "desktop")]
mod commands;

#[cfg(test)]
mod test_utils;

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  use commands::voice::WebviewRecognizer;
  use config::CoachConfig;
  use db::AppState;
  use session::{CoachSession, SessionConfig};
  use settings::SqliteSettingsStore;
  use std::sync::Arc;
  use tauri::Manager;
  use tracing::{error, info};
  use voice::VoiceInput;

  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let config = match CoachConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Invalid configuration: {}", e);
      return;
    }
  };
  logging::init_logging(&config.log_directives);

  let result = tauri::Builder::default()
    .plugin(tauri_plugin_opener::init())
    .setup(move |app| {
      let app_handle = app.handle().clone();
      let db_url = match &config.db_path {
        Some(_) => config.database_url(),
        None => db::sqlite_url(&db::get_db_path(&app_handle)?),
      };

      tauri::async_runtime::block_on(async move {
        match db::initialize_db(&db_url).await {
          Ok(pool) => {
            let settings = SqliteSettingsStore::new(pool);
            let session_config = match SessionConfig::load(&settings, config.pacing).await {
              Ok(session_config) => session_config,
              Err(e) => {
                error!(error = %e, "failed to read onboarding flag, showing onboarding");
                SessionConfig {
                  onboarding_completed: false,
                  pacing: config.pacing,
                }
              }
            };
            let voice = VoiceInput::new(Some(Box::new(WebviewRecognizer::new(app_handle.clone()))));
            let state = Arc::new(AppState {
              settings,
              config,
              session: tokio::sync::Mutex::new(CoachSession::start(session_config, voice)),
            });
            app_handle.manage(state);
            info!("Database ready");
          }
          Err(e) => {
            error!(error = %e, "Failed to initialize database");
          }
        }
      });
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      commands::get_view,
      commands::switch_view,
      // Chat commands
      commands::chat::get_chat,
      commands::chat::start_conversation,
      commands::chat::send_chat_message,
      commands::chat::select_workout_suggestion,
      commands::chat::request_workout_adaptation,
      // Plan commands
      commands::plan::get_workout_schedule,
      commands::plan::get_week_label,
      commands::plan::select_workout_day,
      commands::plan::next_workout_day,
      commands::plan::previous_workout_day,
      commands::plan::adapt_workout,
      commands::plan::restore_workout,
      // Device commands
      commands::devices::get_devices,
      commands::devices::toggle_device,
      // Onboarding commands
      commands::onboarding::get_onboarding_status,
      commands::onboarding::onboarding_next,
      commands::onboarding::onboarding_back,
      commands::onboarding::reset_onboarding,
      // Voice commands
      commands::voice::toggle_voice,
      commands::voice::get_voice_status,
      commands::voice::voice_event,
    ])
    .run(tauri::generate_context!());

  if let Err(e) = result {
    error!(error = %e, "error while running tauri application");
  }
}
