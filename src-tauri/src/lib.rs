//! Live To-Do Backend
//!
//! Hosts the document store the UI subscribes to:
//! - task-store: collection, access rules, live queries
//! - sink: delivers live-query pushes to the webview as events
//! - commands: Tauri command handlers

use std::sync::Arc;

use tauri::webview::PageLoadEvent;
use tauri::{Manager, WindowEvent};
use task_store::{open_collection, SqliteTaskRepository, StoreConfig, TaskStore};
use tokio::sync::Mutex;

mod commands;
mod sink;

use sink::TauriSink;

/// The store as wired into the desktop host
pub type HostStore = TaskStore<SqliteTaskRepository, TauriSink>;

/// Application state shared across commands
pub struct AppState {
    pub store: HostStore,
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                // Focus the existing window when a new instance tries to start
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "LiveTodo")?;

            let config = StoreConfig::load_or_init(&app_handle.path().app_config_dir()?)?;
            if !config.rules.read || !config.rules.write {
                log::warn!(
                    "Store rules restrict access (read={}, write={}); the UI will report permission errors",
                    config.rules.read,
                    config.rules.write
                );
            }

            let db_path = config.database_path(&app_handle.path().app_data_dir()?);
            let conn = open_collection(&db_path, &config.collection).inspect_err(|e| {
                rolling_logger::error(&format!("Store init failed: {}", e));
            })?;
            let repo = SqliteTaskRepository::new(Arc::new(Mutex::new(conn)), &config.collection);

            app.manage(AppState {
                store: TaskStore::new(repo, config.rules, TauriSink::new(app_handle)),
            });

            rolling_logger::info(&format!("Store ready, collection `{}`", config.collection));
            Ok(())
        })
        // A reload or navigation never runs the page's own cleanup.
        .on_page_load(|webview, payload| {
            if matches!(payload.event(), PageLoadEvent::Started) {
                release_view(webview.app_handle(), webview.label());
            }
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                release_view(window.app_handle(), window.label());
            }
        })
        .invoke_handler(tauri::generate_handler![
            commands::subscribe_tasks,
            commands::unsubscribe_tasks,
            commands::create_task,
            commands::update_task_completed,
            commands::delete_task,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}

/// Close the live queries a webview left open
fn release_view(app: &tauri::AppHandle, label: &str) {
    // The first page load can start before setup has managed the state.
    if let Some(state) = app.try_state::<AppState>() {
        state.store.release_view(label);
    }
}
