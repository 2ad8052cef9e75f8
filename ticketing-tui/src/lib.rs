/// Application.
pub mod app;

/// Terminal events handler.
pub mod event;

/// Widget renderer.
pub mod ui;

/// Terminal user interface.
pub mod tui;

/// Event handler.
pub mod handler;

/// Background task handler.
pub mod task;

/// HTTP client for the simulation backend.
pub mod client;

/// Command line and environment settings.
pub mod settings;

/// File logger setup.
pub mod logging;

pub type TxEffect = tokio::sync::mpsc::Sender<ticketing_core::Effect>;
pub type RxUpdate = tokio::sync::mpsc::Receiver<ticketing_core::panel::PanelEvent>;
