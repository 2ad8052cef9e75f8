use clap::Parser;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use ticketing_tui::app::{App, AppResult};
use ticketing_tui::client::BackendClient;
use ticketing_tui::event::{Event, EventHandler};
use ticketing_tui::handler::{handle_key_events, handle_mouse_events};
use ticketing_tui::settings::Settings;
use ticketing_tui::tui::Tui;

#[tokio::main]
async fn main() -> AppResult<()> {
    let settings = Settings::parse();
    ticketing_tui::logging::init(&settings)?;

    let client = BackendClient::new(&settings)?;
    log::info!("Using backend at {}", client.base_url());

    let (tx_effects, mut rx_effects) = tokio::sync::mpsc::channel(100);
    let (tx_updates, rx_updates) = tokio::sync::mpsc::channel(100);

    // Create an application.
    let mut app = App::new(tx_effects, rx_updates, settings.log_capacity);

    // Start the background task.
    let worker = tokio::spawn(async move {
        ticketing_tui::task::background_task(client, tx_updates, &mut rx_effects).await;
    });

    // Initialize the terminal user interface.
    let backend = CrosstermBackend::new(io::stderr());
    let terminal = Terminal::new(backend)?;
    let events = EventHandler::new(settings.tick_rate_ms);
    let mut tui = Tui::new(terminal, events);
    tui.init()?;

    // Start the main loop.
    while app.running {
        // Render the user interface.
        tui.draw(&mut app)?;
        // Handle events.
        match tui.events.next().await? {
            Event::Tick => app.tick().await?,
            Event::Key(key_event) => handle_key_events(key_event, &mut app).await?,
            Event::Mouse(mouse_event) => handle_mouse_events(mouse_event, &mut app).await?,
            Event::Resize(_, _) => {}
        }
    }

    // Exit the user interface.
    tui.exit()?;

    // Dropping the app closes the effect channel, which lets the worker
    // close whatever is still open and return.
    drop(app);
    if let Err(err) = worker.await {
        log::error!("Background task failed: {}", err);
    }
    log::info!("Bye");
    Ok(())
}
