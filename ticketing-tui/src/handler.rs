use crate::app::{App, AppResult};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEventKind};

const PAGE: usize = 10;

/// Handles the key events and updates the state of [`App`].
pub async fn handle_key_events(key_event: KeyEvent, app: &mut App) -> AppResult<()> {
    match key_event.code {
        // Exit application on `ESC` or `q`
        KeyCode::Esc | KeyCode::Char('q') => {
            app.quit().await?;
        }
        // Exit application on `Ctrl-C`
        KeyCode::Char('c') | KeyCode::Char('C') => {
            if key_event.modifiers == KeyModifiers::CONTROL {
                app.quit().await?;
            }
        }
        // Simulation controls
        KeyCode::Char('s') => {
            app.start().await?;
        }
        KeyCode::Char('x') => {
            app.stop().await?;
        }
        // Configuration form
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.panel.form.push_char(c);
        }
        KeyCode::Backspace => {
            app.panel.form.pop_char();
        }
        KeyCode::Tab | KeyCode::Down => {
            app.panel.form.focus_next();
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.panel.form.focus_previous();
        }
        KeyCode::Enter => {
            app.submit().await?;
        }
        // Log panel
        KeyCode::PageUp => {
            app.scroll_up(PAGE);
        }
        KeyCode::PageDown => {
            app.scroll_down(PAGE);
        }
        KeyCode::Home => {
            app.scroll_to_top();
        }
        KeyCode::End => {
            app.scroll_to_bottom();
        }
        _ => {}
    }
    Ok(())
}

pub async fn handle_mouse_events(
    mouse_event: crossterm::event::MouseEvent,
    app: &mut App,
) -> AppResult<()> {
    match mouse_event.kind {
        MouseEventKind::ScrollDown => {
            app.scroll_down(1);
        }
        MouseEventKind::ScrollUp => {
            app.scroll_up(1);
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{MouseEvent, MouseEventKind};
    use ticketing_core::{form::Field, panel::PanelEvent, Effect};
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::Receiver<Effect>, mpsc::Sender<PanelEvent>) {
        let (tx_effects, rx_effects) = mpsc::channel(16);
        let (tx_updates, rx_updates) = mpsc::channel(16);
        (App::new(tx_effects, rx_updates, 100), rx_effects, tx_updates)
    }

    async fn press(app: &mut App, code: KeyCode) {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
            .await
            .unwrap();
    }

    async fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c)).await;
        }
    }

    #[tokio::test]
    async fn edits_and_submits_the_form() {
        let (mut app, mut rx_effects, _tx_updates) = app();

        type_str(&mut app, "1a0").await;
        press(&mut app, KeyCode::Backspace).await;
        type_str(&mut app, "00").await;
        assert_eq!(app.panel.form.value(Field::TotalTickets), "100");

        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "200").await;
        press(&mut app, KeyCode::Down).await;
        type_str(&mut app, "300").await;
        press(&mut app, KeyCode::Tab).await;
        type_str(&mut app, "150").await;
        assert_eq!(app.panel.form.focused(), Field::MaxTicketCapacity);

        press(&mut app, KeyCode::BackTab).await;
        assert_eq!(app.panel.form.focused(), Field::CustomerRetrievalRate);
        press(&mut app, KeyCode::Up).await;
        assert_eq!(app.panel.form.focused(), Field::TicketReleaseRate);

        press(&mut app, KeyCode::Enter).await;
        match rx_effects.recv().await {
            Some(Effect::SubmitConfiguration(config)) => {
                assert_eq!(config.total_tickets, 100);
                assert_eq!(config.ticket_release_rate_ms, 200);
                assert_eq!(config.customer_retrieval_rate_ms, 300);
                assert_eq!(config.max_ticket_capacity, 150);
            }
            other => panic!("Expected a submission, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn start_and_stop_keys_follow_the_session() {
        let (mut app, mut rx_effects, tx_updates) = app();

        // Nothing is running yet.
        press(&mut app, KeyCode::Char('x')).await;
        assert!(rx_effects.try_recv().is_err());

        press(&mut app, KeyCode::Char('s')).await;
        assert_eq!(rx_effects.recv().await, Some(Effect::RequestStart));
        tx_updates.send(PanelEvent::StartFinished(Ok(()))).await.unwrap();
        app.tick().await.unwrap();
        let channel = match rx_effects.recv().await {
            Some(Effect::OpenChannel(channel)) => channel,
            other => panic!("Expected a channel to open, got {:?}", other),
        };

        press(&mut app, KeyCode::Char('s')).await;
        assert!(rx_effects.try_recv().is_err());

        press(&mut app, KeyCode::Char('x')).await;
        assert_eq!(rx_effects.recv().await, Some(Effect::CloseChannel(channel)));
        assert_eq!(rx_effects.recv().await, Some(Effect::RequestStop));
    }

    #[tokio::test]
    async fn scroll_keys_move_the_log_view() {
        let (mut app, _rx_effects, _tx_updates) = app();
        app.log_view.max_offset = 30;
        app.log_view.offset = 30;

        press(&mut app, KeyCode::PageUp).await;
        assert!(!app.log_view.follow);
        assert_eq!(app.log_view.offset, 20);

        press(&mut app, KeyCode::Home).await;
        assert_eq!(app.log_view.offset, 0);

        press(&mut app, KeyCode::PageDown).await;
        assert_eq!(app.log_view.offset, 10);
        assert!(!app.log_view.follow);

        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse_events(wheel, &mut app).await.unwrap();
        assert_eq!(app.log_view.offset, 11);

        press(&mut app, KeyCode::End).await;
        assert!(app.log_view.follow);
    }

    #[tokio::test]
    async fn quit_keys_stop_the_app() {
        for code in [KeyCode::Esc, KeyCode::Char('q')] {
            let (mut app, _rx_effects, _tx_updates) = app();
            press(&mut app, code).await;
            assert!(!app.running, "{:?} should quit", code);
        }

        let (mut app, _rx_effects, _tx_updates) = app();
        press(&mut app, KeyCode::Char('c')).await;
        assert!(app.running);
        handle_key_events(
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            &mut app,
        )
        .await
        .unwrap();
        assert!(!app.running);
    }
}
