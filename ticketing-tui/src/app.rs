use std::error;

use ratatui::widgets::ScrollbarState;
use ticketing_core::panel::{ControlPanel, PanelEvent};

/// Application result type.
pub type AppResult<T> = std::result::Result<T, Box<dyn error::Error>>;

/// Application.
#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub tx_effects: crate::TxEffect,
    pub rx_updates: crate::RxUpdate,
    pub panel: ControlPanel,
    pub log_view: LogView,
}

/// Scroll position of the log list.
#[derive(Debug, Default)]
pub struct LogView {
    /// Index of the first visible entry. Resolved against the list length on render.
    pub offset: usize,
    /// Largest valid offset seen on the last render.
    pub max_offset: usize,
    /// Keep the newest entry in view.
    pub follow: bool,
    pub scroll_state: ScrollbarState,
    /// Session counter of the log last rendered, used to spot a new session.
    pub seen_resets: u64,
}

impl App {
    /// Constructs a new instance of [`App`].
    pub fn new(tx_effects: crate::TxEffect, rx_updates: crate::RxUpdate, log_capacity: usize) -> Self {
        Self {
            running: true,
            tx_effects,
            rx_updates,
            panel: ControlPanel::new(log_capacity),
            log_view: LogView {
                follow: true,
                ..Default::default()
            },
        }
    }

    /// Handles the tick event of the terminal: applies every update the
    /// background task has reported since the last tick, in arrival order.
    pub async fn tick(&mut self) -> AppResult<()> {
        while let Ok(update) = self.rx_updates.try_recv() {
            self.dispatch(update).await?;
        }
        if self.log_view.seen_resets != self.panel.log().resets() {
            self.log_view.seen_resets = self.panel.log().resets();
            self.log_view.follow = true;
        }
        Ok(())
    }

    /// Applies an event to the panel and hands the resulting effects to the
    /// background task.
    pub async fn dispatch(&mut self, event: PanelEvent) -> AppResult<()> {
        for effect in self.panel.handle(event) {
            log::debug!("Effect: {:?}", effect);
            self.tx_effects.send(effect).await?;
        }
        Ok(())
    }

    /// Closes any open channel and stops the main loop.
    pub async fn quit(&mut self) -> AppResult<()> {
        self.dispatch(PanelEvent::Dispose).await?;
        self.running = false;
        Ok(())
    }

    pub async fn submit(&mut self) -> AppResult<()> {
        self.dispatch(PanelEvent::Submit).await
    }

    pub async fn start(&mut self) -> AppResult<()> {
        if self.panel.session().start_enabled() {
            self.dispatch(PanelEvent::Start).await?;
        }
        Ok(())
    }

    pub async fn stop(&mut self) -> AppResult<()> {
        if self.panel.session().stop_enabled() {
            self.dispatch(PanelEvent::Stop).await?;
        }
        Ok(())
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let view = &mut self.log_view;
        view.follow = false;
        view.offset = view.offset.min(view.max_offset).saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let view = &mut self.log_view;
        view.offset = view.offset.saturating_add(lines);
        if view.offset >= view.max_offset {
            view.follow = true;
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.log_view.follow = false;
        self.log_view.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.log_view.follow = true;
    }
}
