use crate::{
    configuration::Configuration,
    form::ConfigForm,
    log_feed::LogFeed,
    session::{ChannelId, Delivery, SessionState, SimulationSession},
    Effect, TicketingError, SIMULATION_COMPLETE,
};

pub const SUBMITTED_ENTRY: &str = "Configuration submitted successfully.";
pub const SUBMIT_SUCCESS_STATUS: &str = "Data saved successfully!";
pub const SUBMIT_FAILURE_STATUS: &str = "Failed to save data. Please try again.";

/// Inputs to the panel: operator intents and outcomes of earlier effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    /// The operator submitted the configuration form.
    Submit,
    /// The operator pressed Start.
    Start,
    /// The operator pressed Stop.
    Stop,
    /// The panel is being torn down.
    Dispose,
    SubmitFinished {
        config: Configuration,
        result: Result<(), TicketingError>,
    },
    StartFinished(Result<(), TicketingError>),
    StopFinished(Result<(), TicketingError>),
    StreamMessage {
        channel: ChannelId,
        payload: String,
    },
    StreamError {
        channel: ChannelId,
        error: TicketingError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum StatusKind {
    Success,
    Failure,
    Info,
}

/// The transient line above the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusMessage {
    fn new(kind: StatusKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Everything the operator sees, and the only place it changes.
///
/// [`ControlPanel::handle`] applies one event synchronously and returns the IO
/// the IO layer has to perform. The results of that IO come back as events.
#[derive(Debug)]
pub struct ControlPanel {
    pub form: ConfigForm,
    available_tickets: u32,
    status: Option<StatusMessage>,
    log: LogFeed,
    session: SimulationSession,
}

impl ControlPanel {
    pub fn new(log_capacity: usize) -> Self {
        Self {
            form: ConfigForm::new(),
            available_tickets: 0,
            status: None,
            log: LogFeed::new(log_capacity),
            session: SimulationSession::new(),
        }
    }

    pub fn available_tickets(&self) -> u32 {
        self.available_tickets
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn log(&self) -> &LogFeed {
        &self.log
    }

    pub fn session(&self) -> &SimulationSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn handle(&mut self, event: PanelEvent) -> Vec<Effect> {
        match event {
            PanelEvent::Submit => self.submit(),
            PanelEvent::Start => self.session.start(&mut self.log),
            PanelEvent::Stop => self.session.stop(),
            PanelEvent::Dispose => self.session.dispose(),
            PanelEvent::SubmitFinished { config, result } => {
                self.submit_finished(config, result);
                Vec::new()
            }
            PanelEvent::StartFinished(Ok(())) => self.session.start_acknowledged(&mut self.log),
            PanelEvent::StartFinished(Err(error)) => {
                self.session.start_failed(&error, &mut self.log);
                Vec::new()
            }
            PanelEvent::StopFinished(result) => {
                self.session.stop_finished(result, &mut self.log);
                Vec::new()
            }
            PanelEvent::StreamMessage { channel, payload } => {
                match self.session.receive(channel, &payload, &mut self.log) {
                    Delivery::Completed(channel) => {
                        self.status = Some(StatusMessage::new(StatusKind::Info, SIMULATION_COMPLETE));
                        vec![Effect::CloseChannel(channel)]
                    }
                    Delivery::Appended | Delivery::Ignored => Vec::new(),
                }
            }
            PanelEvent::StreamError { channel, error } => {
                self.session.transport_error(channel, &error, &mut self.log)
            }
        }
    }

    fn submit(&mut self) -> Vec<Effect> {
        match self.form.parse() {
            Ok(config) => {
                log::info!("Submitting configuration {:?}", config);
                vec![Effect::SubmitConfiguration(config)]
            }
            Err(error) => {
                log::debug!("Configuration form rejected: {}", error);
                self.status = Some(StatusMessage::new(StatusKind::Failure, error.to_string()));
                Vec::new()
            }
        }
    }

    fn submit_finished(&mut self, config: Configuration, result: Result<(), TicketingError>) {
        match result {
            Ok(()) => {
                log::info!("Configuration saved");
                self.available_tickets = config.total_tickets;
                self.log.append(SUBMITTED_ENTRY);
                self.form.clear();
                self.status = Some(StatusMessage::new(StatusKind::Success, SUBMIT_SUCCESS_STATUS));
            }
            Err(error) => {
                log::warn!("{}", error);
                self.status = Some(StatusMessage::new(StatusKind::Failure, SUBMIT_FAILURE_STATUS));
            }
        }
    }
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(crate::log_feed::DEFAULT_LOG_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Field;
    use crate::session::{CONNECTION_ERROR_ENTRY, STARTED_ENTRY};
    use strum::IntoEnumIterator;
    use test_log::test;

    fn fill(panel: &mut ControlPanel, values: [&str; 4]) {
        for (field, value) in Field::iter().zip(values) {
            panel.form.set_value(field, value);
        }
    }

    fn entries(panel: &ControlPanel) -> Vec<&str> {
        panel.log().iter().collect()
    }

    fn submitted_config(effects: Vec<Effect>) -> Configuration {
        match effects.as_slice() {
            [Effect::SubmitConfiguration(config)] => *config,
            other => panic!("Expected a submission, got {:?}", other),
        }
    }

    #[test]
    fn successful_submit_updates_counter_and_clears_form() {
        let mut panel = ControlPanel::default();
        fill(&mut panel, ["100", "200", "300", "150"]);

        let config = submitted_config(panel.handle(PanelEvent::Submit));
        assert_eq!(
            config,
            Configuration {
                total_tickets: 100,
                ticket_release_rate_ms: 200,
                customer_retrieval_rate_ms: 300,
                max_ticket_capacity: 150,
            }
        );

        let effects = panel.handle(PanelEvent::SubmitFinished {
            config,
            result: Ok(()),
        });
        assert!(effects.is_empty());
        assert_eq!(panel.available_tickets(), 100);
        for field in Field::iter() {
            assert_eq!(panel.form.value(field), "");
        }
        assert_eq!(entries(&panel), vec![SUBMITTED_ENTRY]);
        let status = panel.status().unwrap();
        assert!(status.kind.is_success());
        assert_eq!(status.text, SUBMIT_SUCCESS_STATUS);
    }

    #[test]
    fn failed_submit_leaves_form_and_counter() {
        let mut panel = ControlPanel::default();
        fill(&mut panel, ["10", "1", "1", "5"]);
        let first = submitted_config(panel.handle(PanelEvent::Submit));
        panel.handle(PanelEvent::SubmitFinished {
            config: first,
            result: Ok(()),
        });

        fill(&mut panel, ["100", "200", "300", "150"]);
        let second = submitted_config(panel.handle(PanelEvent::Submit));
        panel.handle(PanelEvent::SubmitFinished {
            config: second,
            result: Err(TicketingError::Submit("connection refused".into())),
        });

        assert_eq!(panel.available_tickets(), 10);
        assert_eq!(panel.form.value(Field::TotalTickets), "100");
        assert_eq!(panel.form.value(Field::MaxTicketCapacity), "150");
        assert_eq!(entries(&panel), vec![SUBMITTED_ENTRY]);
        let status = panel.status().unwrap();
        assert!(status.kind.is_failure());
        assert_eq!(status.text, SUBMIT_FAILURE_STATUS);
    }

    #[test]
    fn incomplete_form_is_not_sent() {
        let mut panel = ControlPanel::default();
        fill(&mut panel, ["100", "", "300", "150"]);

        assert!(panel.handle(PanelEvent::Submit).is_empty());
        assert!(panel.status().unwrap().kind.is_failure());
        assert!(panel.status().unwrap().text.contains("Ticket Release Rate"));
        assert!(panel.log().is_empty());
        assert_eq!(panel.form.value(Field::TotalTickets), "100");
    }

    #[test]
    fn run_to_completion() {
        let mut panel = ControlPanel::default();
        assert_eq!(panel.handle(PanelEvent::Start), vec![Effect::RequestStart]);
        assert_eq!(panel.state(), SessionState::Starting);

        let effects = panel.handle(PanelEvent::StartFinished(Ok(())));
        let channel = match effects.as_slice() {
            [Effect::OpenChannel(channel)] => *channel,
            other => panic!("Expected a channel to open, got {:?}", other),
        };

        panel.handle(PanelEvent::StreamMessage {
            channel,
            payload: "Ticket #1 released".into(),
        });
        let effects = panel.handle(PanelEvent::StreamMessage {
            channel,
            payload: SIMULATION_COMPLETE.into(),
        });

        assert_eq!(effects, vec![Effect::CloseChannel(channel)]);
        assert_eq!(panel.state(), SessionState::Idle);
        assert_eq!(entries(&panel), vec![STARTED_ENTRY, "Ticket #1 released"]);
        assert_eq!(panel.status().unwrap().kind, StatusKind::Info);
        assert!(panel.session().start_enabled());
    }

    #[test]
    fn new_session_clears_previous_history() {
        let mut panel = ControlPanel::default();
        fill(&mut panel, ["1", "1", "1", "1"]);
        let config = submitted_config(panel.handle(PanelEvent::Submit));
        panel.handle(PanelEvent::SubmitFinished {
            config,
            result: Ok(()),
        });

        panel.handle(PanelEvent::Start);
        let channel = match panel.handle(PanelEvent::StartFinished(Ok(()))).as_slice() {
            [Effect::OpenChannel(channel)] => *channel,
            other => panic!("Expected a channel to open, got {:?}", other),
        };
        panel.handle(PanelEvent::StreamError {
            channel,
            error: TicketingError::StreamTransport("eof".into()),
        });

        // History of the failed run stays visible until the next start.
        assert_eq!(entries(&panel), vec![STARTED_ENTRY, CONNECTION_ERROR_ENTRY]);
        assert_eq!(panel.log().resets(), 1);

        panel.handle(PanelEvent::Start);
        assert!(panel.log().is_empty());
        assert_eq!(panel.log().resets(), 2);
        // The counter is not tied to the session.
        assert_eq!(panel.available_tickets(), 1);
    }

    #[test]
    fn dispose_emits_close_only() {
        let mut panel = ControlPanel::default();
        panel.handle(PanelEvent::Start);
        let channel = match panel.handle(PanelEvent::StartFinished(Ok(()))).as_slice() {
            [Effect::OpenChannel(channel)] => *channel,
            other => panic!("Expected a channel to open, got {:?}", other),
        };

        assert_eq!(
            panel.handle(PanelEvent::Dispose),
            vec![Effect::CloseChannel(channel)]
        );
        assert_eq!(entries(&panel), vec![STARTED_ENTRY]);
    }
}
