use std::fmt;

use crate::{log_feed::LogFeed, Effect, TicketingError, SIMULATION_COMPLETE};

pub const STARTED_ENTRY: &str = "Started ticket processing.";
pub const START_FAILED_ENTRY: &str = "Failed to start ticket processing.";
pub const STOPPED_ENTRY: &str = "FrontEnd:Stopped ticket processing.";
pub const CONNECTION_ERROR_ENTRY: &str = "FrontEnd:SSE connection error.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::EnumIs)]
pub enum SessionState {
    /// No run in progress. Start is available.
    #[default]
    Idle,
    /// The start request is in flight.
    Starting,
    /// The event stream is open.
    Running,
    /// The stream is closed and the stop request is in flight.
    Stopping,
}

/// Handle of one event-stream connection. Every opened channel gets a new id,
/// so events that arrive from an already closed connection can be told apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChannelId(u64);

impl ChannelId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "channel-{}", self.0)
    }
}

/// What happened to a message received on a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// The message was added to the log.
    Appended,
    /// The run is over. The channel has been discarded and must be closed.
    Completed(ChannelId),
    /// The message did not come from the live channel and was dropped.
    Ignored,
}

/// Lifecycle of a simulation run as seen from the panel.
///
/// The session holds at most one live channel, and only while
/// [`SessionState::Running`]. Every transition leaves `state` and `channel`
/// consistent before returning, and reports the IO it needs as [`Effect`]s.
#[derive(Debug, Default)]
pub struct SimulationSession {
    state: SessionState,
    channel: Option<ChannelId>,
    next_channel: u64,
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    pub fn channel(&self) -> Option<ChannelId> {
        self.channel
    }

    pub fn start_enabled(&self) -> bool {
        self.state.is_idle()
    }

    pub fn stop_enabled(&self) -> bool {
        self.state.is_running()
    }

    /// Begins a new session. Does nothing unless idle.
    pub fn start(&mut self, log: &mut LogFeed) -> Vec<Effect> {
        if !self.state.is_idle() {
            log::debug!("Ignoring start while {}", self.state);
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let Some(stale) = self.channel.take() {
            log::debug!("Closing stale {}", stale);
            effects.push(Effect::CloseChannel(stale));
        }
        log.reset();
        self.state = SessionState::Starting;
        effects.push(Effect::RequestStart);
        log::info!("Requesting simulation start");
        effects
    }

    /// The backend accepted the start request: open the event stream.
    pub fn start_acknowledged(&mut self, log: &mut LogFeed) -> Vec<Effect> {
        if !self.state.is_starting() {
            log::warn!("Start acknowledgement received while {}", self.state);
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let Some(stale) = self.channel.take() {
            effects.push(Effect::CloseChannel(stale));
        }
        let channel = ChannelId::new(self.next_channel);
        self.next_channel += 1;

        log.append(STARTED_ENTRY);
        self.channel = Some(channel);
        self.state = SessionState::Running;
        effects.push(Effect::OpenChannel(channel));
        log::info!("Simulation started, opening {}", channel);
        effects
    }

    pub fn start_failed(&mut self, error: &TicketingError, log: &mut LogFeed) {
        if !self.state.is_starting() {
            log::warn!("Start failure received while {}: {}", self.state, error);
            return;
        }
        log::warn!("{}", error);
        log.append(START_FAILED_ENTRY);
        self.state = SessionState::Idle;
    }

    /// Handles one message from the event stream.
    ///
    /// The completion message ends the run and is not stored in the log.
    pub fn receive(&mut self, channel: ChannelId, payload: &str, log: &mut LogFeed) -> Delivery {
        if !self.is_live(channel) {
            log::debug!("Dropping message from closed {}", channel);
            return Delivery::Ignored;
        }

        if payload == SIMULATION_COMPLETE {
            log::info!("Simulation complete, closing {}", channel);
            self.channel = None;
            self.state = SessionState::Idle;
            return Delivery::Completed(channel);
        }

        log.append(payload);
        Delivery::Appended
    }

    /// The live connection failed. There is no automatic reconnect, the
    /// operator has to start again.
    pub fn transport_error(
        &mut self,
        channel: ChannelId,
        error: &TicketingError,
        log: &mut LogFeed,
    ) -> Vec<Effect> {
        if !self.is_live(channel) {
            log::debug!("Ignoring error from closed {}: {}", channel, error);
            return Vec::new();
        }

        log::warn!("{} failed: {}", channel, error);
        log.append(CONNECTION_ERROR_ENTRY);
        self.channel = None;
        self.state = SessionState::Idle;
        vec![Effect::CloseChannel(channel)]
    }

    /// Operator stop. The stream is closed right away, the session becomes
    /// idle once the stop request resolves.
    pub fn stop(&mut self) -> Vec<Effect> {
        if !self.state.is_running() {
            log::debug!("Ignoring stop while {}", self.state);
            return Vec::new();
        }

        let mut effects = Vec::new();
        if let Some(channel) = self.channel.take() {
            effects.push(Effect::CloseChannel(channel));
        }
        self.state = SessionState::Stopping;
        effects.push(Effect::RequestStop);
        log::info!("Requesting simulation stop");
        effects
    }

    /// The stop request resolved. Its outcome does not matter to the session.
    pub fn stop_finished(&mut self, result: Result<(), TicketingError>, log: &mut LogFeed) {
        if !self.state.is_stopping() {
            log::warn!("Stop response received while {}", self.state);
            return;
        }
        if let Err(error) = result {
            log::warn!("{}", error);
        }
        log.append(STOPPED_ENTRY);
        self.state = SessionState::Idle;
    }

    /// Releases the channel when the panel goes away. No log entry is written
    /// and the state is left as it is.
    pub fn dispose(&mut self) -> Vec<Effect> {
        match self.channel.take() {
            Some(channel) => {
                log::debug!("Disposing {}", channel);
                vec![Effect::CloseChannel(channel)]
            }
            None => Vec::new(),
        }
    }

    fn is_live(&self, channel: ChannelId) -> bool {
        self.state.is_running() && self.channel == Some(channel)
    }
}
