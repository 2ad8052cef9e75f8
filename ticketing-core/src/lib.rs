use configuration::Configuration;
use session::ChannelId;

pub mod configuration;
mod error;
pub mod form;
pub mod log_feed;
pub mod panel;
pub mod session;
pub mod sse;

pub use error::{FormError, TicketingError};

/// The payload the backend sends as the last message of a run.
pub const SIMULATION_COMPLETE: &str = "Simulation complete.";

/// Requests for the IO layer. Every effect is produced by a state transition
/// and its outcome is fed back as a [`panel::PanelEvent`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// `POST /configurations` with the given configuration.
    SubmitConfiguration(Configuration),
    /// `GET /tickets/start`.
    RequestStart,
    /// `GET /tickets/stop`.
    RequestStop,
    /// Connect to the event stream and tag everything it yields with this id.
    OpenChannel(ChannelId),
    /// Stop delivering events for this channel and drop the connection.
    CloseChannel(ChannelId),
}
