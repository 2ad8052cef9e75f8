use std::collections::HashMap;

use futures::StreamExt;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::task::JoinHandle;
use ticketing_core::{
    panel::PanelEvent, session::ChannelId, sse::EventStreamDecoder, Effect, TicketingError,
};

use crate::client::BackendClient;

/// Executes effects coming from the UI and reports their outcomes back.
///
/// Requests run concurrently in their own tasks. Each open channel has one
/// reader task; closing the channel aborts it, so nothing more is delivered
/// for it. Returns once the UI side drops its sender.
pub async fn background_task(
    client: BackendClient,
    tx: Sender<PanelEvent>,
    rx: &mut Receiver<Effect>,
) {
    let mut channels: HashMap<ChannelId, JoinHandle<()>> = HashMap::new();

    while let Some(effect) = rx.recv().await {
        match effect {
            Effect::SubmitConfiguration(config) => {
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client.save_configuration(&config).await;
                    report(&tx, PanelEvent::SubmitFinished { config, result }).await;
                });
            }
            Effect::RequestStart => {
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client.start_simulation().await;
                    report(&tx, PanelEvent::StartFinished(result)).await;
                });
            }
            Effect::RequestStop => {
                let client = client.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = client.stop_simulation().await;
                    report(&tx, PanelEvent::StopFinished(result)).await;
                });
            }
            Effect::OpenChannel(channel) => {
                log::info!("Opening {}", channel);
                let reader = tokio::spawn(read_event_stream(client.clone(), channel, tx.clone()));
                if let Some(previous) = channels.insert(channel, reader) {
                    // Ids are never reused, so this would be a bug in the caller.
                    log::error!("{} was already open", channel);
                    previous.abort();
                }
            }
            Effect::CloseChannel(channel) => match channels.remove(&channel) {
                Some(reader) => {
                    log::info!("Closing {}", channel);
                    reader.abort();
                }
                None => log::debug!("{} is not open", channel),
            },
        }
        channels.retain(|_, reader| !reader.is_finished());
    }

    for (channel, reader) in channels.drain() {
        log::debug!("Shutting down {}", channel);
        reader.abort();
    }
}

async fn report(tx: &Sender<PanelEvent>, event: PanelEvent) {
    if tx.send(event).await.is_err() {
        log::debug!("UI is gone, dropping backend update");
    }
}

/// Forwards the messages of one event stream, in order, until the stream
/// fails or ends. Either way the channel is reported as broken: a healthy run
/// is closed by the UI after the completion message, before the end is seen.
async fn read_event_stream(client: BackendClient, channel: ChannelId, tx: Sender<PanelEvent>) {
    let error = match client.open_event_stream().await {
        Ok(response) => {
            let mut decoder = EventStreamDecoder::new();
            let mut body = response.bytes_stream();
            loop {
                match body.next().await {
                    Some(Ok(chunk)) => {
                        let events = match decoder.feed(&chunk) {
                            Ok(events) => events,
                            Err(err) => break TicketingError::StreamTransport(err.to_string()),
                        };
                        for event in events {
                            if !event.is_message() {
                                log::debug!("{} skipped {:?} event", channel, event.event);
                                continue;
                            }
                            log::trace!("{} received {:?}", channel, event.data);
                            let update = PanelEvent::StreamMessage {
                                channel,
                                payload: event.data,
                            };
                            if tx.send(update).await.is_err() {
                                return;
                            }
                        }
                    }
                    Some(Err(err)) => break TicketingError::StreamTransport(err.to_string()),
                    None => {
                        break TicketingError::StreamTransport("stream closed by backend".into())
                    }
                }
            }
        }
        Err(error) => error,
    };

    report(&tx, PanelEvent::StreamError { channel, error }).await;
}
