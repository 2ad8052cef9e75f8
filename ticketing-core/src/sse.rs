//! Incremental decoder for `text/event-stream` bodies.
//!
//! Bytes can be fed in chunks of any size; a line or even a CRLF pair may be
//! split across chunks. Only complete events (terminated by a blank line) are
//! returned, an unterminated event at the end of the stream is discarded.

/// Longest line accepted before the stream is treated as broken.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event stream line exceeds {limit} bytes")]
pub struct LineTooLong {
    pub limit: usize,
}

/// One dispatched server-sent event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerEvent {
    /// The `event:` field, if any. Absent means a plain `message`.
    pub event: Option<String>,
    /// All `data:` lines of the event joined with `\n`.
    pub data: String,
    /// The last event id seen on the stream.
    pub id: Option<String>,
    /// The last reconnection time hint seen on the stream, in milliseconds.
    pub retry: Option<u64>,
}

impl ServerEvent {
    /// Whether this is delivered as an ordinary message (no event type, or `message`).
    pub fn is_message(&self) -> bool {
        matches!(self.event.as_deref(), None | Some("") | Some("message"))
    }
}

#[derive(Debug)]
pub struct EventStreamDecoder {
    line: Vec<u8>,
    max_line_length: usize,
    data: Vec<String>,
    event: Option<String>,
    last_id: Option<String>,
    retry: Option<u64>,
    skip_lf: bool,
    started: bool,
}

impl Default for EventStreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

const BOM: &[u8] = b"\xEF\xBB\xBF";

impl EventStreamDecoder {
    pub fn new() -> Self {
        Self::with_max_line_length(DEFAULT_MAX_LINE_LENGTH)
    }

    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            line: Vec::new(),
            max_line_length,
            data: Vec::new(),
            event: None,
            last_id: None,
            retry: None,
            skip_lf: false,
            started: false,
        }
    }

    /// Feeds the next chunk of the body and returns the events it completed.
    ///
    /// Fails once a single line grows past the configured limit. The decoder
    /// is not usable after that.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<Vec<ServerEvent>, LineTooLong> {
        let mut events = Vec::new();
        for &byte in chunk {
            if self.skip_lf {
                self.skip_lf = false;
                if byte == b'\n' {
                    continue;
                }
            }
            match byte {
                b'\r' => {
                    self.skip_lf = true;
                    self.end_line(&mut events);
                }
                b'\n' => self.end_line(&mut events),
                _ => {
                    if self.line.len() >= self.max_line_length {
                        return Err(LineTooLong {
                            limit: self.max_line_length,
                        });
                    }
                    self.line.push(byte);
                }
            }
        }
        Ok(events)
    }

    fn end_line(&mut self, events: &mut Vec<ServerEvent>) {
        let mut raw = std::mem::take(&mut self.line);
        if !self.started {
            self.started = true;
            if raw.starts_with(BOM) {
                raw.drain(..BOM.len());
            }
        }
        let line = String::from_utf8_lossy(&raw);

        if line.is_empty() {
            if let Some(event) = self.dispatch() {
                events.push(event);
            }
            return;
        }
        if line.starts_with(':') {
            // Comment, usually a keep-alive.
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (&*line, ""),
        };
        match field {
            "data" => self.data.push(value.to_string()),
            // An empty type is the default `message` type.
            "event" if value.is_empty() => self.event = None,
            "event" => self.event = Some(value.to_string()),
            "id" if !value.contains('\0') => self.last_id = Some(value.to_string()),
            "retry" => {
                if let Ok(retry) = value.parse() {
                    self.retry = Some(retry);
                }
            }
            _ => log::trace!("Ignoring event stream field {:?}", field),
        }
    }

    fn dispatch(&mut self) -> Option<ServerEvent> {
        let event = self.event.take();
        if self.data.is_empty() {
            return None;
        }
        Some(ServerEvent {
            event,
            data: std::mem::take(&mut self.data).join("\n"),
            id: self.last_id.clone(),
            retry: self.retry,
        })
    }
}
