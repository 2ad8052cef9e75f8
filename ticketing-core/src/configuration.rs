use serde::{Deserialize, Serialize};

/// Parameters of one simulation run, as sent to `POST /configurations`.
///
/// A fresh value is built for every submission. Cross-field rules (for example
/// capacity versus total) are left to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Number of tickets the vendors will release in total.
    pub total_tickets: u32,
    /// Milliseconds between ticket releases.
    #[serde(rename = "ticketReleaseRate")]
    pub ticket_release_rate_ms: u32,
    /// Milliseconds between customer purchases.
    #[serde(rename = "customerRetrievalRate")]
    pub customer_retrieval_rate_ms: u32,
    /// Maximum number of tickets held in the pool at once.
    pub max_ticket_capacity: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_backend_field_names() {
        let config = Configuration {
            total_tickets: 100,
            ticket_release_rate_ms: 200,
            customer_retrieval_rate_ms: 300,
            max_ticket_capacity: 150,
        };

        let json = serde_json::to_value(config).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "totalTickets": 100,
                "ticketReleaseRate": 200,
                "customerRetrievalRate": 300,
                "maxTicketCapacity": 150,
            })
        );
    }
}
