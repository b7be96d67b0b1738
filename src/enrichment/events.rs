//! Live-event search for a discovered artist.

use randomedia_core::Result;

use crate::projection::{ArtistInfo, Event};
use crate::upstream::seatgeek::SeatGeekEvent;
use crate::upstream::SeatGeekClient;

#[derive(Clone)]
pub struct EventSearch {
    seatgeek: SeatGeekClient,
}

impl EventSearch {
    pub fn new(seatgeek: SeatGeekClient) -> Self {
        Self { seatgeek }
    }

    /// Events matching the artist's name, in upstream order.
    pub async fn for_artist(&self, artist: &ArtistInfo) -> Result<Vec<Event>> {
        let found = self.seatgeek.events(&artist.name).await?;
        Ok(found.events.into_iter().map(project).collect())
    }
}

fn project(event: SeatGeekEvent) -> Event {
    Event {
        title: event.title,
        id: event.id,
        datetime_utc: event.datetime_utc,
        kind: event.kind,
        address: event.venue.and_then(|venue| venue.address),
        url: event.url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn event_mapping_is_exact() {
        let event: SeatGeekEvent = serde_json::from_value(json!({
            "id": 5521,
            "title": "Band with Guests",
            "datetime_utc": "2026-11-20T02:00:00",
            "type": "concert",
            "venue": {"address": "1 Main St", "city": "Tallinn", "name": "Hall"},
            "url": "https://seatgeek.com/e/5521",
            "performers": [],
            "score": 0.5
        }))
        .unwrap();

        assert_eq!(
            serde_json::to_value(project(event)).unwrap(),
            json!({
                "title": "Band with Guests",
                "id": 5521,
                "datetime_utc": "2026-11-20T02:00:00",
                "type": "concert",
                "address": "1 Main St",
                "url": "https://seatgeek.com/e/5521"
            })
        );
    }

    #[test]
    fn event_without_venue_has_no_address() {
        let event: SeatGeekEvent = serde_json::from_value(json!({"id": 1})).unwrap();
        assert_eq!(project(event).address, None);
    }
}
