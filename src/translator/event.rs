//! Move event extraction.
//!
//! Source transactions carry generic ABCI events; only `move` events whose
//! attributes name both a `type_tag` and a `data` payload survive the
//! translation. Everything else is dropped without a gap marker, and
//! retained events keep their source order.

use tracing::debug;

use crate::aptos::types::MoveEvent;
use crate::initia::types::AbciEvent;

/// Filter and convert a source event list into Aptos Move events.
pub fn map_events(events: &[AbciEvent]) -> Vec<MoveEvent> {
    let mut mapped = Vec::new();

    for event in events {
        if event.event_type != "move" {
            continue;
        }

        let type_tag = find_attribute(event, "type_tag");
        let data = find_attribute(event, "data");

        let (Some(type_tag), Some(data)) = (type_tag, data) else {
            continue;
        };

        match serde_json::from_str(data) {
            Ok(parsed) => mapped.push(MoveEvent {
                event_type: type_tag.to_string(),
                data: parsed,
            }),
            Err(err) => {
                debug!("Dropping move event '{}' with unparsable data: {}", type_tag, err);
            }
        }
    }

    mapped
}

/// First attribute value with the given key, if present.
fn find_attribute<'a>(event: &'a AbciEvent, key: &str) -> Option<&'a str> {
    event
        .attributes
        .iter()
        .find(|attr| attr.key == key)
        .map(|attr| attr.value.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initia::types::EventAttribute;
    use serde_json::json;

    fn event(event_type: &str, attributes: &[(&str, &str)]) -> AbciEvent {
        AbciEvent {
            event_type: event_type.to_string(),
            attributes: attributes
                .iter()
                .map(|(key, value)| EventAttribute {
                    key: key.to_string(),
                    value: value.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_keeps_move_events_and_drops_the_rest() {
        let events = vec![
            event(
                "move",
                &[
                    ("type_tag", "0x1::coin::Transfer"),
                    ("data", r#"{"amount":"100"}"#),
                ],
            ),
            event("bank", &[("spender", "init1xyz")]),
        ];

        let mapped = map_events(&events);
        assert_eq!(mapped.len(), 1);
        assert_eq!(mapped[0].event_type, "0x1::coin::Transfer");
        assert_eq!(mapped[0].data, json!({ "amount": "100" }));
    }

    #[test]
    fn test_drops_move_event_missing_required_attribute() {
        let events = vec![
            event("move", &[("type_tag", "0x1::coin::Transfer")]),
            event("move", &[("data", r#"{"amount":"1"}"#)]),
        ];
        assert!(map_events(&events).is_empty());
    }

    #[test]
    fn test_drops_move_event_with_unparsable_data() {
        let events = vec![event(
            "move",
            &[("type_tag", "0x1::coin::Transfer"), ("data", "not json")],
        )];
        assert!(map_events(&events).is_empty());
    }

    #[test]
    fn test_first_attribute_match_wins() {
        let events = vec![event(
            "move",
            &[
                ("type_tag", "0x1::coin::Deposit"),
                ("type_tag", "0x1::coin::Withdraw"),
                ("data", "{}"),
            ],
        )];
        let mapped = map_events(&events);
        assert_eq!(mapped[0].event_type, "0x1::coin::Deposit");
    }

    #[test]
    fn test_preserves_source_order() {
        let events = vec![
            event("move", &[("type_tag", "a"), ("data", "1")]),
            event("move", &[("type_tag", "b"), ("data", "2")]),
        ];
        let mapped = map_events(&events);
        assert_eq!(mapped[0].event_type, "a");
        assert_eq!(mapped[1].event_type, "b");
    }
}
