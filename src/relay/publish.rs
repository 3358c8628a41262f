//! Fan-out of signed events to relays.
//!
//! Each relay gets one best-effort attempt: open, send `["EVENT", <event>]`,
//! close. A failing relay is logged and recorded, never retried, and never
//! stops the remaining relays from being tried.

use nostr::RelayUrl;
use tracing::{info, warn};

use super::error::{RelayError, RelayResult};
use super::types::PublishResult;
use crate::nostr::Event;

/// Delivers a framed message to one relay.
///
/// Implementations own the connection handling. The library only frames the
/// message and records the outcome.
pub trait RelayTransport {
    /// Sends `message` to the relay at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Connection`] or [`RelayError::Send`] on failure.
    fn send(&self, url: &str, message: &str) -> RelayResult<()>;
}

impl<F> RelayTransport for F
where
    F: Fn(&str, &str) -> RelayResult<()>,
{
    fn send(&self, url: &str, message: &str) -> RelayResult<()> {
        self(url, message)
    }
}

/// Frames `event` as a client `EVENT` message.
///
/// # Errors
///
/// Returns [`RelayError::Serialization`] if the event cannot be serialized.
pub fn relay_message(event: &Event) -> RelayResult<String> {
    Ok(serde_json::to_string(&("EVENT", event))?)
}

/// Sends `event` to every relay in `relays`.
///
/// Relays with an invalid URL or a failed send are collected in
/// [`PublishResult::failed`].
///
/// # Errors
///
/// Returns [`RelayError::Serialization`] if the event cannot be framed.
/// Per-relay failures are not errors.
pub fn publish<T>(transport: &T, relays: &[String], event: &Event) -> RelayResult<PublishResult>
where
    T: RelayTransport + ?Sized,
{
    let message = relay_message(event)?;
    let mut result = PublishResult::new(event.id());

    for relay in relays {
        let outcome = validate_relay_url(relay).and_then(|()| transport.send(relay, &message));
        match outcome {
            Ok(()) => result.accepted_by.push(relay.clone()),
            Err(error) => {
                warn!(relay = %relay, %error, "failed to send event to relay");
                result.failed.push((relay.clone(), error.to_string()));
            }
        }
    }

    info!(
        event_id = %result.event_id,
        accepted = result.success_count(),
        failed = result.failed.len(),
        "published event"
    );

    Ok(result)
}

/// Accepts `ws://` and `wss://` URLs.
fn validate_relay_url(relay: &str) -> RelayResult<()> {
    RelayUrl::parse(relay)
        .map(|_| ())
        .map_err(|e| RelayError::InvalidUrl(format!("{relay}: {e}")))
}
