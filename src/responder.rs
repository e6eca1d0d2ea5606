//! Demo Responder
//!
//! A deterministic stand-in for the real model glue (embedding and
//! generation wrappers live outside this crate). It answers from a small
//! keyword table and its constructor deliberately does noticeable work, so
//! the binary exercises lazy loading, singleflight, and idle eviction the
//! same way a real model would.

use std::time::Duration;

use tracing::info;

/// Name under which the responder is registered with the resource manager.
pub const RESPONDER_NAME: &str = "responder";

// == Responder ==
/// Keyword-table answer generator.
pub struct Responder {
    rules: Vec<(&'static str, &'static str)>,
    fallback: &'static str,
}

impl Responder {
    // == Constructor ==
    /// Builds the responder, simulating an expensive model load.
    pub fn load() -> anyhow::Result<Self> {
        // Stands in for reading model weights from disk
        std::thread::sleep(Duration::from_millis(200));

        let rules = vec![
            ("check in", "Check-in starts at 3 PM at the front desk."),
            ("check out", "Check-out is at 11 AM; late check-out on request."),
            ("breakfast", "Breakfast is served from 7 to 10 AM in the lobby."),
            ("wifi", "Free Wi-Fi is available throughout the hotel."),
            ("parking", "On-site parking is available for 15 per night."),
            ("pool", "The pool is open daily from 8 AM to 9 PM."),
        ];

        info!(rules = rules.len(), "responder table loaded");
        Ok(Self {
            rules,
            fallback: "Please contact the front desk for details.",
        })
    }

    // == Answer ==
    /// Produces a response for normalized query text.
    pub fn answer(&self, normalized_query: &str) -> String {
        for (keyword, reply) in &self.rules {
            if normalized_query.contains(keyword) {
                return (*reply).to_string();
            }
        }
        self.fallback.to_string()
    }
}
