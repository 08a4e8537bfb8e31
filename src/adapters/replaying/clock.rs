//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, FixedOffset};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let output = {
            let mut replayer = self.replayer.lock().expect("replayer lock poisoned");
            let interaction = replayer.next_interaction("clock", "now");
            interaction.output.clone()
        };
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Interaction};
    use chrono::{Timelike, Utc};
    use serde_json::json;

    fn make_replayer(times: &[&str]) -> CassetteReplayer {
        let interactions = times
            .iter()
            .enumerate()
            .map(|(seq, ts)| Interaction {
                seq: seq as u64,
                port: "clock".into(),
                method: "now".into(),
                input: json!(null),
                output: json!(ts),
            })
            .collect();
        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            tool_version: "0.1.0".into(),
            interactions,
        };
        CassetteReplayer::new(&cassette)
    }

    #[test]
    fn replaying_clock_keeps_recorded_offset() {
        let clock = ReplayingClock::new(make_replayer(&["2025-12-08T21:10:00+01:00"]));
        let now = clock.now();
        assert_eq!(now.hour(), 21);
        assert_eq!(now.offset().local_minus_utc(), 3600);
    }

    #[test]
    fn replaying_clock_serves_times_in_order() {
        let clock = ReplayingClock::new(make_replayer(&[
            "2025-01-01T00:00:00+00:00",
            "2025-01-01T00:01:00+00:00",
        ]));
        assert_eq!(clock.now().minute(), 0);
        assert_eq!(clock.now().minute(), 1);
    }
}
