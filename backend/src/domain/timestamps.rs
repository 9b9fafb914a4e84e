//! Modification timestamps for copy-on-write entities.

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// Timestamp for a new revision of an entity last touched at `previous`.
///
/// Uses the clock reading, moving one microsecond past `previous` when the
/// clock has not advanced so revisions always order strictly.
pub(crate) fn next_revision(previous: DateTime<Utc>, clock: &dyn Clock) -> DateTime<Utc> {
    let now = clock.utc();
    if now > previous {
        now
    } else {
        previous + TimeDelta::microseconds(1)
    }
}
