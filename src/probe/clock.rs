use time::{OffsetDateTime, PrimitiveDateTime};

use super::Clock;

/// Local wall-clock time, falling back to UTC when the offset is unknown.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn now(&self) -> PrimitiveDateTime {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        PrimitiveDateTime::new(now.date(), now.time())
    }
}
