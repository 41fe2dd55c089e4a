//! Wall-clock reads and record stamping.
//!
//! Record stamps come from one per-thread clock that never hands out the same value twice, so two
//! edits within one millisecond still order correctly. A mutation stamp also lands past the stamp
//! it replaces, which keeps records written on a device with a faster clock moving forward.

use std::cell::Cell;
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LAST_RECORD_STAMP_MS: Cell<u64> = const { Cell::new(0) };
}

/// Current wall-clock time in unix milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Stamp for a record created now.
pub fn creation_stamp_ms() -> u64 {
    tick()
}

/// Stamp replacing `previous` after a record mutation. Always greater than `previous`.
pub fn mutation_stamp_ms(previous: u64) -> u64 {
    tick().max(previous.saturating_add(1))
}

fn tick() -> u64 {
    let now = unix_time_ms_now();
    LAST_RECORD_STAMP_MS.with(|last| {
        let stamp = now.max(last.get().saturating_add(1));
        last.set(stamp);
        stamp
    })
}
