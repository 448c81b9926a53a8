use std::sync::atomic::{AtomicI64, AtomicU32, Ordering};

/// Daily cap on outbound OpenWeatherMap calls, reset at UTC midnight.
///
/// Every geocoding or forecast request must acquire a slot before going
/// over the wire; requests beyond the cap are rejected so the provider's
/// free-tier quota survives the day.
pub struct CallBudget {
    daily_limit: u32,
    used: AtomicU32,
    current_day: AtomicI64,
}

impl CallBudget {
    pub fn new(daily_limit: u32) -> Self {
        Self {
            daily_limit,
            used: AtomicU32::new(0),
            current_day: AtomicI64::new(Self::utc_day()),
        }
    }

    /// Claim one call slot. Returns `false` once the daily limit is spent.
    pub fn try_acquire(&self) -> bool {
        self.roll_over();
        let prev = self.used.fetch_add(1, Ordering::Relaxed);
        prev < self.daily_limit
    }

    /// Call slots left today.
    pub fn remaining(&self) -> u32 {
        self.roll_over();
        let used = self.used.load(Ordering::Relaxed);
        self.daily_limit.saturating_sub(used)
    }

    /// Calls claimed today.
    pub fn used_today(&self) -> u32 {
        self.roll_over();
        self.used.load(Ordering::Relaxed)
    }

    /// Reset the counter when the UTC day changes; only the CAS winner resets.
    fn roll_over(&self) {
        let today = Self::utc_day();
        let stored = self.current_day.load(Ordering::Relaxed);
        if today != stored
            && self
                .current_day
                .compare_exchange(stored, today, Ordering::AcqRel, Ordering::Relaxed)
                .is_ok()
        {
            self.used.store(0, Ordering::Relaxed);
        }
    }

    fn utc_day() -> i64 {
        chrono::Utc::now().timestamp().div_euclid(86_400)
    }
}
