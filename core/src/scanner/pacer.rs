//! Fixed-interval pacing for the SYN send loop.

use std::time::Duration;

use tokio::time::{Interval, MissedTickBehavior, interval};

/// Ticks at `1/rate` seconds. Each tick is a suspension point, which doubles
/// as the send loop's cancellation checkpoint.
pub struct Pacer {
    interval: Interval,
}

impl Pacer {
    pub fn per_second(rate: u32) -> Self {
        let rate = rate.max(1);
        // Rates above 1e9 round the period to zero, which interval() panics on.
        let period = (Duration::from_secs(1) / rate).max(Duration::from_nanos(1));
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self { interval }
    }

    pub async fn tick(&mut self) {
        self.interval.tick().await;
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
