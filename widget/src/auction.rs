//! Reverse-auction price math. The price starts high and decays a fixed
//! amount per elapsed interval until a floor, returning to the top on
//! every successful purchase.

use crate::types::PriceDisplay;

/// Immutable decay parameters of a reverse auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuctionSchedule {
    pub starting_lamports: u64,
    pub floor_lamports: u64,
    pub decay_lamports: u64,
    pub interval_ms: u64,
}

impl AuctionSchedule {
    /// Price after `elapsed_ms` with no intervening reset:
    /// `max(floor, starting - decay * whole_intervals)`. Saturating, so a
    /// long-idle auction sits at the floor instead of underflowing.
    pub fn price_at(&self, elapsed_ms: u64) -> u64 {
        if self.interval_ms == 0 {
            return self.starting_lamports.max(self.floor_lamports);
        }
        let intervals = elapsed_ms / self.interval_ms;
        self.starting_lamports
            .saturating_sub(self.decay_lamports.saturating_mul(intervals))
            .max(self.floor_lamports)
    }

    /// Milliseconds until the next scheduled decrease.
    pub fn countdown_ms(&self, elapsed_ms: u64) -> u64 {
        if self.interval_ms == 0 {
            return 0;
        }
        self.interval_ms - (elapsed_ms % self.interval_ms)
    }
}

/// Live auction state: a schedule plus the timestamp the decay is counted
/// from. The current price is always derived from these two; it is never
/// stored on its own.
#[derive(Debug, Clone)]
pub struct Auction {
    schedule: AuctionSchedule,
    last_reset_ms: i64,
}

impl Auction {
    pub fn new(schedule: AuctionSchedule, now_ms: i64) -> Self {
        Self {
            schedule,
            last_reset_ms: now_ms,
        }
    }

    pub fn schedule(&self) -> &AuctionSchedule {
        &self.schedule
    }

    pub fn last_reset_ms(&self) -> i64 {
        self.last_reset_ms
    }

    /// Elapsed time since the last reset. A reset timestamp in the future
    /// (clock skew against the chain) counts as zero elapsed.
    fn elapsed_ms(&self, now_ms: i64) -> u64 {
        now_ms.saturating_sub(self.last_reset_ms).max(0) as u64
    }

    pub fn current_price(&self, now_ms: i64) -> u64 {
        self.schedule.price_at(self.elapsed_ms(now_ms))
    }

    pub fn countdown_ms(&self, now_ms: i64) -> u64 {
        self.schedule.countdown_ms(self.elapsed_ms(now_ms))
    }

    /// A successful purchase sends the price back to the top.
    pub fn reset(&mut self, at_ms: i64) {
        self.last_reset_ms = at_ms;
    }

    /// Adopt a remote mint timestamp as a reset signal, but only when it
    /// is newer than what this viewer already knows.
    pub fn adopt_remote_reset(&mut self, remote_ms: i64) -> bool {
        if remote_ms > self.last_reset_ms {
            self.last_reset_ms = remote_ms;
            return true;
        }
        false
    }

    pub fn display(&self, now_ms: i64) -> PriceDisplay {
        PriceDisplay {
            price_lamports: self.current_price(now_ms),
            next_decrease_in_ms: self.countdown_ms(now_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::native_token::LAMPORTS_PER_SOL;

    fn drop_schedule() -> AuctionSchedule {
        AuctionSchedule {
            starting_lamports: 3 * LAMPORTS_PER_SOL,
            floor_lamports: LAMPORTS_PER_SOL / 2,
            decay_lamports: 3 * LAMPORTS_PER_SOL / 100,
            interval_ms: 60_000,
        }
    }

    #[test]
    fn test_price_at_known_points() {
        let schedule = drop_schedule();
        assert_eq!(schedule.price_at(0), 3 * LAMPORTS_PER_SOL);
        assert_eq!(schedule.price_at(59_999), 3 * LAMPORTS_PER_SOL);
        assert_eq!(schedule.price_at(60_000), 2_970_000_000);
        assert_eq!(schedule.price_at(120_000), 2_940_000_000);
    }

    #[test]
    fn test_price_clamps_at_floor() {
        let schedule = drop_schedule();
        assert_eq!(schedule.price_at(10_000_000), LAMPORTS_PER_SOL / 2);
        assert_eq!(schedule.price_at(u64::MAX), LAMPORTS_PER_SOL / 2);
    }

    #[test]
    fn test_price_is_monotonically_non_increasing() {
        let schedule = drop_schedule();
        let mut previous = schedule.price_at(0);
        for elapsed in (0..20_000_000).step_by(13_337) {
            let price = schedule.price_at(elapsed);
            assert!(price <= previous, "price rose at t={elapsed}");
            assert!(price >= schedule.floor_lamports);
            previous = price;
        }
    }

    #[test]
    fn test_countdown_to_next_decrease() {
        let schedule = drop_schedule();
        assert_eq!(schedule.countdown_ms(0), 60_000);
        assert_eq!(schedule.countdown_ms(1_000), 59_000);
        assert_eq!(schedule.countdown_ms(60_000), 60_000);
        assert_eq!(schedule.countdown_ms(61_500), 58_500);
    }

    #[test]
    fn test_reset_restores_starting_price() {
        let mut auction = Auction::new(drop_schedule(), 0);
        assert_eq!(auction.current_price(120_000), 2_940_000_000);
        auction.reset(120_000);
        assert_eq!(auction.current_price(120_000), 3 * LAMPORTS_PER_SOL);
        assert_eq!(auction.last_reset_ms(), 120_000);
    }

    #[test]
    fn test_adopt_remote_reset_only_moves_forward() {
        let mut auction = Auction::new(drop_schedule(), 100_000);
        assert!(!auction.adopt_remote_reset(90_000));
        assert_eq!(auction.last_reset_ms(), 100_000);
        assert!(auction.adopt_remote_reset(150_000));
        assert_eq!(auction.last_reset_ms(), 150_000);
    }

    #[test]
    fn test_future_reset_reads_as_starting_price() {
        let auction = Auction::new(drop_schedule(), 500_000);
        // local clock behind the remote timestamp
        assert_eq!(auction.current_price(400_000), 3 * LAMPORTS_PER_SOL);
    }
}
