//! Weekly slot grid.
//!
//! Slots are visited day by day from Monday, and within a day from 00:00
//! to 03:00. The order drives both load balancing and when a member's
//! rotation cycle wipes, so it is part of the contract.

use chrono::{Duration, NaiveDate};

use crate::models::{NightHour, SlotKey};

/// All slot keys for `duty_days` days starting at `week_start`, in
/// evaluation order.
pub fn slot_grid(week_start: NaiveDate, duty_days: u8) -> Vec<SlotKey> {
    (0..i64::from(duty_days))
        .map(|offset| week_start + Duration::days(offset))
        .flat_map(|date| NightHour::ALL.into_iter().map(move |hour| SlotKey::new(date, hour)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
    }

    #[test]
    fn test_default_grid_order() {
        let grid = slot_grid(monday(), 5);
        assert_eq!(grid.len(), 20);
        assert_eq!(grid[0], SlotKey::new(monday(), NightHour::H00));
        assert_eq!(grid[3], SlotKey::new(monday(), NightHour::H03));
        assert_eq!(
            grid[4],
            SlotKey::new(monday() + Duration::days(1), NightHour::H00)
        );
        assert_eq!(
            grid[19],
            SlotKey::new(monday() + Duration::days(4), NightHour::H03)
        );
        assert!(grid.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_zero_days() {
        assert!(slot_grid(monday(), 0).is_empty());
    }
}
