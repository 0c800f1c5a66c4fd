//! Effective-availability computation for equipment.
//!
//! Availability is never stored: it is recomputed per request as the
//! equipment's total quantity minus the units reserved by ACTIVE rentals
//! whose date range overlaps the window of interest. Every caller goes
//! through the same window predicate — the read path asks about the current
//! instant, rental creation asks about the requested range — so the list,
//! search and booking paths can never disagree on what "currently rented"
//! means.

use chrono::{DateTime, Utc};

use crate::models::rental::{FutureRental, Rental};

/// Time window a reservation is checked against. An open `end` means
/// "from `start` onwards".
#[derive(Debug, Clone, Copy)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl Window {
    /// Instantaneous window, used by the read paths
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            start: instant,
            end: Some(instant),
        }
    }

    /// Requested rental range, used by the creation check
    pub fn range(start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Self {
        Self { start, end }
    }
}

/// Whether a rental's date range overlaps the window. Open end dates are
/// unbounded on both sides.
pub fn overlaps(window: &Window, rental: &Rental) -> bool {
    let starts_in_time = match window.end {
        Some(end) => rental.start_date <= end,
        None => true,
    };
    let ends_in_time = match rental.end_date {
        Some(end) => end >= window.start,
        None => true,
    };
    starts_in_time && ends_in_time
}

/// Units reserved within the window. Callers pass ACTIVE rentals only;
/// COMPLETED and CANCELLED rentals free their quantity by not being here.
pub fn reserved_quantity(rentals: &[Rental], window: &Window) -> i64 {
    rentals
        .iter()
        .filter(|rental| overlaps(window, rental))
        .map(|rental| rental.quantity as i64)
        .sum()
}

/// Units still available out of `total`, clamped at zero
pub fn available_quantity(total: i32, reserved: i64) -> i32 {
    (total as i64 - reserved).max(0) as i32
}

/// ACTIVE rentals that have not started yet, ascending by start date
pub fn future_rentals(rentals: &[Rental], now: DateTime<Utc>) -> Vec<FutureRental> {
    let mut future: Vec<FutureRental> = rentals
        .iter()
        .filter(|rental| rental.start_date > now)
        .map(|rental| FutureRental {
            start_date: rental.start_date,
            end_date: rental.end_date,
            quantity: rental.quantity,
        })
        .collect();
    future.sort_by_key(|rental| rental.start_date);
    future
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::RentalStatus;
    use chrono::{Duration, TimeZone};

    fn instant(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap()
    }

    fn rental(quantity: i32, start: DateTime<Utc>, end: Option<DateTime<Utc>>) -> Rental {
        Rental {
            id: 1,
            customer_id: 1,
            equipment_id: 1,
            quantity,
            start_date: start,
            end_date: end,
            status: RentalStatus::Active,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn no_rentals_means_full_quantity() {
        let now = instant(10);
        let reserved = reserved_quantity(&[], &Window::at(now));
        assert_eq!(reserved, 0);
        assert_eq!(available_quantity(5, reserved), 5);
    }

    #[test]
    fn current_rentals_reduce_availability() {
        let now = instant(10);
        let rentals = vec![
            rental(3, instant(1), Some(instant(20))),
            rental(1, instant(5), None),
        ];
        let reserved = reserved_quantity(&rentals, &Window::at(now));
        assert_eq!(reserved, 4);
        assert_eq!(available_quantity(5, reserved), 1);
    }

    #[test]
    fn open_ended_rental_never_expires() {
        let now = instant(28);
        let rentals = vec![rental(2, instant(1), None)];
        assert_eq!(reserved_quantity(&rentals, &Window::at(now)), 2);
    }

    #[test]
    fn ended_rental_frees_stock() {
        let now = instant(10);
        let rentals = vec![rental(3, instant(1), Some(instant(9)))];
        assert_eq!(reserved_quantity(&rentals, &Window::at(now)), 0);
        assert_eq!(available_quantity(5, 0), 5);
    }

    #[test]
    fn future_rental_not_counted_now_but_counted_in_its_range() {
        let now = instant(10);
        let rentals = vec![rental(2, instant(15), Some(instant(20)))];
        assert_eq!(reserved_quantity(&rentals, &Window::at(now)), 0);

        let requested = Window::range(instant(14), Some(instant(16)));
        assert_eq!(reserved_quantity(&rentals, &requested), 2);
    }

    #[test]
    fn boundary_instants_overlap() {
        let now = instant(10);
        // ends exactly now / starts exactly now
        let rentals = vec![
            rental(1, instant(1), Some(now)),
            rental(1, now, Some(instant(20))),
        ];
        assert_eq!(reserved_quantity(&rentals, &Window::at(now)), 2);
    }

    #[test]
    fn open_requested_range_collides_with_everything_later() {
        let rentals = vec![rental(2, instant(15), Some(instant(20)))];
        let requested = Window::range(instant(1), None);
        assert_eq!(reserved_quantity(&rentals, &requested), 2);
    }

    #[test]
    fn availability_clamps_at_zero() {
        assert_eq!(available_quantity(2, 5), 0);
    }

    #[test]
    fn future_rentals_sorted_ascending() {
        let now = instant(10);
        let rentals = vec![
            rental(1, instant(20), None),
            rental(2, instant(12), Some(instant(14))),
            rental(3, instant(1), Some(instant(11) + Duration::days(30))),
        ];
        let future = future_rentals(&rentals, now);
        assert_eq!(future.len(), 2);
        assert_eq!(future[0].quantity, 2);
        assert_eq!(future[1].quantity, 1);
    }
}
