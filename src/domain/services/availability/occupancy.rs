use chrono::{NaiveDate, NaiveTime};
use tracing::debug;
use crate::domain::ports::OccupancySource;
use crate::error::AppError;

/// Headcount already committed to the slot. Never negative; no bookings sums to 0.
pub async fn current_occupancy<S>(
    source: &mut S,
    restaurant_id: &str,
    date: NaiveDate,
    time: NaiveTime,
) -> Result<i64, AppError>
where
    S: OccupancySource + ?Sized,
{
    let occupancy = source.committed_headcount(restaurant_id, date, time).await?;
    Ok(occupancy.max(0))
}

/// The admission predicate: a party fits only as a whole.
pub fn fits(occupancy: i64, party_size: i32, ceiling: i32) -> bool {
    occupancy + i64::from(party_size) <= i64::from(ceiling)
}

pub async fn admits<S>(
    source: &mut S,
    restaurant_id: &str,
    date: NaiveDate,
    time: NaiveTime,
    party_size: i32,
    ceiling: i32,
) -> Result<bool, AppError>
where
    S: OccupancySource + ?Sized,
{
    let occupancy = current_occupancy(source, restaurant_id, date, time).await?;
    let admitted = fits(occupancy, party_size, ceiling);
    debug!(restaurant_id, %date, %time, occupancy, party_size, ceiling, admitted, "occupancy check");
    Ok(admitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use crate::domain::models::booking::{Booking, BookingStatus, NewBookingParams};
    use crate::domain::services::availability::fake::{at, monday, FakeStore};

    fn booking(party_size: i32, status: BookingStatus) -> Booking {
        let mut b = Booking::new(NewBookingParams {
            restaurant_id: "r1".into(),
            date: monday(),
            time: at(19, 30),
            party_size,
            name: "Guest".into(),
            email: "guest@example.com".into(),
            phone: None,
            special_requests: None,
        });
        b.status = status.as_str().to_string();
        b
    }

    #[tokio::test]
    async fn test_empty_slot_is_zero() {
        let mut store = FakeStore::default();
        assert_eq!(current_occupancy(&mut store, "r1", monday(), at(19, 30)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_and_completed_do_not_count() {
        let mut store = FakeStore {
            bookings: vec![
                booking(10, BookingStatus::Confirmed),
                booking(10, BookingStatus::Cancelled),
                booking(3, BookingStatus::Pending),
                booking(4, BookingStatus::Completed),
            ],
            ..Default::default()
        };
        assert_eq!(current_occupancy(&mut store, "r1", monday(), at(19, 30)).await.unwrap(), 13);
        assert_eq!(current_occupancy(&mut store, "r1", monday(), at(20, 0)).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_admits_at_exact_ceiling() {
        let mut store = FakeStore { bookings: vec![booking(6, BookingStatus::Confirmed)], ..Default::default() };
        assert!(admits(&mut store, "r1", monday(), at(19, 30), 4, 10).await.unwrap());
        assert!(!admits(&mut store, "r1", monday(), at(19, 30), 5, 10).await.unwrap());
    }

    proptest! {
        #[test]
        fn prop_fits_iff_total_within_ceiling(occupancy in 0i64..10_000, party in 1i32..500, ceiling in 0i32..10_000) {
            prop_assert_eq!(fits(occupancy, party, ceiling), occupancy + party as i64 <= ceiling as i64);
        }

        #[test]
        fn prop_equality_admits(occupancy in 0i32..1_000, party in 1i32..100) {
            prop_assert!(fits(occupancy as i64, party, occupancy + party));
            prop_assert!(!fits(occupancy as i64 + 1, party, occupancy + party));
        }
    }
}
