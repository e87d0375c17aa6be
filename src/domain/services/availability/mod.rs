//! Availability decisions for table requests.
//!
//! `check_slot` resolves a ceiling in strict precedence and then compares it
//! with the committed headcount:
//!
//! 1. exception date: closed rejects, an explicit capacity becomes the ceiling
//!    and skips steps 2 and 3;
//! 2. the weekly schedule rule covering the time (overlap is a configuration
//!    conflict);
//! 3. the seasonal multiplier on the rule's capacity;
//! 4. occupancy: admit iff `occupancy + party_size <= ceiling`.
//!
//! Every read goes through a caller-supplied source, so the lock mode and the
//! transaction are explicit at each call site.

pub mod exceptions;
pub mod occupancy;
pub mod rules;
pub mod seasons;
pub mod slots;

#[cfg(test)]
pub(crate) mod fake;

use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use tracing::{debug, info, warn};
use crate::domain::models::booking::Booking;
use crate::domain::ports::{AvailabilitySource, AvailabilityStore, LockMode};
use crate::error::AppError;

pub const DEFAULT_REFERENCE_PARTY_SIZE: i32 = 2;

pub struct AvailabilityService {
    store: Arc<dyn AvailabilityStore>,
    slot_interval_min: i64,
    reference_party_size: i32,
}

impl AvailabilityService {
    pub fn new(store: Arc<dyn AvailabilityStore>, slot_interval_min: i64, reference_party_size: i32) -> Self {
        Self { store, slot_interval_min, reference_party_size }
    }

    pub fn reference_party_size(&self) -> i32 {
        self.reference_party_size
    }

    /// Whether a party of `party_size` can be seated at `time` on `date`.
    ///
    /// `LockMode::Exclusive` must only be used on a session that will also
    /// carry the booking insert; see [`AvailabilityService::book`].
    pub async fn check_slot<S>(
        &self,
        source: &mut S,
        restaurant_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
        lock: LockMode,
    ) -> Result<bool, AppError>
    where
        S: AvailabilitySource + ?Sized,
    {
        if party_size <= 0 {
            return Err(AppError::Validation(format!("Party size must be positive, got {}", party_size)));
        }

        let exception = exceptions::resolve_exception(source, restaurant_id, date, lock).await?;
        if let Some(ref e) = exception {
            if e.is_closed {
                debug!(restaurant_id, %date, reason = %e.reason, "rejected: closed by exception");
                return Ok(false);
            }
            if let Some(capacity) = e.capacity {
                return occupancy::admits(source, restaurant_id, date, time, party_size, capacity).await;
            }
        }

        let Some(rule) = rules::resolve_rule(source, restaurant_id, date, Some(time), lock).await? else {
            debug!(restaurant_id, %date, %time, "rejected: no schedule rule");
            return Ok(false);
        };
        if !rule.is_available {
            return Ok(false);
        }

        let ceiling = seasons::resolve_multiplier(source, restaurant_id, date, rule.capacity).await?;
        occupancy::admits(source, restaurant_id, date, time, party_size, ceiling).await
    }

    /// Open slots of the day for a party of the reference size, in time order.
    pub async fn day_slots<S>(
        &self,
        source: &mut S,
        restaurant_id: &str,
        date: NaiveDate,
    ) -> Result<Vec<NaiveTime>, AppError>
    where
        S: AvailabilitySource + ?Sized,
    {
        // Server settings, not caller input.
        if self.slot_interval_min <= 0 || self.reference_party_size <= 0 {
            return Err(AppError::InternalWithMsg(format!(
                "invalid availability settings: slot interval {} min, reference party size {}",
                self.slot_interval_min, self.reference_party_size
            )));
        }

        let exception = exceptions::resolve_exception(source, restaurant_id, date, LockMode::Shared).await?;
        if exception.is_some_and(|e| e.is_closed) {
            return Ok(Vec::new());
        }

        let Some(rule) = rules::resolve_rule(source, restaurant_id, date, None, LockMode::Shared).await? else {
            return Ok(Vec::new());
        };
        if !rule.is_available {
            return Ok(Vec::new());
        }

        let candidates = slots::enumerate_slots(date, rule.start_time, rule.end_time, self.slot_interval_min)?;
        let mut open = Vec::with_capacity(candidates.len());
        for slot in candidates {
            if self.check_slot(source, restaurant_id, date, slot, self.reference_party_size, LockMode::Shared).await? {
                open.push(slot);
            }
        }
        Ok(open)
    }

    /// Read-only preview of one slot on a fresh session.
    pub async fn is_available(
        &self,
        restaurant_id: &str,
        date: NaiveDate,
        time: NaiveTime,
        party_size: i32,
    ) -> Result<bool, AppError> {
        let mut session = self.store.begin().await?;
        self.check_slot(session.as_mut(), restaurant_id, date, time, party_size, LockMode::Shared).await
    }

    /// Read-only preview of the whole day on a fresh session.
    pub async fn available_slots(&self, restaurant_id: &str, date: NaiveDate) -> Result<Vec<NaiveTime>, AppError> {
        let mut session = self.store.begin().await?;
        self.day_slots(session.as_mut(), restaurant_id, date).await
    }

    /// Admits and stores a booking atomically.
    ///
    /// The availability check runs with exclusive locks on the same session as
    /// the insert, so concurrent requests for the slot cannot both pass the
    /// check and overshoot the ceiling.
    pub async fn book(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut session = self.store.begin().await?;

        let admitted = self.check_slot(
            session.as_mut(),
            &booking.restaurant_id,
            booking.date,
            booking.time,
            booking.party_size,
            LockMode::Exclusive,
        ).await?;

        if !admitted {
            warn!(restaurant_id = %booking.restaurant_id, date = %booking.date, time = %booking.time, party_size = booking.party_size, "booking rejected: no availability");
            return Err(AppError::Unavailable(
                "No availability for this date and time, or the restaurant is closed".into()
            ));
        }

        let created = session.insert_booking(booking).await?;
        session.commit().await?;
        info!(booking_id = %created.id, restaurant_id = %created.restaurant_id, "booking admitted");
        Ok(created)
    }
}
