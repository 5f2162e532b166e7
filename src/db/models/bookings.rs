//! Database models for bookings.

use crate::api::models::bookings::BookingStatus;
use crate::types::{BookingId, ResourceId, UserId};
use chrono::{DateTime, Utc};

/// Database request for creating a new booking.
///
/// The status is not part of the request: bookings always start out PENDING.
#[derive(Debug, Clone)]
pub struct BookingCreateDBRequest {
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub purpose: Option<String>,
}

/// Database request for a status transition.
///
/// The repository applies this unconditionally; the handler is responsible for
/// validating the transition against the current status and the acting user.
#[derive(Debug, Clone)]
pub struct BookingTransitionDBRequest {
    pub status: BookingStatus,
    pub approver_id: Option<UserId>,
}

/// Filter for listing bookings.
///
/// `user_id` is set by the handler for non-admin callers so they only ever see
/// their own bookings.
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<UserId>,
    pub status: Option<BookingStatus>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct BookingDBResponse {
    pub id: BookingId,
    pub resource_id: ResourceId,
    pub user_id: UserId,
    pub approver_id: Option<UserId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub purpose: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
