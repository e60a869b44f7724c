//! Reservations, including the public booking page

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReservationSource {
    Chat,
    Web,
    Manual,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    pub service: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub requests: Option<String>,
    pub status: ReservationStatus,
    pub source: ReservationSource,
    pub created_at: String,
}

/// Filters for `GET /reservations`
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReservationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ReservationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

/// Form field rendered on the public booking page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingField {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlot {
    pub date: String,
    pub times: Vec<String>,
}

/// `GET /public/reservation/:slug`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicReservationPage {
    pub brand_name: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<BookingField>,
    #[serde(default)]
    pub available_slots: Vec<AvailableSlot>,
}

/// Booking submitted by a customer through the public page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicReservationRequest {
    pub customer_name: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub service: String,
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicReservationCreated {
    pub message: String,
    pub reservation_id: i64,
}
