//! Reservation client methods

use serde_json::json;

use super::{ApiClient, ApiRequest};
use crate::error::ClientError;
use crate::types::reservation::PublicReservationCreated;
use crate::types::{
    Paginated, PublicReservationPage, PublicReservationRequest, Reservation, ReservationQuery,
    ReservationStatus,
};

impl ApiClient {
    /// List reservations, one page at a time
    pub async fn list_reservations(
        &self,
        query: &ReservationQuery,
    ) -> Result<Paginated<Reservation>, ClientError> {
        self.execute(ApiRequest::get("/reservations").query(query)?)
            .await
    }

    pub async fn get_reservation(&self, id: i64) -> Result<Reservation, ClientError> {
        self.execute(ApiRequest::get(format!("/reservations/{id}")))
            .await
    }

    pub async fn update_reservation_status(
        &self,
        id: i64,
        status: ReservationStatus,
    ) -> Result<Reservation, ClientError> {
        let request = ApiRequest::patch(format!("/reservations/{id}/status"))
            .json(&json!({ "status": status }))?;
        self.execute(request).await
    }

    pub async fn add_reservation_note(
        &self,
        id: i64,
        note: &str,
    ) -> Result<Reservation, ClientError> {
        let request =
            ApiRequest::post(format!("/reservations/{id}/notes")).json(&json!({ "note": note }))?;
        self.execute(request).await
    }

    /// Public booking page of a business (no session required)
    pub async fn public_reservation_page(
        &self,
        slug: &str,
    ) -> Result<PublicReservationPage, ClientError> {
        self.execute(ApiRequest::get(format!("/public/reservation/{slug}")))
            .await
    }

    /// Submit a booking through the public page (no session required)
    pub async fn create_public_reservation(
        &self,
        slug: &str,
        reservation: &PublicReservationRequest,
    ) -> Result<PublicReservationCreated, ClientError> {
        let request = ApiRequest::post(format!("/public/reservation/{slug}")).json(reservation)?;
        self.execute(request).await
    }
}
