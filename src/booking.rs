use crate::api::{BookingAnalysis, BookingRecord, BookingRequest, CreateBookingResponse, Transport};
use crate::app::{App, Level, UiSignal};
use crate::error::{RestavoError, Result};
use crate::pricing::placeholder_image_url;
use chrono::NaiveDate;

/// A booking the user asked for, validated but not yet submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingIntent {
    pub hotel_name: String,
    pub city: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub price: f64,
}

impl BookingIntent {
    pub fn new(
        hotel_name: impl Into<String>,
        city: impl Into<String>,
        check_in: NaiveDate,
        check_out: NaiveDate,
        price: f64,
    ) -> Result<Self> {
        let intent = Self {
            hotel_name: hotel_name.into(),
            city: city.into(),
            check_in,
            check_out,
            price,
        };
        intent.validate()?;
        Ok(intent)
    }

    fn validate(&self) -> Result<()> {
        if self.hotel_name.trim().is_empty() || self.city.trim().is_empty() {
            return Err(RestavoError::Validation(
                "A booking needs a hotel and a city.".to_string(),
            ));
        }
        if self.check_out <= self.check_in {
            return Err(RestavoError::Validation(format!(
                "Check-out ({}) must be after check-in ({}).",
                self.check_out, self.check_in
            )));
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(RestavoError::Validation(
                "The price must be a positive number.".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_request(&self) -> BookingRequest {
        BookingRequest {
            hotel_name: self.hotel_name.clone(),
            city: self.city.clone(),
            check_in: self.check_in.format("%Y-%m-%d").to_string(),
            check_out: self.check_out.format("%Y-%m-%d").to_string(),
            price: self.price,
            hotel_image_url: Some(placeholder_image_url(&self.city)),
        }
    }
}

/// Single slot for a booking deferred until sign-in. Storing again overwrites
/// (last write wins); it is not a queue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PendingAction {
    slot: Option<BookingIntent>,
}

impl PendingAction {
    pub fn get(&self) -> Option<&BookingIntent> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub(crate) fn store(&mut self, intent: BookingIntent) {
        if let Some(previous) = self.slot.replace(intent) {
            tracing::debug!(hotel = %previous.hotel_name, "Pending booking overwritten");
        }
    }

    pub(crate) fn take(&mut self) -> Option<BookingIntent> {
        self.slot.take()
    }
}

#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Submitted(CreateBookingResponse),
    /// Stored in the pending slot; will be submitted after the next successful login.
    Deferred,
    /// The server refused the booking; an error notification has been queued.
    Rejected,
}

impl<T: Transport> App<T> {
    /// Submit now if signed in, otherwise park the intent and ask for a login.
    pub async fn attempt_booking(&mut self, intent: BookingIntent) -> Result<BookingOutcome> {
        if !self.session.is_authenticated() {
            tracing::info!(hotel = %intent.hotel_name, "Deferring booking until login");
            self.pending.store(intent);
            self.signal(UiSignal::PromptLogin);
            self.notify(Level::Info, "Please sign in or create an account to finish your booking.");
            return Ok(BookingOutcome::Deferred);
        }

        match self.submit_booking(&intent).await {
            Ok(response) => Ok(BookingOutcome::Submitted(response)),
            Err(e) => {
                self.report_booking_failure(&intent, &e);
                Ok(BookingOutcome::Rejected)
            }
        }
    }

    /// Submit the pending booking, if any. The slot is emptied whatever the outcome and
    /// a failed replay is reported, not retried.
    pub async fn replay_if_pending(&mut self) -> bool {
        let Some(intent) = self.pending.take() else {
            return false;
        };

        self.notify(
            Level::Info,
            format!("Completing your booking at {}...", intent.hotel_name),
        );
        if let Err(e) = self.submit_booking(&intent).await {
            self.report_booking_failure(&intent, &e);
        }
        true
    }

    fn report_booking_failure(&mut self, intent: &BookingIntent, error: &RestavoError) {
        tracing::warn!(hotel = %intent.hotel_name, error = %error, "Booking failed");
        let reason = match error {
            RestavoError::ServerRejected { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.notify(Level::Error, format!("Booking failed: {}", reason));
    }

    async fn submit_booking(&mut self, intent: &BookingIntent) -> Result<CreateBookingResponse> {
        let response = self.client.create_booking(&intent.to_request()).await?;

        let name = self
            .session
            .user()
            .map(|u| u.display_name())
            .unwrap_or_default();
        tracing::info!(
            hotel = %intent.hotel_name,
            user_id = ?self.session.user_id(),
            booking_id = ?response.booking_id,
            "Booking confirmed"
        );
        self.notify(
            Level::Success,
            format!(
                "Your booking at {} is confirmed, {}!",
                intent.hotel_name, name
            ),
        );
        Ok(response)
    }

    pub async fn list_bookings(&mut self) -> Result<Vec<BookingRecord>> {
        self.require_session("sign in to see your bookings")?;
        self.client.bookings().await
    }

    /// Cancel on the server, then return the refetched list.
    pub async fn cancel_booking(&mut self, booking_id: i64) -> Result<Vec<BookingRecord>> {
        self.require_session("sign in to manage your bookings")?;

        let response = self.client.cancel_booking(booking_id).await?;
        tracing::info!(booking_id, "Booking cancelled");
        if !response.message.is_empty() {
            self.notify(Level::Success, response.message);
        }
        self.client.bookings().await
    }

    pub async fn analyze_booking(&mut self, booking_id: i64) -> Result<BookingAnalysis> {
        self.require_session("sign in to analyze your bookings")?;
        self.client.analyze_booking(booking_id).await
    }

    fn require_session(&mut self, reason: &str) -> Result<()> {
        if self.session.is_authenticated() {
            return Ok(());
        }
        self.signal(UiSignal::PromptLogin);
        Err(RestavoError::AuthRequired(reason.to_string()))
    }
}
