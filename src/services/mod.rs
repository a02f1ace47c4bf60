pub mod checkout;
pub mod seatmap;

pub use checkout::{CheckoutService, PaymentContext};
pub use seatmap::SeatMapService;

use crate::api_client::ApiError;
use crate::booking::BookingError;
use thiserror::Error;

// Ошибка сквозного сценария: либо сеть/бэкенд, либо доменная валидация.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Booking(#[from] BookingError),
}
