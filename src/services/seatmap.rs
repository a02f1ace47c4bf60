//! Загрузка данных для экрана выбора мест.
//!
//! Экран не готов, пока не завершились обе загрузки: рейс и билеты
//! пользователя. Занятость мест — объединение флагов рейса и мест,
//! занятых неотменёнными билетами этого рейса. При любом сбое схема
//! салона не строится вовсе, частичная раскладка наружу не отдаётся.

use super::FlowError;
use crate::api_client::BackendClient;
use crate::booking::{BookingSession, SeatLayout};
use tracing::info;

#[derive(Clone)]
pub struct SeatMapService {
    api: BackendClient,
}

impl SeatMapService {
    pub fn new(api: BackendClient) -> Self {
        Self { api }
    }

    /// Загружает рейс и билеты, сливает занятость и строит сессию
    /// бронирования. До возврата этой функции переключать места нечем.
    pub async fn load(&self, bus_id: &str, user_id: &str) -> Result<BookingSession, FlowError> {
        let (bus, tickets) = futures::try_join!(
            self.api.get_bus(bus_id),
            self.api.get_user_tickets(user_id)
        )?;

        let booked = tickets.booked_seats_for(&bus.id);
        let mut seats = bus.seats;
        for seat in &mut seats {
            if booked.contains(&seat.seat_number) {
                seat.booked = true;
            }
        }

        let layout = SeatLayout::build(&seats)?;
        let booked_total = layout.seats().filter(|s| s.booked).count();
        info!(
            "Seat map ready for bus {}: {} seats, {} booked",
            bus.id,
            layout.len(),
            booked_total
        );

        Ok(BookingSession::new(
            bus.id,
            user_id,
            bus.fare.actual_price,
            layout,
        ))
    }
}
