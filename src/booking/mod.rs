//! Ядро бронирования: схема салона, выбор мест, правило однополого
//! соседства и сборка итогового запроса.
//!
//! Всё ядро — чистые функции над явными значениями, пригодные для юнит-тестов
//! без рендеринга. Жизненный цикл места в рамках одной сессии:
//! свободно -> выбрано без пола -> выбрано с полом -> (отправка) выкуплено;
//! повторное переключение на любом шаге возвращает место в "свободно".

pub mod assembler;
pub mod error;
pub mod gender;
pub mod layout;
pub mod selection;

pub use assembler::{assemble, BookingRequest, TicketRequest};
pub use error::BookingError;
pub use gender::{assign_gender, neighbors};
pub use layout::{PlacedSeat, SeatLayout};
pub use selection::{SelectedSeat, SelectionState};

use crate::models::Gender;
use tracing::debug;

/// Сессия бронирования одного экрана. Владеет схемой салона и текущим
/// выбором; уничтожается при уходе с экрана, при возврате строится заново
/// из свежей загрузки. Между сессиями ничего не кэшируется.
#[derive(Debug, Clone)]
pub struct BookingSession {
    bus_id: String,
    user_id: String,
    fare_per_seat: i64,
    layout: SeatLayout,
    selection: SelectionState,
}

impl BookingSession {
    pub fn new(
        bus_id: impl Into<String>,
        user_id: impl Into<String>,
        fare_per_seat: i64,
        layout: SeatLayout,
    ) -> Self {
        Self {
            bus_id: bus_id.into(),
            user_id: user_id.into(),
            fare_per_seat,
            layout,
            selection: SelectionState::new(),
        }
    }

    pub fn bus_id(&self) -> &str {
        &self.bus_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn fare_per_seat(&self) -> i64 {
        self.fare_per_seat
    }

    pub fn layout(&self) -> &SeatLayout {
        &self.layout
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Переключает место по номеру. Неизвестные и выкупленные места
    /// игнорируются. Возвращает, изменился ли выбор.
    pub fn toggle(&mut self, seat_number: &str) -> bool {
        let Some(seat) = self.layout.seat(seat_number) else {
            debug!("toggle ignored for unknown seat {}", seat_number);
            return false;
        };
        let next = self.selection.toggle(seat);
        let changed = next != self.selection;
        self.selection = next;
        changed
    }

    /// Назначает пол выбранному месту; при конфликте выбор не меняется.
    pub fn assign_gender(&mut self, seat_number: &str, gender: Gender) -> Result<(), BookingError> {
        self.selection = assign_gender(&self.selection, &self.layout, seat_number, gender)?;
        Ok(())
    }

    /// Собирает запрос бронирования из текущего выбора.
    pub fn assemble(&self) -> Result<BookingRequest, BookingError> {
        assemble(
            &self.selection,
            self.fare_per_seat,
            &self.user_id,
            &self.bus_id,
        )
    }
}
