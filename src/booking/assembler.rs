//! Сборка итогового запроса бронирования.
//!
//! Запускается, когда у каждого выбранного места назначен пол. Считает сумму
//! и формирует тройки для POST /ticket/generate. Никаких побочных эффектов:
//! сетевая отправка — забота сервисного слоя.

use super::error::BookingError;
use super::selection::SelectionState;
use serde::Serialize;

// Одна тройка payload'а /ticket/generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "busId")]
    pub bus_id: String,
    #[serde(rename = "seatNumber")]
    pub seat_number: String,
}

/// Готовый запрос бронирования: тройки в порядке выбора и сумма к оплате.
/// Тариф целочисленный, без дробных единиц — округления не возникает.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingRequest {
    pub tickets: Vec<TicketRequest>,
    pub amount: i64,
}

/// Собирает запрос из завершённого выбора.
pub fn assemble(
    selection: &SelectionState,
    fare_per_seat: i64,
    user_id: &str,
    bus_id: &str,
) -> Result<BookingRequest, BookingError> {
    if selection.is_empty() {
        return Err(BookingError::EmptySelection);
    }

    let missing: Vec<String> = selection
        .selected_seats()
        .iter()
        .filter(|s| s.gender.is_none())
        .map(|s| s.seat_number.clone())
        .collect();
    if !missing.is_empty() {
        return Err(BookingError::IncompleteGenderAssignment(missing));
    }

    let tickets = selection
        .selected_seats()
        .iter()
        .map(|s| TicketRequest {
            user_id: user_id.to_string(),
            bus_id: bus_id.to_string(),
            seat_number: s.seat_number.clone(),
        })
        .collect();

    Ok(BookingRequest {
        tickets,
        amount: selection.len() as i64 * fare_per_seat,
    })
}
