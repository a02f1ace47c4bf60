//! Правило однополого соседства.
//!
//! Два места одной физической пары не могут достаться пассажирам разного
//! пола. Пара определяется схемой салона, а не отрисовкой: в средней секции
//! парой считаются два места одной стороны ряда, передний ряд образует одну
//! пару, в заднем ряду соседями считаются примыкающие по порядку места (их
//! может быть два). Проверка выполняется в момент назначения пола; состояние
//! соседа перечитывается заново при каждом вызове, задним числом ничего не
//! пересматривается.

use super::error::BookingError;
use super::layout::{MiddleRow, PlacedSeat, SeatLayout};
use super::selection::SelectionState;
use crate::models::Gender;
use tracing::debug;

/// Соседи места в его физической паре.
pub fn neighbors<'a>(layout: &'a SeatLayout, seat_number: &str) -> Vec<&'a PlacedSeat> {
    if let Some(found) = pair_neighbor(&layout.front_row, seat_number) {
        return found;
    }
    for row in &layout.middle_rows {
        if let Some(found) = side_neighbor(row, seat_number) {
            return found;
        }
    }
    if let Some(pos) = layout.back_row.iter().position(|s| s.number == seat_number) {
        let mut found = Vec::new();
        if pos > 0 {
            found.push(&layout.back_row[pos - 1]);
        }
        if pos + 1 < layout.back_row.len() {
            found.push(&layout.back_row[pos + 1]);
        }
        return found;
    }
    Vec::new()
}

// Передний ряд — одна пара: соседи места — все остальные места ряда.
fn pair_neighbor<'a>(row: &'a [PlacedSeat], seat_number: &str) -> Option<Vec<&'a PlacedSeat>> {
    if !row.iter().any(|s| s.number == seat_number) {
        return None;
    }
    Some(row.iter().filter(|s| s.number != seat_number).collect())
}

// В средней секции пара — два места одной стороны ряда.
fn side_neighbor<'a>(row: &'a MiddleRow, seat_number: &str) -> Option<Vec<&'a PlacedSeat>> {
    for side in [&row.left, &row.right] {
        if side.iter().any(|s| s.number == seat_number) {
            return Some(side.iter().filter(|s| s.number != seat_number).collect());
        }
    }
    None
}

/// Назначает пол выбранному месту, если это не нарушает однополость пары.
///
/// Пол соседа берётся из записи рейса для выкупленных мест и из текущего
/// выбора для выбранных; пустое или неназначенное место ограничений не даёт.
/// При конфликте возвращается требуемый пол, состояние не меняется.
pub fn assign_gender(
    selection: &SelectionState,
    layout: &SeatLayout,
    seat_number: &str,
    gender: Gender,
) -> Result<SelectionState, BookingError> {
    if !selection.is_selected(seat_number) {
        return Err(BookingError::SeatNotSelected(seat_number.to_string()));
    }

    for neighbor in neighbors(layout, seat_number) {
        let occupied = if neighbor.booked {
            neighbor.gender
        } else {
            selection.gender_of(&neighbor.number)
        };
        if let Some(required) = occupied {
            if required != gender {
                debug!(
                    "gender conflict on {}: neighbor {} is {}",
                    seat_number, neighbor.number, required
                );
                return Err(BookingError::GenderConflict {
                    seat_number: seat_number.to_string(),
                    required,
                });
            }
        }
    }

    selection
        .with_gender(seat_number, gender)
        .ok_or_else(|| BookingError::SeatNotSelected(seat_number.to_string()))
}
