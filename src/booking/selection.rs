//! Состояние выбора мест одной сессии бронирования.
//!
//! Переходы чистые: `toggle` и `with_gender` возвращают новое состояние,
//! прежнее остаётся нетронутым. Сессия экрана владеет текущим значением и
//! подменяет его после успешного перехода; никакого глобального состояния.

use super::layout::PlacedSeat;
use crate::models::Gender;
use tracing::debug;

/// Выбранное, но ещё не выкупленное место. Пол назначается отдельным шагом
/// и до этого момента остаётся пустым.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSeat {
    pub seat_number: String,
    pub ordinal: u32,
    pub gender: Option<Gender>,
}

/// Набор выбранных мест. Порядок — порядок выбора пользователем, не порядок
/// мест в салоне. Ограничения на количество выбранных мест нет.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    seats: Vec<SelectedSeat>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Переключает место: невыбранное добавляется с пустым полом, выбранное
    /// убирается целиком вместе с назначенным полом. Выкупленное место
    /// неизменяемо — возврат без изменений.
    pub fn toggle(&self, seat: &PlacedSeat) -> SelectionState {
        if seat.booked {
            debug!("toggle ignored for booked seat {}", seat.number);
            return self.clone();
        }

        let mut next = self.clone();
        match next.seats.iter().position(|s| s.seat_number == seat.number) {
            Some(pos) => {
                next.seats.remove(pos);
            }
            None => next.seats.push(SelectedSeat {
                seat_number: seat.number.clone(),
                ordinal: seat.ordinal,
                gender: None,
            }),
        }
        next
    }

    pub fn is_selected(&self, seat_number: &str) -> bool {
        self.seats.iter().any(|s| s.seat_number == seat_number)
    }

    /// Выбранные места в порядке выбора.
    pub fn selected_seats(&self) -> &[SelectedSeat] {
        &self.seats
    }

    /// Назначенный в текущем выборе пол места, если есть.
    pub fn gender_of(&self, seat_number: &str) -> Option<Gender> {
        self.seats
            .iter()
            .find(|s| s.seat_number == seat_number)
            .and_then(|s| s.gender)
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Новое состояние с назначенным полом места. None, если место не выбрано.
    /// Проверка совместимости с соседями — на вызывающей стороне.
    pub(crate) fn with_gender(&self, seat_number: &str, gender: Gender) -> Option<SelectionState> {
        let pos = self
            .seats
            .iter()
            .position(|s| s.seat_number == seat_number)?;
        let mut next = self.clone();
        next.seats[pos].gender = Some(gender);
        Some(next)
    }
}
