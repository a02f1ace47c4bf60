//! Построение схемы салона из плоского списка мест.
//!
//! Бэкенд отдаёт места неупорядоченным списком; здесь они сортируются по
//! порядковому номеру (числовой суффикс seatNumber) и раскладываются по
//! секциям: передний ряд, средняя секция рядами по четыре, задний ряд.
//! Функция чистая: никаких побочных эффектов, результат детерминирован
//! для любого порядка входа.

use super::error::BookingError;
use crate::models::{Gender, Seat};

// Последний порядковый номер переднего ряда.
pub const FRONT_ROW_MAX: u32 = 2;
// Последний порядковый номер средней секции.
pub const MIDDLE_MAX: u32 = 38;
// Мест в ряду средней секции: два слева и два справа от прохода.
pub const ROW_WIDTH: usize = 4;
const SIDE_WIDTH: usize = 2;

/// Место, привязанное к позиции в схеме. Снимок на момент загрузки рейса:
/// `booked` и `gender` уже учитывают слияние с билетами пользователя.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedSeat {
    pub number: String,
    pub ordinal: u32,
    pub booked: bool,
    pub gender: Option<Gender>,
}

/// Ряд средней секции. Проход между сторонами влияет только на отрисовку,
/// на отношение соседства между сторонами — нет.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MiddleRow {
    pub left: Vec<PlacedSeat>,
    pub right: Vec<PlacedSeat>,
}

impl MiddleRow {
    pub fn seats(&self) -> impl Iterator<Item = &PlacedSeat> {
        self.left.iter().chain(self.right.iter())
    }
}

/// Схема салона: полное и непересекающееся разбиение всех мест рейса.
/// Принадлежность секции зависит только от порядкового номера.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeatLayout {
    pub front_row: Vec<PlacedSeat>,
    pub middle_rows: Vec<MiddleRow>,
    pub back_row: Vec<PlacedSeat>,
}

/// Порядковый номер места — его числовой суффикс: "R-23" -> 23.
/// Номер без суффикса делает схему непригодной, ошибка фатальна для рейса.
pub fn parse_ordinal(seat_number: &str) -> Result<u32, BookingError> {
    let digits: Vec<char> = seat_number
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return Err(BookingError::SeatNumberParse(seat_number.to_string()));
    }
    let suffix: String = digits.into_iter().rev().collect();
    suffix
        .parse::<u32>()
        .map_err(|_| BookingError::SeatNumberParse(seat_number.to_string()))
}

impl SeatLayout {
    /// Строит схему из списка мест одного рейса.
    pub fn build(seats: &[Seat]) -> Result<SeatLayout, BookingError> {
        let mut placed = Vec::with_capacity(seats.len());
        for seat in seats {
            placed.push(PlacedSeat {
                ordinal: parse_ordinal(&seat.seat_number)?,
                number: seat.seat_number.clone(),
                booked: seat.booked,
                gender: seat.gender,
            });
        }

        placed.sort_by_key(|s| s.ordinal);

        // Порядковые номера уникальны в пределах рейса
        for pair in placed.windows(2) {
            if pair[0].ordinal == pair[1].ordinal {
                return Err(BookingError::DuplicateOrdinal(pair[0].ordinal));
            }
        }

        let mut layout = SeatLayout::default();
        let mut middle = Vec::new();
        for seat in placed {
            match seat.ordinal {
                o if o <= FRONT_ROW_MAX => layout.front_row.push(seat),
                o if o <= MIDDLE_MAX => middle.push(seat),
                _ => layout.back_row.push(seat),
            }
        }

        // Средняя секция режется на ряды по четыре в отсортированном порядке:
        // первые два места ряда — левая сторона, следующие два — правая.
        for chunk in middle.chunks(ROW_WIDTH) {
            let mut row = MiddleRow::default();
            for (i, seat) in chunk.iter().enumerate() {
                if i < SIDE_WIDTH {
                    row.left.push(seat.clone());
                } else {
                    row.right.push(seat.clone());
                }
            }
            layout.middle_rows.push(row);
        }

        Ok(layout)
    }

    /// Все места схемы в порядке возрастания порядкового номера.
    pub fn seats(&self) -> impl Iterator<Item = &PlacedSeat> {
        self.front_row
            .iter()
            .chain(self.middle_rows.iter().flat_map(MiddleRow::seats))
            .chain(self.back_row.iter())
    }

    pub fn seat(&self, seat_number: &str) -> Option<&PlacedSeat> {
        self.seats().find(|s| s.number == seat_number)
    }

    pub fn len(&self) -> usize {
        self.seats().count()
    }

    pub fn is_empty(&self) -> bool {
        self.seats().next().is_none()
    }
}
