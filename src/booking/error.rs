use crate::models::Gender;
use thiserror::Error;

// Ошибки доменной логики бронирования. Ошибки разбора фатальны для схемы
// салона ("не удалось загрузить места"), остальные показываются пользователю
// и оставляют состояние выбора нетронутым.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("не удалось разобрать номер места '{0}': нет числового суффикса")]
    SeatNumberParse(String),

    #[error("порядковый номер {0} встречается в салоне дважды")]
    DuplicateOrdinal(u32),

    #[error("место {seat_number} можно занять только пассажиру пола {required}")]
    GenderConflict {
        seat_number: String,
        required: Gender,
    },

    #[error("место {0} не входит в текущий выбор")]
    SeatNotSelected(String),

    #[error("не указан пол для мест: {}", .0.join(", "))]
    IncompleteGenderAssignment(Vec<String>),

    #[error("не выбрано ни одного места")]
    EmptySelection,
}
