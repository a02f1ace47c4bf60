use serde::{Deserialize, Serialize};

// Пол пассажира, закреплённый за местом. На проводе кодируется как "M"/"F" —
// в таком виде его отдаёт и принимает бэкенд.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "M"),
            Gender::Female => write!(f, "F"),
        }
    }
}

// Место в автобусе, как оно приходит в составе рейса.
// gender присутствует только у выкупленных мест.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    #[serde(rename = "seatNumber")]
    pub seat_number: String,
    #[serde(default)]
    pub booked: bool,
    #[serde(default)]
    pub gender: Option<Gender>,
}
