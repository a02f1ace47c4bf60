use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// Билет пользователя, ответ GET /ticket/user/information/{userId}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "busId")]
    pub bus_id: String,
    #[serde(rename = "seatNumber")]
    pub seat_number: String,
    #[serde(default)]
    pub cancelled: bool,
    #[serde(rename = "journeyDate", default)]
    pub journey_date: Option<DateTime<Utc>>,
}

// Билеты пользователя, как их группирует бэкенд: предстоящие и прошедшие.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserTickets {
    #[serde(default)]
    pub active: Vec<Ticket>,
    #[serde(default)]
    pub past: Vec<Ticket>,
}

// Билеты, разложенные по жизненному циклу для экрана "Мои билеты".
// Отменённые вынимаются из обоих списков бэкенда в отдельную корзину.
#[derive(Debug, Clone, Default)]
pub struct TicketBuckets {
    pub active: Vec<Ticket>,
    pub past: Vec<Ticket>,
    pub cancelled: Vec<Ticket>,
}

impl UserTickets {
    // Номера мест этого рейса, занятых неотменёнными билетами.
    // Используется при слиянии со схемой салона: такие места недоступны.
    pub fn booked_seats_for(&self, bus_id: &str) -> HashSet<String> {
        self.active
            .iter()
            .filter(|t| !t.cancelled && t.bus_id == bus_id)
            .map(|t| t.seat_number.clone())
            .collect()
    }

    pub fn into_buckets(self) -> TicketBuckets {
        let mut buckets = TicketBuckets::default();
        for ticket in self.active {
            if ticket.cancelled {
                buckets.cancelled.push(ticket);
            } else {
                buckets.active.push(ticket);
            }
        }
        for ticket in self.past {
            if ticket.cancelled {
                buckets.cancelled.push(ticket);
            } else {
                buckets.past.push(ticket);
            }
        }
        buckets
    }
}
