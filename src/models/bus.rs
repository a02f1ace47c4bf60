use super::seat::Seat;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Маршрут рейса
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub from: String,
    pub to: String,
}

// Тариф рейса. actualPrice — целая цена за одно место, без дробных единиц.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fare {
    #[serde(rename = "actualPrice")]
    pub actual_price: i64,
    #[serde(rename = "discountedPrice", default)]
    pub discounted_price: Option<i64>,
}

// Рейс целиком, ответ GET /bus/{busId}
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bus {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "busNumber", default)]
    pub bus_number: Option<String>,
    pub route: Route,
    #[serde(rename = "departureTime")]
    pub departure_time: DateTime<Utc>,
    pub fare: Fare,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

// Укороченная карточка рейса в результатах поиска
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusSummary {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub route: Route,
    #[serde(rename = "departureTime")]
    pub departure_time: DateTime<Utc>,
    pub fare: Fare,
}

// Текущая позиция автобуса для экрана отслеживания
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BusLocation {
    pub lat: f64,
    pub lng: f64,
}
