//! api_client.rs
//!
//! Клиент для обращения к бэкенду сервиса. Бэкенд — внешний REST-контракт:
//! клиентское ядро ничего не знает о его хранилище и бизнес-логике.
//!
//! Ключевые компоненты:
//! 1.  **CircuitBreaker**: "Автоматический выключатель" для отказоустойчивой
//!     работы с бэкендом. После серии сетевых сбоев запросы временно
//!     блокируются, чтобы не долбить недоступный сервис.
//! 2.  **BackendClient**: инкапсулирует все HTTP-вызовы — загрузку рейса,
//!     билеты пользователя, поиск, платёжный цикл и выпуск билетов. Все
//!     запросы идут через `CircuitBreaker` и общий таймаут.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::booking::BookingRequest;
use crate::config::{ApiConfig, CircuitBreakerConfig};
use crate::models::{Bus, BusLocation, BusSummary, Gender, Ticket, UserTickets};
use crate::search::TripQuery;

/// Состояния "Автоматического выключателя" (Circuit Breaker).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Нормальный режим, запросы разрешены.
    Closed,
    /// Режим блокировки после серии сбоев.
    Open,
    /// Тестовый режим: после таймаута разрешается один пробный запрос.
    HalfOpen,
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    opened_at: Option<Instant>,
}

/// Выключатель доступа к бэкенду.
#[derive(Debug)]
pub struct CircuitBreaker {
    inner: Mutex<BreakerInner>,
    failure_threshold: u32,
    timeout: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, timeout_seconds: u64) -> Self {
        Self {
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                opened_at: None,
            }),
            failure_threshold,
            timeout: Duration::from_secs(timeout_seconds),
        }
    }

    /// Можно ли выполнить следующий запрос.
    pub fn can_execute(&self) -> bool {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        match inner.state {
            CircuitState::Closed | CircuitState::HalfOpen => true,
            CircuitState::Open => {
                let expired = inner
                    .opened_at
                    .map(|at| at.elapsed() >= self.timeout)
                    .unwrap_or(true);
                if expired {
                    // Таймаут истёк — пропускаем один пробный запрос
                    inner.state = CircuitState::HalfOpen;
                    info!("Circuit breaker transitioning to HalfOpen state");
                    true
                } else {
                    false
                }
            }
        }
    }

    pub fn record_success(&self) {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        if inner.state == CircuitState::HalfOpen {
            info!("Circuit breaker recovered - transitioning to Closed state");
        }
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.opened_at = None;
    }

    pub fn record_failure(&self) {
        let mut inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        inner.failure_count += 1;
        match inner.state {
            CircuitState::Closed => {
                if inner.failure_count >= self.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(Instant::now());
                    error!(
                        "Circuit breaker OPENED - {} failures reached threshold {}",
                        inner.failure_count, self.failure_threshold
                    );
                }
            }
            CircuitState::HalfOpen => {
                // Пробный запрос провалился — снова блокируемся
                inner.state = CircuitState::Open;
                inner.opened_at = Some(Instant::now());
                warn!("Circuit breaker test failed - returning to Open state");
            }
            CircuitState::Open => {}
        }
    }

    pub fn state(&self) -> CircuitState {
        match self.inner.lock() {
            Ok(inner) => inner.state,
            Err(poisoned) => poisoned.into_inner().state,
        }
    }

    fn failure_count(&self) -> u32 {
        match self.inner.lock() {
            Ok(inner) => inner.failure_count,
            Err(poisoned) => poisoned.into_inner().failure_count,
        }
    }
}

/// Ошибки клиента бэкенда. Наружу отдаются как есть, без автоповторов;
/// частичных данных при сбое не бывает.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("circuit breaker is open - backend temporarily unavailable")]
    CircuitOpen,

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
}

// --- Модели запросов/ответов платёжного цикла ---

#[derive(Debug, Serialize)]
struct PaymentIntentRequest {
    amount: i64,
    currency: String,
    #[serde(rename = "orderId")]
    order_id: Uuid,
}

/// Ответ POST /payment/create-payment-intent: секрет для платёжной формы
/// и идентификатор платежа для последующего обновления статуса.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentResponse {
    #[serde(rename = "clientSecret")]
    pub client_secret: String,
    #[serde(rename = "paymentId")]
    pub payment_id: String,
}

/// Итоговый статус платежа, передаваемый в POST /payment/update-status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Succeeded,
    Failed,
}

#[derive(Debug, Serialize)]
struct PaymentStatusRequest {
    #[serde(rename = "paymentId")]
    payment_id: String,
    status: PaymentStatus,
}

// --- Модели запросов закрепления мест и выпуска билетов ---

/// Одно место в PATCH /bus/update-seat-status.
#[derive(Debug, Clone, Serialize)]
pub struct SeatStatusUpdate {
    #[serde(rename = "seatNumber")]
    pub seat_number: String,
    pub gender: Gender,
}

#[derive(Debug, Serialize)]
struct SeatStatusRequest {
    #[serde(rename = "busId")]
    bus_id: String,
    seats: Vec<SeatStatusUpdate>,
}

#[derive(Debug, Deserialize)]
struct GenerateTicketsResponse {
    #[serde(default)]
    tickets: Vec<Ticket>,
}

/// Клиент REST-бэкенда.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    breaker: Arc<CircuitBreaker>,
}

impl BackendClient {
    /// Создаёт и конфигурирует клиент на основе настроек приложения.
    pub fn from_config(api: &ApiConfig, breaker: &CircuitBreakerConfig) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(api.timeout_seconds))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: api.base_url.trim_end_matches('/').to_string(),
            breaker: Arc::new(CircuitBreaker::new(
                breaker.failure_threshold,
                breaker.timeout_seconds,
            )),
        }
    }

    /// Выполняет запрос через Circuit Breaker и разбирает ответ.
    async fn execute<T>(&self, request: reqwest::RequestBuilder) -> Result<T, ApiError>
    where
        T: serde::de::DeserializeOwned,
    {
        if !self.breaker.can_execute() {
            warn!("Circuit breaker is OPEN - blocking backend request");
            return Err(ApiError::CircuitOpen);
        }

        let response = match request.send().await {
            Ok(response) => {
                self.breaker.record_success();
                response
            }
            Err(e) => {
                error!("Backend request failed: {:?}", e);
                self.breaker.record_failure();
                return Err(ApiError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, message });
        }

        Ok(response.json::<T>().await?)
    }

    /// GET /bus/{busId} — рейс со схемой мест и тарифом.
    pub async fn get_bus(&self, bus_id: &str) -> Result<Bus, ApiError> {
        self.execute(self.http.get(format!("{}/bus/{}", self.base_url, bus_id)))
            .await
    }

    /// GET /ticket/user/information/{userId} — билеты пользователя.
    pub async fn get_user_tickets(&self, user_id: &str) -> Result<UserTickets, ApiError> {
        self.execute(self.http.get(format!(
            "{}/ticket/user/information/{}",
            self.base_url, user_id
        )))
        .await
    }

    /// GET /bus/search — рейсы по городам и дате.
    pub async fn search_buses(&self, query: &TripQuery) -> Result<Vec<BusSummary>, ApiError> {
        let date = query.date.to_string();
        self.execute(self.http.get(format!("{}/bus/search", self.base_url)).query(&[
            ("from", query.from.as_str()),
            ("to", query.to.as_str()),
            ("date", date.as_str()),
        ]))
        .await
    }

    /// GET /bus/location/{busId} — текущая позиция автобуса.
    pub async fn get_bus_location(&self, bus_id: &str) -> Result<BusLocation, ApiError> {
        self.execute(
            self.http
                .get(format!("{}/bus/location/{}", self.base_url, bus_id)),
        )
        .await
    }

    /// POST /payment/create-payment-intent — платёж на указанную сумму.
    pub async fn create_payment_intent(
        &self,
        amount: i64,
        currency: &str,
    ) -> Result<PaymentIntentResponse, ApiError> {
        let request = PaymentIntentRequest {
            amount,
            currency: currency.to_string(),
            order_id: Uuid::new_v4(),
        };
        info!("Creating payment intent: amount={}, currency={}", amount, currency);
        self.execute(
            self.http
                .post(format!("{}/payment/create-payment-intent", self.base_url))
                .json(&request),
        )
        .await
    }

    /// POST /payment/update-status — итоговый статус платежа.
    pub async fn update_payment_status(
        &self,
        payment_id: &str,
        status: PaymentStatus,
    ) -> Result<(), ApiError> {
        let request = PaymentStatusRequest {
            payment_id: payment_id.to_string(),
            status,
        };
        let _: serde_json::Value = self
            .execute(
                self.http
                    .post(format!("{}/payment/update-status", self.base_url))
                    .json(&request),
            )
            .await?;
        Ok(())
    }

    /// PATCH /bus/update-seat-status — закрепляет пол и занятость мест.
    pub async fn update_seat_status(
        &self,
        bus_id: &str,
        seats: Vec<SeatStatusUpdate>,
    ) -> Result<(), ApiError> {
        let request = SeatStatusRequest {
            bus_id: bus_id.to_string(),
            seats,
        };
        let _: serde_json::Value = self
            .execute(
                self.http
                    .patch(format!("{}/bus/update-seat-status", self.base_url))
                    .json(&request),
            )
            .await?;
        Ok(())
    }

    /// POST /ticket/generate — выпускает билеты по собранному запросу.
    pub async fn generate_tickets(&self, request: &BookingRequest) -> Result<Vec<Ticket>, ApiError> {
        let response: GenerateTicketsResponse = self
            .execute(
                self.http
                    .post(format!("{}/ticket/generate", self.base_url))
                    .json(request),
            )
            .await?;
        Ok(response.tickets)
    }

    /// Текущее состояние Circuit Breaker для мониторинга.
    pub fn circuit_breaker_status(&self) -> (CircuitState, u32) {
        (self.breaker.state(), self.breaker.failure_count())
    }
}
