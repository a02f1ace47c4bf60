//! Оформление бронирования: платёж и выпуск билетов.
//!
//! Сценарий двухфазный, как и в приложении: `initiate` собирает запрос и
//! создаёт платёж (его секрет уходит в платёжную форму — она внешняя),
//! `complete` после подтверждения оплаты закрепляет места, выпускает билеты
//! и отмечает платёж успешным. `abort` отмечает платёж проваленным, если
//! пользователь бросил оплату. Повторов нет: ошибка отдаётся наружу сразу.

use super::FlowError;
use crate::api_client::{BackendClient, PaymentStatus, SeatStatusUpdate};
use crate::booking::{BookingRequest, BookingSession};
use crate::models::Ticket;
use tracing::{info, warn};

/// Контекст платежа между `initiate` и `complete`.
#[derive(Debug, Clone)]
pub struct PaymentContext {
    pub request: BookingRequest,
    pub payment_id: String,
    pub client_secret: String,
}

#[derive(Clone)]
pub struct CheckoutService {
    api: BackendClient,
    currency: String,
}

impl CheckoutService {
    pub fn new(api: BackendClient, currency: impl Into<String>) -> Self {
        Self {
            api,
            currency: currency.into(),
        }
    }

    /// Собирает запрос бронирования и создаёт платёж на его сумму.
    pub async fn initiate(&self, session: &BookingSession) -> Result<PaymentContext, FlowError> {
        let request = session.assemble()?;
        let intent = self
            .api
            .create_payment_intent(request.amount, &self.currency)
            .await?;

        info!(
            "Payment initiated for bus {}: {} seats, amount {}, payment_id={}",
            session.bus_id(),
            request.tickets.len(),
            request.amount,
            intent.payment_id
        );

        Ok(PaymentContext {
            request,
            payment_id: intent.payment_id,
            client_secret: intent.client_secret,
        })
    }

    /// Завершает оформление после подтверждённой оплаты: закрепляет места,
    /// выпускает билеты, отмечает платёж успешным.
    pub async fn complete(
        &self,
        session: &BookingSession,
        context: &PaymentContext,
    ) -> Result<Vec<Ticket>, FlowError> {
        let updates: Vec<SeatStatusUpdate> = session
            .selection()
            .selected_seats()
            .iter()
            .filter_map(|s| {
                s.gender.map(|gender| SeatStatusUpdate {
                    seat_number: s.seat_number.clone(),
                    gender,
                })
            })
            .collect();

        self.api
            .update_seat_status(session.bus_id(), updates)
            .await?;
        let tickets = self.api.generate_tickets(&context.request).await?;

        // Билеты уже выпущены; сбой отметки статуса не отменяет оформление,
        // статус добьёт бэкенд по вебхуку платёжного провайдера.
        if let Err(e) = self
            .api
            .update_payment_status(&context.payment_id, PaymentStatus::Succeeded)
            .await
        {
            warn!(
                "Failed to update payment status {}: {}",
                context.payment_id, e
            );
        }

        info!(
            "Booking completed for bus {}: {} tickets issued",
            session.bus_id(),
            tickets.len()
        );
        Ok(tickets)
    }

    /// Отмечает платёж проваленным после отказа или ошибки оплаты.
    pub async fn abort(&self, context: &PaymentContext) -> Result<(), FlowError> {
        self.api
            .update_payment_status(&context.payment_id, PaymentStatus::Failed)
            .await?;
        info!("Payment {} marked as failed", context.payment_id);
        Ok(())
    }
}
