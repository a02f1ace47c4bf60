//! Поиск рейсов по городам и дате.
//!
//! Форма поиска проверяется на клиенте до похода в сеть: пустые города и
//! совпадающие пункты отправления/назначения отсекаются сразу.

use crate::api_client::{ApiError, BackendClient};
use crate::models::BusSummary;
use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use tracing::info;
use validator::{Validate, ValidationError};

/// Запрос формы поиска рейса.
#[derive(Debug, Clone, Serialize, Validate)]
#[validate(schema(function = validate_route))]
pub struct TripQuery {
    #[validate(length(min = 1, message = "укажите город отправления"))]
    pub from: String,
    #[validate(length(min = 1, message = "укажите город назначения"))]
    pub to: String,
    pub date: NaiveDate,
}

fn validate_route(query: &TripQuery) -> Result<(), ValidationError> {
    if !query.from.is_empty() && query.from.eq_ignore_ascii_case(&query.to) {
        let mut error = ValidationError::new("same_city");
        error.message = Some("города отправления и назначения совпадают".into());
        return Err(error);
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("некорректный запрос поиска: {0}")]
    Invalid(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Клиент поиска поверх бэкенда.
#[derive(Clone)]
pub struct SearchClient {
    api: BackendClient,
}

impl SearchClient {
    pub fn new(api: BackendClient) -> Self {
        Self { api }
    }

    pub async fn search(&self, query: &TripQuery) -> Result<Vec<BusSummary>, SearchError> {
        query.validate()?;
        let results = self.api.search_buses(query).await?;
        info!(
            "Search {} -> {} on {}: {} buses",
            query.from,
            query.to,
            query.date,
            results.len()
        );
        Ok(results)
    }
}
