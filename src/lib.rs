pub mod api_client;
pub mod booking;
pub mod config;
pub mod models;
pub mod search;
pub mod services;

use std::sync::Arc;

// Общее состояние клиента — конфигурация и клиент бэкенда.
// Сессии бронирования в состоянии не живут: каждая принадлежит своему
// экрану и умирает вместе с ним.
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub api: api_client::BackendClient,
}

impl AppState {
    pub fn new(config: config::Config) -> Arc<Self> {
        let api = api_client::BackendClient::from_config(&config.api, &config.circuit_breaker);
        Arc::new(Self { config, api })
    }
}
