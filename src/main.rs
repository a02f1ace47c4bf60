use std::env;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bus_booking::{
    config::Config,
    services::{CheckoutService, SeatMapService},
    AppState,
};

// Смоук-прогон клиентского ядра против настроенного бэкенда: загружает
// рейс, печатает сводку по салону и, если задано, собирает платёж.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.app.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting bus booking client core");

    let state = AppState::new(config);

    let (Ok(bus_id), Ok(user_id)) = (env::var("BUS_ID"), env::var("USER_ID")) else {
        info!("BUS_ID/USER_ID not set - nothing to do");
        return Ok(());
    };

    let seatmap = SeatMapService::new(state.api.clone());
    let mut session = seatmap.load(&bus_id, &user_id).await?;

    let free = session
        .layout()
        .seats()
        .filter(|s| !s.booked)
        .count();
    info!(
        "Bus {}: {} seats total, {} free, fare {}",
        bus_id,
        session.layout().len(),
        free,
        session.fare_per_seat()
    );

    // Демонстрационный выбор: первое свободное место мужчине
    let first_free = session
        .layout()
        .seats()
        .find(|s| !s.booked)
        .map(|s| s.number.clone());
    if let Some(number) = first_free {
        session.toggle(&number);
        session.assign_gender(&number, bus_booking::models::Gender::Male)?;
        let request = session.assemble()?;
        info!("Assembled booking request: amount {}", request.amount);

        if env::var("SUBMIT").is_ok() {
            let checkout = CheckoutService::new(
                state.api.clone(),
                state.config.payment.currency.clone(),
            );
            let context = checkout.initiate(&session).await?;
            let tickets = checkout.complete(&session, &context).await?;
            info!("Issued {} tickets", tickets.len());
        }
    }

    Ok(())
}
