pub mod bus;
pub mod seat;
pub mod ticket;

pub use bus::{Bus, BusLocation, BusSummary, Fare, Route};
pub use seat::{Gender, Seat};
pub use ticket::{Ticket, TicketBuckets, UserTickets};
