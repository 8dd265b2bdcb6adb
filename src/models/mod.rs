pub mod tags;
pub mod ticket;

pub use tags::TagList;
pub use ticket::{CreateTicket, Ticket, TicketResponse, UpdateTicket};
