//! Services that connect the rules crate and the bus.
//!
//! Each service owns one concern and talks to the others only through
//! events and query channels.

mod game_data;
mod payment;
mod save;
mod sequence;
mod view;

pub use game_data::GameDataService;
pub use payment::{PaymentOutcome, PaymentProcessor, PlaceholderPayments};
pub use save::SaveService;
pub use sequence::{SequenceKind, SequenceRunner, SequenceToken};
pub use view::ViewService;
