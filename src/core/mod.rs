pub mod client;
pub mod request;
pub mod response;

pub use crate::domain::model::{FindResult, Hotel, PaymentOption, RoomAvailability};
pub use crate::domain::ports::{CredentialsProvider, Transport};
pub use crate::utils::error::Result;
