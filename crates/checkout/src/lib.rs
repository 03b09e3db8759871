//! Checkout: turning the shopper's cart into a submission, and the order
//! backend contract that settles it.

pub mod backend;
pub mod dto;
pub mod prepare;
pub mod submission;

pub use backend::InMemoryOrderBackend;
pub use dto::{CartDto, OrderLineDto};
pub use prepare::{CheckoutError, CheckoutRequest, attach_email, prepare_checkout};
pub use submission::{OrderSubmission, SubmissionError};
