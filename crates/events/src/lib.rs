//! Vireo event bus and notification infrastructure.
//!
//! Every committed review transition is published exactly once as a
//! [`ReviewEvent`] on an in-process bus. This crate provides:
//!
//! - [`EventBus`] — publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`ReviewEvent`] — the committed-transition envelope.
//! - [`EventPersistence`] — background service that durably writes every
//!   event to the `review_events` table.
//! - [`NotificationDispatcher`] — decides which audiences hear about a
//!   transition and hands off to the delivery channels.
//! - [`delivery`] — external delivery channels (email, webhook).
//!
//! Delivery is fire-and-forget: failures are logged and never affect the
//! committed transition.

pub mod bus;
pub mod delivery;
pub mod dispatcher;
pub mod persistence;

pub use bus::{EventBus, ReviewEvent};
pub use delivery::email::{EmailConfig, EmailDelivery};
pub use delivery::webhook::WebhookDelivery;
pub use dispatcher::{Audience, NotificationDispatcher, RecipientDirectory};
pub use persistence::EventPersistence;
