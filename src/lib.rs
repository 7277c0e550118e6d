//! Core of a Discord interactions endpoint.
//!
//! An interaction arrives as a signed HTTP POST. [`signature`] checks it
//! came from Discord, [`decode`] turns the body into a typed
//! [`Interaction`](types::Interaction), [`router`] picks the handler, and the
//! handler's [`InteractionResponse`](types::InteractionResponse) is
//! serialized back as the reply.
//!
//! The core is synchronous and free of I/O. The `io` feature adds the axum
//! [`server`], process [`config`], and the REST [`http`] client used to
//! register commands.

pub mod decode;
pub mod handlers;
pub mod router;
pub mod signature;
pub mod types;

#[cfg(feature = "io")]
pub mod config;
#[cfg(feature = "io")]
pub mod http;
#[cfg(feature = "io")]
pub mod server;
