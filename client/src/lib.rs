//! Client core for the order-management storefront and back office.
//!
//! Two components carry every page: [`net::SessionClient`], which owns the
//! bearer-token lifecycle and wraps each API call with auth decoration and
//! authorization-failure recovery, and [`assets::AssetLoader`], which fetches
//! token-gated images and displays them through local object URLs. Both share
//! the persisted session through [`session::SessionStore`] and reach the host
//! surface only through the seams in [`ui`].

pub mod api;
pub mod assets;
pub mod config;
pub mod errors;
pub mod net;
pub mod session;
pub mod ui;

pub use config::Config;
pub use errors::{ClientError, ClientResult};
pub use net::{Payload, RequestOptions, SessionClient};
pub use session::{FileSessionStore, MemorySessionStore, Role, Session, SessionStore};
