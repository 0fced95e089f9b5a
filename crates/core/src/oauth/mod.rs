//! Server-managed OAuth connection flow
//!
//! The backend performs the OAuth exchange. The client starts a flow, shows
//! the authorization page in a dedicated window and polls the backend until
//! the flow reaches a terminal state.

pub mod flow;
pub mod initiation;
pub mod poller;
pub mod popup;
pub mod ports;
pub mod session;

pub use flow::ConnectFlow;
pub use initiation::OAuthInitiator;
pub use poller::{PollerConfig, StatusPoller};
pub use popup::{PopupDriver, PopupHandle};
pub use session::OAuthSession;
