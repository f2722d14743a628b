mod credential;
mod message;
mod relay;
mod session;

pub use credential::*;
pub use message::*;
pub use relay::*;
pub use session::*;
