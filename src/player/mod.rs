pub mod controller;
pub mod mailbox;
pub mod random;
pub mod tui;

pub use controller::ActionSource;
pub use mailbox::ActionMailbox;
pub use random::RandomSource;
pub use tui::{MailboxSource, INPUT_POLL_INTERVAL};
