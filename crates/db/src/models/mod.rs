pub mod domain;
pub mod mailbox;
pub mod message;
