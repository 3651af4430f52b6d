pub mod cleanup;
pub mod domain;
pub mod error;
pub mod generator;
pub mod mailbox;
pub mod message;
