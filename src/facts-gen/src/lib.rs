pub mod calendar;
pub mod catalog;
pub mod error;
pub mod output;
pub mod probability;
pub mod scenario;
pub mod segments;
pub mod subscriptions;
pub mod viewing;
