//! Unit tests for individual components

mod config_test;
mod error_test;
mod events_test;
mod ledger_test;
mod queue_test;
mod result_channel_test;
mod util_test;
