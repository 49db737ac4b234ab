pub mod dto;
pub mod ledger;
pub mod ports;
pub mod sweeper;
pub mod use_cases;
