mod json_ledger;

pub use json_ledger::JsonFileLedger;
