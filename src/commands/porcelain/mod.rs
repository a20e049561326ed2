pub mod add;
pub mod branch;
pub mod checkout;
pub mod commit;
pub mod fetch;
pub mod find;
pub mod log;
pub mod merge;
pub mod pull;
pub mod push;
pub mod remote;
pub mod remove;
pub mod reset;
pub mod status;
