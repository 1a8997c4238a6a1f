#![no_std]

//! Building blocks shared by the collectible contracts: the error
//! taxonomy, owner/minter roles, the pause switch, the call guard and the
//! client interface of the token ledger.

pub mod access;
pub mod error;
pub mod guard;
pub mod ledger;
pub mod pause;
pub mod storage;

pub use error::Error;
pub use ledger::TokenLedgerClient;
