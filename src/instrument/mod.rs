pub mod futures_contract;

pub use futures_contract::FuturesContract;
