// Quantitative Transaction Model
//
// A database is an ordered list of transactions; each transaction maps an item
// to the positive quantity purchased. Unit profits live in a separate table so
// the same database can be mined under different profit assumptions.
//
// All validation happens at construction. A `Database` or `ProfitTable` that
// exists is well-formed, so the mining engines never re-check their input.

mod database;
mod item;
mod profit;
mod transaction;

pub use database::Database;
pub use item::{Item, Itemset};
pub use profit::{ProfitRecord, ProfitTable};
pub use transaction::{Transaction, TransactionRecord};

#[cfg(test)]
mod tests;
