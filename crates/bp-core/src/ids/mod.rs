pub mod account_id;
mod id_macro;

pub use account_id::AccountId;
