pub mod allowance;
pub mod collection;
pub mod reveal;

pub use allowance::{allowance_address, verify_allowance_accounts, Allowance, ALLOWANCE_SEED};
pub use collection::{
    ClaimGrant, Collection, COLLECTION_SEED,
    MAX_NAME_LEN, MAX_SYMBOL_LEN, MAX_PROOF_HASH_LEN,
};
pub use reveal::{RevealState, METADATA_EXTENSION, MAX_URI_LEN};
