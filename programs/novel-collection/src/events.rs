use anchor_lang::prelude::*;

#[event]
pub struct CollectionInitialized {
    pub collection: Pubkey,
    pub collection_asset: Pubkey,
    pub admin: Pubkey,
    pub supply_cap: u64,
    pub metadata_proof_hash: String,
    pub timestamp: i64,
}

#[event]
pub struct AllowancesSet {
    pub collection: Pubkey,
    pub admin: Pubkey,
    /// Number of (claimant, amount) pairs written
    pub count: u64,
    pub timestamp: i64,
}

/// Emitted once per successful claim
#[event]
pub struct ItemsClaimed {
    pub collection: Pubkey,
    pub claimant: Pubkey,
    /// Id of the first item issued by this claim; the rest follow sequentially
    pub first_item_id: u64,
    pub amount: u64,
    /// Claimant's allowance left after this claim
    pub remaining_allowance: u64,
    /// Collection-wide issued count after this claim
    pub issued_count: u64,
    pub timestamp: i64,
}

#[event]
pub struct CollectionRevealed {
    pub collection: Pubkey,
    pub base_uri: String,
    pub starting_index: u64,
    pub issued_count: u64,
    pub timestamp: i64,
}

#[event]
pub struct ItemUriSynced {
    pub collection: Pubkey,
    pub item_id: u64,
    pub item_asset: Pubkey,
    pub uri: String,
    pub timestamp: i64,
}

#[event]
pub struct AdminProposed {
    pub collection: Pubkey,
    pub admin: Pubkey,
    pub pending_admin: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct AdminAccepted {
    pub collection: Pubkey,
    pub previous_admin: Pubkey,
    pub admin: Pubkey,
    pub timestamp: i64,
}
