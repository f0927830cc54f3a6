use anchor_lang::prelude::*;

#[error_code]
pub enum NovelCollectionError {
    #[msg("Unauthorized")]
    Unauthorized,

    // Configuration errors
    #[msg("Supply cap must be greater than 0 and less than u64::MAX")]
    InvalidSupplyCap,
    #[msg("Name must be 32 characters or less")]
    NameTooLong,
    #[msg("Symbol must be 10 characters or less")]
    SymbolTooLong,
    #[msg("URI must be 200 characters or less")]
    UriTooLong,
    #[msg("Metadata proof hash must be 128 characters or less")]
    ProofHashTooLong,
    #[msg("Collection asset does not match the collection")]
    InvalidCollectionAsset,

    // Allowance errors
    #[msg("Claimants and amounts must have the same length")]
    LengthMismatch,
    #[msg("Number of allowance accounts does not match the number of claimants")]
    AllowanceAccountCountMismatch,
    #[msg("Allowance account is not the claimant's allowance PDA")]
    InvalidAllowanceAccount,
    #[msg("Allowance belongs to a different claimant")]
    AllowanceMismatch,

    // Claim errors
    #[msg("Claim amount must be greater than 0")]
    ZeroAmount,
    #[msg("Requested count exceeds whitelist limit")]
    AllowanceExceeded,
    #[msg("Supply cap reached")]
    SupplyCapReached,
    #[msg("Number of item accounts does not match the claim amount")]
    ItemAccountCountMismatch,
    #[msg("Item account is not the expected item PDA")]
    InvalidItemAccount,

    // Reveal errors
    #[msg("Collection has already been revealed")]
    AlreadyRevealed,
    #[msg("Collection has not been revealed yet")]
    NotRevealed,
    #[msg("Base URI must not be empty")]
    EmptyBaseUri,
    #[msg("Slot hashes sysvar data is unavailable")]
    InvalidEntropyAccount,

    // Metadata errors
    #[msg("Item has not been issued")]
    UnknownItem,

    // Administrator handoff errors
    #[msg("No administrator handoff is pending")]
    NoPendingAdmin,
}

#[cfg(test)]
pub(crate) fn assert_error<T: std::fmt::Debug>(result: Result<T>, expected: NovelCollectionError) {
    let expected: anchor_lang::error::Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}
