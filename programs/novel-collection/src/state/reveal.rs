use anchor_lang::prelude::*;

use crate::errors::NovelCollectionError;

/// Appended to every revealed metadata URI
pub const METADATA_EXTENSION: &str = ".json";

/// Maximum length of any URI stored on the collection
pub const MAX_URI_LEN: usize = 200;

/// Reveal phase of a collection
///
/// Starts unrevealed with an empty base URI and a zero offset. `transition` moves it to
/// revealed exactly once; after that none of the fields change again.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct RevealState {
    pub revealed: bool,
    /// Metadata base reference fixed at reveal
    #[max_len(200)]
    pub base_uri: String,
    /// Offset added (mod supply cap) to an item id to obtain its metadata number
    pub starting_index: u64,
    /// Unix timestamp of the reveal (0 while unrevealed)
    pub revealed_at: i64,
}

impl RevealState {
    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    /// One-shot transition to revealed.
    ///
    /// `entropy` is only read after every guard has passed, so a rejected call
    /// never consumes it.
    pub fn transition(
        &mut self,
        base_uri: String,
        supply_cap: u64,
        entropy: impl FnOnce() -> Result<u64>,
        timestamp: i64,
    ) -> Result<u64> {
        require!(!self.revealed, NovelCollectionError::AlreadyRevealed);
        require!(!base_uri.is_empty(), NovelCollectionError::EmptyBaseUri);
        require!(base_uri.len() <= MAX_URI_LEN, NovelCollectionError::UriTooLong);
        require!(supply_cap > 0, NovelCollectionError::InvalidSupplyCap);

        let starting_index = entropy()? % supply_cap;

        self.base_uri = base_uri;
        self.starting_index = starting_index;
        self.revealed_at = timestamp;
        self.revealed = true;

        Ok(starting_index)
    }

    /// Metadata number for `item_id`: `(starting_index + item_id) mod supply_cap`
    pub fn metadata_number(&self, item_id: u64, supply_cap: u64) -> u64 {
        ((self.starting_index as u128 + item_id as u128) % supply_cap as u128) as u64
    }

    /// URI of `item_id` once revealed
    pub fn revealed_uri(&self, item_id: u64, supply_cap: u64) -> String {
        format!(
            "{}{}{}",
            self.base_uri,
            self.metadata_number(item_id, supply_cap),
            METADATA_EXTENSION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::assert_error;

    #[test]
    fn test_starts_unrevealed() {
        let state = RevealState::default();
        assert!(!state.is_revealed());
        assert_eq!(state.base_uri, "");
        assert_eq!(state.starting_index, 0);
    }

    #[test]
    fn test_transition_reduces_entropy() {
        let mut state = RevealState::default();
        let index = state
            .transition("https://realurl.com/".to_string(), 1000, || Ok(123_456), 42)
            .unwrap();

        assert_eq!(index, 456);
        assert!(state.is_revealed());
        assert_eq!(state.starting_index, 456);
        assert_eq!(state.revealed_at, 42);
    }

    #[test]
    fn test_second_transition_fails_and_keeps_state() {
        let mut state = RevealState::default();
        state
            .transition("ipfs://first/".to_string(), 20, || Ok(7), 1)
            .unwrap();
        let before = state.clone();

        let mut drawn = false;
        assert_error(
            state.transition(
                "ipfs://second/".to_string(),
                20,
                || {
                    drawn = true;
                    Ok(3)
                },
                2,
            ),
            NovelCollectionError::AlreadyRevealed,
        );
        assert!(!drawn);
        assert_eq!(state, before);
    }

    #[test]
    fn test_rejects_bad_base_uri() {
        let mut state = RevealState::default();
        assert_error(
            state.transition(String::new(), 10, || Ok(1), 0),
            NovelCollectionError::EmptyBaseUri,
        );
        assert_error(
            state.transition("x".repeat(MAX_URI_LEN + 1), 10, || Ok(1), 0),
            NovelCollectionError::UriTooLong,
        );
        assert_eq!(state, RevealState::default());
    }

    #[test]
    fn test_metadata_number_wraps() {
        let state = RevealState {
            revealed: true,
            base_uri: "b/".to_string(),
            starting_index: 18,
            revealed_at: 0,
        };
        assert_eq!(state.metadata_number(1, 20), 19);
        assert_eq!(state.metadata_number(2, 20), 0);
        assert_eq!(state.metadata_number(20, 20), 18);
        assert_eq!(state.revealed_uri(3, 20), "b/1.json");
    }

    #[test]
    fn test_metadata_number_no_overflow() {
        let state = RevealState {
            revealed: true,
            base_uri: String::new(),
            starting_index: u64::MAX - 1,
            revealed_at: 0,
        };
        assert_eq!(state.metadata_number(u64::MAX, u64::MAX), u64::MAX - 1);
    }
}
