//! Positional address / city / state segmentation.
//!
//! This is a layout guess for cards printed as
//! `<street> <street> <street> <city> <state>`, applied to whatever the
//! earlier passes left in the buffer. The heuristic is brittle and the
//! indices below are fixed; cards that do not follow this layout get
//! misplaced fields rather than empty ones.

/// Below this many leftover tokens nothing is guessed.
pub const MIN_ADDRESS_TOKENS: usize = 5;

/// Number of leading tokens forming the street address.
const STREET_TOKENS: usize = 3;

/// Token that marks index 4 as the state (shifts the city one slot left).
const STATE_MARKER: &str = "St";

/// Address fields produced by the segmenter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressParts {
    pub address: String,
    pub city: String,
    pub state: String,
}

/// Address segmenter.
#[derive(Debug, Default, Clone, Copy)]
pub struct AddressSegmenter;

impl AddressSegmenter {
    /// Split the leftover tokens into address, city and state.
    pub fn segment<S: AsRef<str>>(&self, tokens: &[S]) -> AddressParts {
        if tokens.len() < MIN_ADDRESS_TOKENS {
            return AddressParts::default();
        }

        let token = |i: usize| {
            tokens
                .get(i)
                .map(|t| t.as_ref().to_string())
                .unwrap_or_default()
        };

        let (city, state) = if tokens[4].as_ref() == STATE_MARKER {
            (token(2), token(4))
        } else {
            // With exactly five tokens there is no index 5; state stays empty.
            (token(3), token(5))
        };

        let address = tokens[..STREET_TOKENS]
            .iter()
            .map(|t| t.as_ref())
            .collect::<Vec<_>>()
            .join(" ");

        AddressParts {
            address,
            city,
            state,
        }
    }
}

/// Segment leftover tokens into address parts.
pub fn segment_address<S: AsRef<str>>(tokens: &[S]) -> AddressParts {
    AddressSegmenter.segment(tokens)
}
