//! Anchor currency selection.
//!
//! For every (origin, border) pair the gateway expresses the border's rate
//! against a single anchor currency. When both sides share a currency the
//! rate against itself is meaningless, so a fixed secondary reference is used.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Secondary reference used when a shared currency is not the euro.
const EURO: &str = "EUR";
/// Secondary reference used when the shared currency is the euro.
const US_DOLLAR: &str = "USD";

/// The currency a border's rate is expressed against.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct AnchorDecision {
    #[schema(example = "EUR")]
    pub anchor_code: String,
}

impl AnchorDecision {
    pub fn code(&self) -> &str {
        &self.anchor_code
    }
}

/// Picks the anchor for a border currency given the origin currency.
///
/// - same currency, euro: `USD`
/// - same currency, anything else: `EUR`
/// - different currencies: the origin's currency
///
/// Pure and total over any pair of strings.
pub fn resolve_anchor(origin: &str, border: &str) -> AnchorDecision {
    let anchor = if border == origin {
        if border == EURO { US_DOLLAR } else { EURO }
    } else {
        origin
    };

    AnchorDecision {
        anchor_code: anchor.to_string(),
    }
}

/// Base currency for a history lookup of a country's own currency.
///
/// The rate provider quotes against the euro by default, so euro history is
/// requested against the dollar and everything else uses the provider default.
pub fn history_base(currency: &str) -> Option<&'static str> {
    (currency == EURO).then_some(US_DOLLAR)
}
