use serde::Serialize;

use crate::knowledge::{ContactFee, KnowledgeBase, DEFAULT_FEE_KEY};
use crate::skills::same_label;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeQuote {
    /// Fee-table key the quote came from.
    pub region: String,
    pub currency: String,
    pub amount: f64,
    pub payment_method: String,
    /// Only known for USD and NGN fees.
    pub btc_equivalent: Option<f64>,
}

/// Fee for a finder in `country` (case-insensitive), falling back to the
/// international default when the country has no entry of its own.
/// `None` only if the default entry is missing, which `load()` rejects.
pub fn quote_fee(kb: &KnowledgeBase, country: Option<&str>) -> Option<FeeQuote> {
    let entry = country.map(str::trim).and_then(|country| {
        kb.contact_fees
            .iter()
            .find(|(key, _)| key.as_str() != DEFAULT_FEE_KEY && same_label(key, country))
    });

    let (region, fee) = match entry {
        Some((key, fee)) => (key.clone(), fee),
        None => (
            DEFAULT_FEE_KEY.to_string(),
            kb.contact_fees.get(DEFAULT_FEE_KEY)?,
        ),
    };

    Some(FeeQuote {
        region,
        currency: fee.currency.clone(),
        amount: fee.amount,
        payment_method: fee.payment_method.clone(),
        btc_equivalent: btc_equivalent(kb, fee),
    })
}

pub fn btc_equivalent(kb: &KnowledgeBase, fee: &ContactFee) -> Option<f64> {
    let rates = &kb.exchange_rates;
    match fee.currency.to_ascii_uppercase().as_str() {
        "USD" => Some(fee.amount / rates.usd_per_btc),
        "NGN" => Some(fee.amount / rates.ngn_per_usd / rates.usd_per_btc),
        _ => None,
    }
}
