//! Pricing aggregation and feature inclusion
//!
//! Everything here is a pure function of the phases it is given. Nothing is
//! cached: callers recompute on every read, which is linear in the (always
//! small) number of phases.
//!
//! # Rules
//!
//! | Value              | Computed over      | Sums                                  |
//! |--------------------|--------------------|---------------------------------------|
//! | `total`            | enabled phases     | price of the selected tier            |
//! | `starter_subtotal` | enabled phases     | Starter price, whatever the selection |
//! | `plus_subtotal`    | enabled phases     | Standard Plus price, likewise         |

use std::collections::HashSet;

use crate::catalog::Phase;
use crate::types::Tier;

/// Aggregate totals over a set of phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total: i64,
    pub starter_subtotal: i64,
    pub plus_subtotal: i64,
}

/// Compute totals. Disabled phases contribute zero to all three sums.
///
/// No validation happens here: negative prices are summed as they are.
/// Sums saturate at the `i64` bounds instead of wrapping.
pub fn aggregate<'a, I>(phases: I) -> Totals
where
    I: IntoIterator<Item = &'a Phase>,
{
    phases
        .into_iter()
        .filter(|phase| phase.enabled)
        .fold(Totals::default(), |acc, phase| Totals {
            total: acc.total.saturating_add(phase.selected_price()),
            starter_subtotal: acc.starter_subtotal.saturating_add(phase.starter.price),
            plus_subtotal: acc.plus_subtotal.saturating_add(phase.standard_plus.price),
        })
}

/// A feature label with its inclusion under the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureLine {
    pub text: String,
    pub included: bool,
}

impl FeatureLine {
    /// Exclusive Standard Plus features that are not part of the selection.
    /// These render struck through.
    pub fn is_excluded(&self) -> bool {
        !self.included
    }
}

/// Resolve the display feature list of a phase.
///
/// The list is the union of both tiers' features, de-duplicated by exact
/// text and ordered by first appearance (Starter first). A feature is
/// included when Standard Plus is selected or when Starter offers it.
pub fn resolve_features(phase: &Phase) -> Vec<FeatureLine> {
    let plus_selected = phase.selected_tier == Tier::StandardPlus;
    let mut seen = HashSet::new();

    phase
        .starter
        .features
        .iter()
        .chain(phase.standard_plus.features.iter())
        .filter(|text| seen.insert(text.as_str()))
        .map(|text| FeatureLine {
            text: text.clone(),
            included: plus_selected || phase.starter.has_feature(text),
        })
        .collect()
}

/// Fixed payment split printed in the financial summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentSchedule {
    pub deposit_percent: u8,
    pub delivery_percent: u8,
    pub acceptance_percent: u8,
}

/// 30% deposit, 40% on delivery, 30% on acceptance
pub const PAYMENT_SCHEDULE: PaymentSchedule = PaymentSchedule {
    deposit_percent: 30,
    delivery_percent: 40,
    acceptance_percent: 30,
};

/// One line of the payment schedule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub label: &'static str,
    pub percent: u8,
    pub amount: i64,
}

impl PaymentSchedule {
    /// Split `total` into the three installments.
    ///
    /// The acceptance installment takes whatever integer rounding leaves so
    /// that the amounts always add up to `total`.
    pub fn installments(&self, total: i64) -> [Installment; 3] {
        let deposit = share(total, self.deposit_percent);
        let delivery = share(total, self.delivery_percent);
        [
            Installment {
                label: "Acompte",
                percent: self.deposit_percent,
                amount: deposit,
            },
            Installment {
                label: "Livraison",
                percent: self.delivery_percent,
                amount: delivery,
            },
            Installment {
                label: "Recette",
                percent: self.acceptance_percent,
                amount: total.saturating_sub(deposit).saturating_sub(delivery),
            },
        ]
    }
}

/// `percent` of `amount`, truncated toward zero. Computed in `i128` so
/// large totals cannot overflow the multiplication.
fn share(amount: i64, percent: u8) -> i64 {
    let value = i128::from(amount) * i128::from(percent) / 100;
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

/// Format an amount with a space every three digits (`155 000`)
pub fn format_amount(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format an amount followed by its currency code (`15 000 DZD`)
pub fn format_price(amount: i64, currency: &str) -> String {
    format!("{} {}", format_amount(amount), currency)
}
