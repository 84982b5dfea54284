//! # Transaction Projector
//!
//! Turns a cart snapshot plus checkout metadata into either a draft
//! transaction (sent to the authority) or a receipt (shown to the cashier).
//!
//! ## Projection Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   CartLedger ──┐                                                        │
//! │                ├──► draft() ────────► DraftTransaction ──► authority    │
//! │   ReceiptMeta ─┤                                                        │
//! │                └──► preview() ──────► Receipt (placeholder "T-00042")   │
//! │                                                                         │
//! │   Transaction ─────► from_transaction() ──► Receipt (authority number)  │
//! │                                                                         │
//! │   Receipt + ReceiptStyle ──► render() ──► printable text               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is pure. Receipt totals are always recomputed from
//! the printed lines so the bottom line matches what is listed above it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use ts_rs::TS;

use crate::cart::CartLedger;
use crate::error::{CoreError, CoreResult};
use crate::locale::{Label, Locale};
use crate::money::Money;
use crate::types::{CartLine, DraftTransaction, Transaction, TransactionStatus};
use crate::validation::DATE_FORMAT;
use crate::{DEFAULT_CUSTOMER, RECEIPT_DIGITS, RECEIPT_PREFIX};

/// Width of the printed receipt in characters.
const RECEIPT_WIDTH: usize = 40;

// =============================================================================
// Metadata
// =============================================================================

/// Checkout fields the cashier fills in next to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptMeta {
    pub customer_name: String,
    #[ts(type = "string")]
    pub date: NaiveDate,
    pub status: TransactionStatus,
}

impl ReceiptMeta {
    /// Default metadata for a given day: walk-in customer, completed sale.
    pub fn for_date(date: NaiveDate) -> Self {
        ReceiptMeta {
            customer_name: DEFAULT_CUSTOMER.to_string(),
            date,
            status: TransactionStatus::default(),
        }
    }

    /// `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Shop details printed at the top of every receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BusinessIdentity {
    pub name: String,
    pub address_lines: Vec<String>,
    pub phone: String,
}

impl Default for BusinessIdentity {
    fn default() -> Self {
        BusinessIdentity {
            name: "Aiham caraj".to_string(),
            address_lines: vec!["Barta'a".to_string()],
            phone: "052-634-3989".to_string(),
        }
    }
}

/// Everything about a receipt that is presentation, not data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptStyle {
    pub business: BusinessIdentity,
    pub locale: Locale,
    pub currency_symbol: String,
}

impl ReceiptStyle {
    /// `7.00 S`
    pub fn amount(&self, money: Money) -> String {
        format_amount(money, &self.currency_symbol)
    }
}

/// Formats money at display precision followed by the currency symbol.
pub fn format_amount(money: Money, currency_symbol: &str) -> String {
    if currency_symbol.is_empty() {
        money.to_string()
    } else {
        format!("{} {}", money, currency_symbol)
    }
}

// =============================================================================
// Receipt
// =============================================================================

/// One printed line: `name × quantity → amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    #[ts(type = "number")]
    pub unit_price: Money,
    #[ts(type = "number")]
    pub amount: Money,
}

impl From<&CartLine> for ReceiptLine {
    fn from(line: &CartLine) -> Self {
        ReceiptLine {
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
            amount: line.line_total(),
        }
    }
}

/// A receipt ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub receipt_number: String,
    pub date: String,
    pub customer_name: String,
    pub status: TransactionStatus,
    pub lines: Vec<ReceiptLine>,
    #[ts(type = "number")]
    pub total: Money,
    /// `true` while the number is a local placeholder, not the authority's.
    pub provisional: bool,
}

// =============================================================================
// Projection
// =============================================================================

/// `T-` followed by the counter zero-padded to five digits.
///
/// ```rust
/// use till_core::receipt::placeholder_number;
///
/// assert_eq!(placeholder_number(42), "T-00042");
/// ```
pub fn placeholder_number(counter: u64) -> String {
    format!("{}{:0width$}", RECEIPT_PREFIX, counter, width = RECEIPT_DIGITS)
}

/// Builds the payload for `POST /transactions`.
///
/// ## Errors
/// `CartEmpty` if there is nothing to sell.
pub fn draft(cart: &CartLedger, meta: &ReceiptMeta) -> CoreResult<DraftTransaction> {
    if cart.is_empty() {
        return Err(CoreError::CartEmpty);
    }

    Ok(DraftTransaction {
        date: meta.date_string(),
        customer_name: meta.customer_name.clone(),
        products: cart.lines().to_vec(),
        total: cart.total(),
        status: meta.status,
    })
}

/// Live receipt for the current cart.
///
/// Reads the counter, never advances it.
pub fn preview(cart: &CartLedger, meta: &ReceiptMeta, counter: u64) -> Receipt {
    let lines: Vec<ReceiptLine> = cart.lines().iter().map(ReceiptLine::from).collect();

    Receipt {
        receipt_number: placeholder_number(counter),
        date: meta.date_string(),
        customer_name: meta.customer_name.clone(),
        status: meta.status,
        total: lines.iter().map(|l| l.amount).sum(),
        lines,
        provisional: true,
    }
}

/// Receipt for a transaction the authority has confirmed.
pub fn from_transaction(transaction: &Transaction) -> Receipt {
    let lines: Vec<ReceiptLine> = transaction.products.iter().map(ReceiptLine::from).collect();

    Receipt {
        receipt_number: transaction.receipt_number.clone(),
        date: transaction.date.clone(),
        customer_name: transaction.customer_name.clone(),
        status: transaction.status,
        total: lines.iter().map(|l| l.amount).sum(),
        lines,
        provisional: false,
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Renders the receipt as fixed-width text in the style's locale.
///
/// ```text
/// Aiham caraj
/// Barta'a
/// 052-634-3989
/// ----------------------------------------
/// Receipt #: T-00099
/// Date: 2024-05-01
/// Customer: Dana
/// Status: Completed
/// ----------------------------------------
/// Tea × 2                           7.00 S
/// ----------------------------------------
/// Total: 7.00 S
/// ```
pub fn render(receipt: &Receipt, style: &ReceiptStyle) -> String {
    let locale = style.locale;
    let rule = "-".repeat(RECEIPT_WIDTH);
    let mut out = String::new();

    let _ = writeln!(out, "{}", style.business.name);
    for line in &style.business.address_lines {
        let _ = writeln!(out, "{}", line);
    }
    let _ = writeln!(out, "{}", style.business.phone);
    let _ = writeln!(out, "{}", rule);

    let header = [
        (Label::ReceiptNumber, receipt.receipt_number.as_str()),
        (Label::Date, receipt.date.as_str()),
        (Label::Customer, receipt.customer_name.as_str()),
        (Label::Status, locale.text(receipt.status.label())),
    ];
    for (label, value) in header {
        let _ = writeln!(out, "{}: {}", locale.text(label), value);
    }
    let _ = writeln!(out, "{}", rule);

    for line in &receipt.lines {
        let left = format!("{} × {}", line.name, line.quantity);
        let right = style.amount(line.amount);
        let pad = RECEIPT_WIDTH.saturating_sub(left.chars().count() + right.chars().count());
        let _ = writeln!(out, "{}{}{}", left, " ".repeat(pad.max(1)), right);
    }
    let _ = writeln!(out, "{}", rule);

    let _ = writeln!(out, "{} {}", locale.text(Label::Total), style.amount(receipt.total));

    out
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Product;

    fn tea() -> Product {
        Product {
            id: 7,
            name: "Tea".to_string(),
            price: Money::from_cents(350),
            stock: 10,
        }
    }

    fn meta() -> ReceiptMeta {
        ReceiptMeta {
            customer_name: "Dana".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: TransactionStatus::Completed,
        }
    }

    fn style(locale: Locale) -> ReceiptStyle {
        ReceiptStyle {
            business: BusinessIdentity::default(),
            locale,
            currency_symbol: "S".to_string(),
        }
    }

    fn cart_with_tea(qty: u32) -> CartLedger {
        let mut cart = CartLedger::new();
        for _ in 0..qty {
            cart.add_line(&tea()).unwrap();
        }
        cart
    }

    #[test]
    fn test_placeholder_number() {
        assert_eq!(placeholder_number(1), "T-00001");
        assert_eq!(placeholder_number(99), "T-00099");
        assert_eq!(placeholder_number(123456), "T-123456");
    }

    #[test]
    fn test_draft_rejects_empty_cart() {
        let err = draft(&CartLedger::new(), &meta()).unwrap_err();
        assert_eq!(err, CoreError::CartEmpty);
    }

    #[test]
    fn test_draft_copies_cart() {
        let cart = cart_with_tea(2);
        let draft = draft(&cart, &meta()).unwrap();

        assert_eq!(draft.products, cart.lines());
        assert_eq!(draft.total, Money::from_cents(700));
        assert_eq!(draft.date, "2024-05-01");
        assert_eq!(draft.customer_name, "Dana");
    }

    #[test]
    fn test_preview_is_pure() {
        let cart = cart_with_tea(2);
        let before = cart.clone();

        let first = preview(&cart, &meta(), 5);
        let second = preview(&cart, &meta(), 5);

        assert_eq!(first, second);
        assert_eq!(cart, before);
        assert!(first.provisional);
        assert_eq!(first.receipt_number, "T-00005");
        assert_eq!(first.total, Money::from_cents(700));
    }

    #[test]
    fn test_receipt_from_transaction() {
        let tx = Transaction {
            id: 99,
            receipt_number: "T-00099".to_string(),
            date: "2024-05-01".to_string(),
            customer_name: "Dana".to_string(),
            products: cart_with_tea(2).lines().to_vec(),
            total: Money::from_cents(700),
            status: TransactionStatus::Completed,
        };

        let receipt = from_transaction(&tx);

        assert!(!receipt.provisional);
        assert_eq!(receipt.receipt_number, "T-00099");
        assert_eq!(receipt.lines.len(), 1);
        assert_eq!(receipt.total.to_string(), "7.00");
    }

    #[test]
    fn test_total_sums_unrounded_lines() {
        let mut cart = CartLedger::new();
        let cheap = Product {
            id: 1,
            name: "Gum".to_string(),
            price: "0.335".parse().unwrap(),
            stock: 5,
        };
        for _ in 0..3 {
            cart.add_line(&cheap).unwrap();
        }

        let receipt = preview(&cart, &meta(), 1);
        assert_eq!(receipt.lines[0].amount.to_string(), "1.01");
        assert_eq!(receipt.total.to_string(), "1.01");
    }

    #[test]
    fn test_render_english() {
        let receipt = preview(&cart_with_tea(2), &meta(), 99);
        let text = render(&receipt, &style(Locale::En));

        assert!(text.starts_with("Aiham caraj\nBarta'a\n052-634-3989\n"));
        assert!(text.contains("Receipt #: T-00099"));
        assert!(text.contains("Customer: Dana"));
        assert!(text.contains("Status: Completed"));
        assert!(text.contains("Tea × 2"));
        assert!(text.contains("7.00 S"));
        assert!(text.trim_end().ends_with("Total: 7.00 S"));
    }

    #[test]
    fn test_render_uses_locale_labels() {
        let receipt = preview(&cart_with_tea(1), &meta(), 1);
        let text = render(&receipt, &style(Locale::He));

        assert!(text.contains("סך הכל: 3.50 S"));
        assert!(text.contains("הושלם"));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Money::from_cents(700), "S"), "7.00 S");
        assert_eq!(format_amount(Money::from_cents(700), ""), "7.00");
    }
}
