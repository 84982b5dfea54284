//! # Locale Tables
//!
//! Three-language UI labels (English, Arabic, Hebrew).
//!
//! Switching locale changes rendering only; nothing in the cart, history or
//! catalog depends on it. Keys match the `data-translate` names used by the
//! web front end (`searchProducts`, `total`, ...).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Locale
// =============================================================================

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
    He,
}

impl Locale {
    pub const ALL: [Locale; 3] = [Locale::En, Locale::Ar, Locale::He];

    /// Two-letter code (`en`, `ar`, `he`).
    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::He => "he",
        }
    }

    /// Arabic and Hebrew render right-to-left.
    pub fn is_rtl(&self) -> bool {
        matches!(self, Locale::Ar | Locale::He)
    }

    /// Looks up the display string for a label in this locale.
    pub fn text(&self, label: Label) -> &'static str {
        match self {
            Locale::En => english(label),
            Locale::Ar => arabic(label),
            Locale::He => hebrew(label),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Locale::ALL
            .into_iter()
            .find(|locale| locale.code() == wanted)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "locale".to_string(),
                allowed: Locale::ALL.iter().map(|l| l.code().to_string()).collect(),
            })
    }
}

// =============================================================================
// Labels
// =============================================================================

/// Every translatable UI string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Label {
    SearchProducts,
    AvailableProducts,
    Inventory,
    AddProduct,
    ProductName,
    Price,
    Quantity,
    ShoppingCart,
    Total,
    CustomerName,
    Date,
    Status,
    Pending,
    Completed,
    Cancelled,
    CompleteTransaction,
    ExportReceipt,
    ClearCart,
    ReceiptPreview,
    Remove,
    Edit,
    Delete,
    ReceiptNumber,
    Customer,
    Product,
    Amount,
    ConfirmClearCart,
    ConfirmDeleteTransaction,
    ConfirmDeleteProduct,
}

impl Label {
    pub const ALL: [Label; 29] = [
        Label::SearchProducts,
        Label::AvailableProducts,
        Label::Inventory,
        Label::AddProduct,
        Label::ProductName,
        Label::Price,
        Label::Quantity,
        Label::ShoppingCart,
        Label::Total,
        Label::CustomerName,
        Label::Date,
        Label::Status,
        Label::Pending,
        Label::Completed,
        Label::Cancelled,
        Label::CompleteTransaction,
        Label::ExportReceipt,
        Label::ClearCart,
        Label::ReceiptPreview,
        Label::Remove,
        Label::Edit,
        Label::Delete,
        Label::ReceiptNumber,
        Label::Customer,
        Label::Product,
        Label::Amount,
        Label::ConfirmClearCart,
        Label::ConfirmDeleteTransaction,
        Label::ConfirmDeleteProduct,
    ];
}

fn english(label: Label) -> &'static str {
    match label {
        Label::SearchProducts => "Search Products",
        Label::AvailableProducts => "Available Products",
        Label::Inventory => "Inventory Management",
        Label::AddProduct => "Add New Product",
        Label::ProductName => "Product Name",
        Label::Price => "Price",
        Label::Quantity => "Quantity",
        Label::ShoppingCart => "Shopping Cart",
        Label::Total => "Total:",
        Label::CustomerName => "Customer Name",
        Label::Date => "Date",
        Label::Status => "Status",
        Label::Pending => "Pending",
        Label::Completed => "Completed",
        Label::Cancelled => "Cancelled",
        Label::CompleteTransaction => "Complete Transaction",
        Label::ExportReceipt => "Export to PNG",
        Label::ClearCart => "Clear Cart",
        Label::ReceiptPreview => "Receipt Preview",
        Label::Remove => "Remove",
        Label::Edit => "Edit",
        Label::Delete => "Delete",
        Label::ReceiptNumber => "Receipt #",
        Label::Customer => "Customer",
        Label::Product => "Product",
        Label::Amount => "Amount",
        Label::ConfirmClearCart => "Are you sure you want to clear the cart?",
        Label::ConfirmDeleteTransaction => "Are you sure you want to delete this transaction?",
        Label::ConfirmDeleteProduct => "Are you sure you want to delete this product?",
    }
}

fn arabic(label: Label) -> &'static str {
    match label {
        Label::SearchProducts => "بحث عن المنتجات",
        Label::AvailableProducts => "المنتجات المتاحة",
        Label::Inventory => "إدارة المخزون",
        Label::AddProduct => "إضافة منتج جديد",
        Label::ProductName => "اسم المنتج",
        Label::Price => "السعر",
        Label::Quantity => "الكمية",
        Label::ShoppingCart => "عربة التسوق",
        Label::Total => "المجموع:",
        Label::CustomerName => "اسم العميل",
        Label::Date => "التاريخ",
        Label::Status => "الحالة",
        Label::Pending => "قيد الانتظار",
        Label::Completed => "مكتمل",
        Label::Cancelled => "ملغى",
        Label::CompleteTransaction => "إتمام المعاملة",
        Label::ExportReceipt => "تصدير إلى Png",
        Label::ClearCart => "تفريغ العربة",
        Label::ReceiptPreview => "معاينة الإيصال",
        Label::Remove => "إزالة",
        Label::Edit => "تعديل",
        Label::Delete => "حذف",
        Label::ReceiptNumber => "رقم الإيصال",
        Label::Customer => "العميل",
        Label::Product => "المنتج",
        Label::Amount => "المبلغ",
        Label::ConfirmClearCart => "هل أنت متأكد أنك تريد تفريغ العربة؟",
        Label::ConfirmDeleteTransaction => "هل أنت متأكد أنك تريد حذف هذه المعاملة؟",
        Label::ConfirmDeleteProduct => "هل أنت متأكد أنك تريد حذف هذا المنتج؟",
    }
}

fn hebrew(label: Label) -> &'static str {
    match label {
        Label::SearchProducts => "חפש מוצרים",
        Label::AvailableProducts => "מוצרים זמינים",
        Label::Inventory => "ניהול מלאי",
        Label::AddProduct => "הוסף מוצר חדש",
        Label::ProductName => "שם המוצר",
        Label::Price => "מחיר",
        Label::Quantity => "כמות",
        Label::ShoppingCart => "עגלת קניות",
        Label::Total => "סך הכל:",
        Label::CustomerName => "שם הלקוח",
        Label::Date => "תאריך",
        Label::Status => "סטטוס",
        Label::Pending => "ממתין",
        Label::Completed => "הושלם",
        Label::Cancelled => "בוטל",
        Label::CompleteTransaction => "השלם עסקה",
        Label::ExportReceipt => "ייצא ל-Word",
        Label::ClearCart => "נקה עגלה",
        Label::ReceiptPreview => "תצוגה מקדימה של הקבלה",
        Label::Remove => "הסר",
        Label::Edit => "ערוך",
        Label::Delete => "מחק",
        Label::ReceiptNumber => "מספר קבלה",
        Label::Customer => "לקוח",
        Label::Product => "מוצר",
        Label::Amount => "סכום",
        Label::ConfirmClearCart => "האם אתה בטוח שברצונך לנקות את העגלה?",
        Label::ConfirmDeleteTransaction => "האם אתה בטוח שברצונך למחוק עסקה זו?",
        Label::ConfirmDeleteProduct => "האם אתה בטוח שברצונך למחוק מוצר זה?",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_label_translated() {
        for locale in Locale::ALL {
            for label in Label::ALL {
                assert!(!locale.text(label).is_empty(), "{locale} {label:?}");
            }
        }
    }

    #[test]
    fn test_lookup() {
        assert_eq!(Locale::En.text(Label::Total), "Total:");
        assert_eq!(Locale::Ar.text(Label::Total), "المجموع:");
        assert_eq!(Locale::He.text(Label::ClearCart), "נקה עגלה");
    }

    #[test]
    fn test_parse_locale() {
        assert_eq!("AR".parse::<Locale>().unwrap(), Locale::Ar);
        assert!("fr".parse::<Locale>().is_err());
        assert!(Locale::He.is_rtl());
        assert!(!Locale::En.is_rtl());
    }

    #[test]
    fn test_label_keys_match_front_end() {
        let key = serde_json::to_string(&Label::SearchProducts).unwrap();
        assert_eq!(key, "\"searchProducts\"");
    }
}
