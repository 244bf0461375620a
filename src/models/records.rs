//! Invoice, revenue and expense records as returned by the list
//! endpoints. The backup bundle embeds these arrays unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line item on a supplier invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub id: Uuid,
    pub name: String,
    pub quantity: f64,
    /// Unit of measure, e.g. "бр." (pieces).
    pub unit: String,
    pub unit_price: f64,
    pub total_price: f64,
    #[serde(default)]
    pub vat_amount: f64,
}

/// A supplier invoice. VAT on it is input-VAT credit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    pub supplier: String,
    pub invoice_number: String,
    pub amount_without_vat: f64,
    pub vat_amount: f64,
    pub total_amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<InvoiceItem>>,
    pub created_at: DateTime<Utc>,
}

/// Daily turnover. `fiscal_revenue` went through the cash register and
/// is subject to VAT; `pocket_money` is excluded from VAT computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    pub date: DateTime<Utc>,
    pub fiscal_revenue: f64,
    pub pocket_money: f64,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// An expense without a supplier invoice behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub user_id: String,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    pub description: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
