use serde::{Deserialize, Serialize};

/// Totals computed by `GET /statistics/summary`.
///
/// All VAT math happens server-side: `fiscal_vat` is the VAT portion of
/// the fiscal turnover and `vat_to_pay` is sales VAT minus the input-VAT
/// credit from supplier invoices. The client only displays these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsSummary {
    pub total_invoice_amount: f64,
    pub total_invoice_vat: f64,
    pub total_fiscal_revenue: f64,
    pub total_pocket_money: f64,
    pub fiscal_vat: f64,
    pub vat_to_pay: f64,
    pub total_non_invoice_expenses: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub profit: f64,
    pub invoice_count: u32,
}
