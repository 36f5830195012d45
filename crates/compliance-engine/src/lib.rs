pub mod notifications;
pub mod payments;
pub mod summary;

use chrono::NaiveDate;
use serde::Serialize;
use shared_types::{ComplianceItem, Notification, PaymentMethod};

pub use notifications::{mark_all_read, summarize_notifications, NotificationSummary};
pub use payments::{summarize_payments, PaymentSummary};
pub use summary::{
    is_overdue, needs_attention, review_progress, risk_distribution, summarize, ComplianceSummary,
    RiskDistribution,
};

/// Everything the compliance dashboard shows for one organisation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceReport {
    pub as_of: NaiveDate,
    pub summary: ComplianceSummary,
    pub risk: RiskDistribution,
    /// Ids of open items that are overdue or high risk, most urgent first
    pub attention: Vec<String>,
}

/// ComplianceEngine entry point
pub struct ComplianceEngine {
    today: NaiveDate,
}

impl ComplianceEngine {
    /// Engine evaluating due dates against the current UTC date
    pub fn new() -> Self {
        Self::as_of(chrono::Utc::now().date_naive())
    }

    /// Engine evaluating due dates against a fixed date
    pub fn as_of(today: NaiveDate) -> Self {
        Self { today }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn report(&self, items: &[ComplianceItem]) -> ComplianceReport {
        let report = ComplianceReport {
            as_of: self.today,
            summary: summarize(items, self.today),
            risk: risk_distribution(items),
            attention: needs_attention(items, self.today)
                .into_iter()
                .map(|item| item.id.clone())
                .collect(),
        };
        tracing::info!(
            total = report.summary.total,
            overdue = report.summary.overdue,
            rate = report.summary.compliance_rate,
            "compliance report generated"
        );
        report
    }

    pub fn payments(&self, methods: &[PaymentMethod]) -> PaymentSummary {
        summarize_payments(methods)
    }

    pub fn notifications(&self, notifications: &[Notification]) -> NotificationSummary {
        summarize_notifications(notifications)
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::fixtures::board;
    use pretty_assertions::assert_eq;

    fn engine() -> ComplianceEngine {
        ComplianceEngine::as_of(NaiveDate::from_ymd_opt(2024, 1, 27).unwrap())
    }

    #[test]
    fn test_report_on_sample_board() {
        let report = engine().report(&board());

        assert_eq!(report.summary.total, 4);
        assert_eq!(report.summary.compliance_rate, 25);
        assert_eq!(report.risk.high, 1);
        // The only high-risk item is already rejected; item 2 is overdue
        assert_eq!(report.attention, vec!["2"]);
    }

    #[test]
    fn test_report_serializes() {
        let json = serde_json::to_value(engine().report(&board())).unwrap();
        assert_eq!(json["as_of"], "2024-01-27");
        assert_eq!(json["summary"]["overdue"], 1);
    }

    #[test]
    fn test_empty_report() {
        let report = engine().report(&[]);
        assert_eq!(report.summary, ComplianceSummary::default());
        assert!(report.attention.is_empty());
    }
}
