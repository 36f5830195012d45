//! Review queue statistics for the compliance center

use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use shared_types::{ComplianceItem, ComplianceStatus, RiskLevel};

/// Headline numbers shown above the review queue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub pending: usize,
    pub in_review: usize,
    pub approved: usize,
    pub rejected: usize,
    pub expired: usize,
    pub high_risk: usize,
    /// Items not yet approved whose due date has passed
    pub overdue: usize,
    /// Approved items as a rounded percentage of all items
    pub compliance_rate: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

/// Parse a due date given either as `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

pub fn is_overdue(item: &ComplianceItem, today: NaiveDate) -> bool {
    if item.status == ComplianceStatus::Approved {
        return false;
    }
    match parse_due_date(&item.due_date) {
        Some(due) => due < today,
        None => {
            tracing::warn!(item = %item.id, due_date = %item.due_date, "unparseable due date");
            false
        }
    }
}

/// Completion shown on an item's progress bar
pub fn review_progress(status: ComplianceStatus) -> u8 {
    match status {
        ComplianceStatus::Approved => 100,
        ComplianceStatus::InReview => 60,
        _ => 30,
    }
}

pub fn summarize(items: &[ComplianceItem], today: NaiveDate) -> ComplianceSummary {
    let mut summary = ComplianceSummary {
        total: items.len(),
        ..Default::default()
    };

    for item in items {
        match item.status {
            ComplianceStatus::Pending => summary.pending += 1,
            ComplianceStatus::InReview => summary.in_review += 1,
            ComplianceStatus::Approved => summary.approved += 1,
            ComplianceStatus::Rejected => summary.rejected += 1,
            ComplianceStatus::Expired => summary.expired += 1,
        }
        if item.risk_level == RiskLevel::High {
            summary.high_risk += 1;
        }
        if is_overdue(item, today) {
            summary.overdue += 1;
        }
    }

    summary.compliance_rate = percentage(summary.approved, summary.total);
    summary
}

pub fn risk_distribution(items: &[ComplianceItem]) -> RiskDistribution {
    let mut dist = RiskDistribution::default();
    for item in items {
        match item.risk_level {
            RiskLevel::Low => dist.low += 1,
            RiskLevel::Medium => dist.medium += 1,
            RiskLevel::High => dist.high += 1,
        }
    }
    dist
}

/// Open items that are overdue or high risk, highest risk first, then earliest due
pub fn needs_attention(items: &[ComplianceItem], today: NaiveDate) -> Vec<&ComplianceItem> {
    let mut flagged: Vec<&ComplianceItem> = items
        .iter()
        .filter(|item| {
            matches!(
                item.status,
                ComplianceStatus::Pending | ComplianceStatus::InReview
            )
        })
        .filter(|item| item.risk_level == RiskLevel::High || is_overdue(item, today))
        .collect();

    flagged.sort_by(|a, b| {
        b.risk_level
            .cmp(&a.risk_level)
            .then_with(|| due_sort_key(a).cmp(&due_sort_key(b)))
    });
    flagged
}

/// Undated items sort after dated ones
fn due_sort_key(item: &ComplianceItem) -> (u8, NaiveDate) {
    parse_due_date(&item.due_date).map_or((1, NaiveDate::MAX), |d| (0, d))
}

pub(crate) fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u8
}

#[cfg(test)]
pub(crate) mod fixtures {
    use shared_types::{ComplianceItem, ComplianceKind, ComplianceStatus, RiskLevel};

    pub fn item(
        id: &str,
        kind: ComplianceKind,
        status: ComplianceStatus,
        risk_level: RiskLevel,
        due_date: &str,
    ) -> ComplianceItem {
        ComplianceItem {
            id: id.to_string(),
            client: format!("Client {}", id),
            kind,
            status,
            risk_level,
            due_date: due_date.to_string(),
            completed_date: None,
            assigned_to: "Sarah Johnson".to_string(),
            documents: 1,
            notes: String::new(),
        }
    }

    /// The four items on the compliance center's sample board
    pub fn board() -> Vec<ComplianceItem> {
        vec![
            item("1", ComplianceKind::Kyc, ComplianceStatus::InReview, RiskLevel::Low, "2024-01-30"),
            item("2", ComplianceKind::Aml, ComplianceStatus::Pending, RiskLevel::Medium, "2024-01-25"),
            item("3", ComplianceKind::Sanctions, ComplianceStatus::Approved, RiskLevel::Low, "2024-01-20"),
            item("4", ComplianceKind::Pep, ComplianceStatus::Rejected, RiskLevel::High, "2024-01-28"),
        ]
    }
}
