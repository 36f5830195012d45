//! Payment method statistics

use serde::Serialize;
use shared_types::{PaymentMethod, PaymentStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PaymentSummary {
    pub total: usize,
    pub active: usize,
    /// Awaiting verification (e.g. micro-deposits)
    pub pending: usize,
    pub failed: usize,
    /// Distinct clients with at least one active method
    pub clients_ready: usize,
}

pub fn summarize_payments(methods: &[PaymentMethod]) -> PaymentSummary {
    let mut summary = PaymentSummary {
        total: methods.len(),
        ..Default::default()
    };
    let mut ready: Vec<&str> = Vec::new();

    for method in methods {
        match method.status {
            PaymentStatus::Active => {
                summary.active += 1;
                if !ready.contains(&method.client_id.as_str()) {
                    ready.push(&method.client_id);
                }
            }
            PaymentStatus::Pending => summary.pending += 1,
            PaymentStatus::Failed => summary.failed += 1,
        }
    }

    summary.clients_ready = ready.len();
    summary
}
