//! Embedded template sources
//!
//! Template bodies live under `templates/` and are compiled into the binary.

/// Service agreement - loaded from templates/service_agreement.txt
const SERVICE_AGREEMENT_TEMPLATE: &str = include_str!("../../templates/service_agreement.txt");

/// Non-disclosure agreement - loaded from templates/nda.txt
const NDA_TEMPLATE: &str = include_str!("../../templates/nda.txt");

/// Client welcome email - loaded from templates/client_welcome.txt
const CLIENT_WELCOME_TEMPLATE: &str = include_str!("../../templates/client_welcome.txt");

/// KYC reminder email - loaded from templates/kyc_reminder.txt
const KYC_REMINDER_TEMPLATE: &str = include_str!("../../templates/kyc_reminder.txt");

/// Get an embedded template body by id
pub fn get_embedded_template(id: &str) -> Option<&'static str> {
    match id {
        "service_agreement" => Some(SERVICE_AGREEMENT_TEMPLATE),
        "nda" => Some(NDA_TEMPLATE),
        "client_welcome" => Some(CLIENT_WELCOME_TEMPLATE),
        "kyc_reminder" => Some(KYC_REMINDER_TEMPLATE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_embedded_templates_load() {
        for id in ["service_agreement", "nda", "client_welcome", "kyc_reminder"] {
            let body = get_embedded_template(id);
            assert!(body.is_some(), "missing template {}", id);
            assert!(!body.unwrap().trim().is_empty());
        }
        assert!(get_embedded_template("invoice").is_none());
    }
}
