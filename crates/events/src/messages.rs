//! Plain-text notifications sent by the API.

use postertrack_core::roles::Role;

/// Subject and body of one outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Login details for a newly created account.
    pub fn account_credentials(display_name: &str, email: &str, password: &str, role: Role) -> Self {
        Self {
            subject: "Your PosterTrack Account Details".to_string(),
            body: format!(
                "Hello {display_name},\n\n\
                 A PosterTrack account ({role}) has been created for you.\n\n\
                 Email: {email}\n\
                 Password: {password}\n\n\
                 Please change your password after your first login."
            ),
        }
    }

    /// Sent to the field auditor when a compliance report is disapproved.
    pub fn compliance_alert(
        auditor_name: &str,
        site_code: &str,
        campaign: Option<&str>,
        report_id: i64,
    ) -> Self {
        let campaign = campaign.unwrap_or("your campaign");
        Self {
            subject: format!("Compliance report for {site_code} was disapproved"),
            body: format!(
                "Hello {auditor_name},\n\n\
                 Your compliance report #{report_id} for site {site_code} in {campaign} \
                 was disapproved during review.\n\n\
                 Please revisit the site and submit new evidence."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_include_login_details() {
        let n = Notification::account_credentials("Ada Obi", "ada@example.com", "s3cretPass!x", Role::FieldAuditor);
        assert_eq!(n.subject, "Your PosterTrack Account Details");
        assert!(n.body.contains("Email: ada@example.com"));
        assert!(n.body.contains("Password: s3cretPass!x"));
        assert!(n.body.contains("FIELD_AUDITOR"));
    }

    #[test]
    fn alert_names_site_and_campaign() {
        let n = Notification::compliance_alert("Ada", "SITE-0003", Some("Launch"), 12);
        assert!(n.subject.contains("SITE-0003"));
        assert!(n.body.contains("#12"));
        assert!(n.body.contains("in Launch"));

        let unnamed = Notification::compliance_alert("Ada", "SITE-0003", None, 12);
        assert!(unnamed.body.contains("in your campaign"));
    }
}
