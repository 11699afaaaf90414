use serde::{Deserialize, Serialize};

use crate::decimal::Rate;

/// loan type assigned to records that predate the loan-type field
pub const DEFAULT_LOAN_TYPE: &str = "Personal Loan";

/// operator-configurable settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub company_name: String,
    pub brand_color: String,
    pub default_interest_rate: Rate,
    pub loan_types: Vec<String>,
    pub payment_channels: Vec<String>,
    pub repayment_periods: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            company_name: "JMS Financial Services".to_string(),
            brand_color: "#0F766E".to_string(),
            default_interest_rate: Rate::from_percentage(15),
            loan_types: vec![
                "Personal Loan".to_string(),
                "Business Loan".to_string(),
                "Emergency Loan".to_string(),
                "Education Loan".to_string(),
            ],
            payment_channels: vec![
                "Cash".to_string(),
                "Bank Transfer".to_string(),
                "Mobile Money".to_string(),
                "Cheque".to_string(),
            ],
            repayment_periods: vec![
                "Days".to_string(),
                "Weeks".to_string(),
                "Months".to_string(),
            ],
        }
    }
}

impl Settings {
    /// loan number for the given sequence, e.g. "JMSFinancialServices_Ln_007"
    ///
    /// whitespace is stripped from the company name; the counter is
    /// zero-padded to three digits and grows unpadded past 999
    pub fn format_loan_number(&self, sequence: u32) -> String {
        let company: String = self
            .company_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!("{}_Ln_{:03}", company, sequence)
    }

    /// shallow merge: fields present in the patch replace, the rest stay
    pub fn apply(&mut self, patch: SettingsPatch) {
        if let Some(company_name) = patch.company_name {
            self.company_name = company_name;
        }
        if let Some(brand_color) = patch.brand_color {
            self.brand_color = brand_color;
        }
        if let Some(default_interest_rate) = patch.default_interest_rate {
            self.default_interest_rate = default_interest_rate;
        }
        if let Some(loan_types) = patch.loan_types {
            self.loan_types = loan_types;
        }
        if let Some(payment_channels) = patch.payment_channels {
            self.payment_channels = payment_channels;
        }
        if let Some(repayment_periods) = patch.repayment_periods {
            self.repayment_periods = repayment_periods;
        }
    }

    /// non-consuming merge, used when restoring snapshots
    pub fn merged(&self, patch: &SettingsPatch) -> Settings {
        let mut settings = self.clone();
        settings.apply(patch.clone());
        settings
    }
}

/// partial settings update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_interest_rate: Option<Rate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loan_types: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_channels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repayment_periods: Option<Vec<String>>,
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        Self {
            company_name: Some(settings.company_name),
            brand_color: Some(settings.brand_color),
            default_interest_rate: Some(settings.default_interest_rate),
            loan_types: Some(settings.loan_types),
            payment_channels: Some(settings.payment_channels),
            repayment_periods: Some(settings.repayment_periods),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.company_name, "JMS Financial Services");
        assert_eq!(settings.default_interest_rate, Rate::from_percentage(15));
        assert_eq!(settings.loan_types.len(), 4);
        assert_eq!(settings.repayment_periods, vec!["Days", "Weeks", "Months"]);
    }

    #[test]
    fn test_loan_number_format() {
        let mut settings = Settings::default();
        settings.company_name = "Acme Micro Credit".to_string();

        assert_eq!(settings.format_loan_number(1), "AcmeMicroCredit_Ln_001");
        assert_eq!(settings.format_loan_number(42), "AcmeMicroCredit_Ln_042");
        assert_eq!(settings.format_loan_number(1000), "AcmeMicroCredit_Ln_1000");
    }

    #[test]
    fn test_patch_merges_only_present_fields() {
        let mut settings = Settings::default();
        settings.apply(SettingsPatch {
            company_name: Some("Acme".to_string()),
            default_interest_rate: Some(Rate::from_percentage(12)),
            ..Default::default()
        });

        assert_eq!(settings.company_name, "Acme");
        assert_eq!(settings.default_interest_rate, Rate::from_percentage(12));
        // untouched fields keep their values
        assert_eq!(settings.brand_color, "#0F766E");
        assert_eq!(settings.payment_channels.len(), 4);
    }

    #[test]
    fn test_patch_round_trip() {
        let settings = Settings::default();
        let patch = SettingsPatch::from(settings.clone());
        assert_eq!(Settings::default().merged(&patch), settings);
    }
}
