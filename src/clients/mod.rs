use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

/// length of a national identity document (DNI)
pub const DNI_LENGTH: usize = 8;
/// length of a taxpayer registry number (RUC)
pub const RUC_LENGTH: usize = 11;

/// borrower record, validated at the boundary before it reaches the core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum ClientProfile {
    /// individual borrower
    #[serde(rename = "NATURAL")]
    Natural(NaturalPerson),
    /// company borrower
    #[serde(rename = "JURIDICA")]
    Juridical(JuridicalPerson),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NaturalPerson {
    pub dni: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_pep: bool,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JuridicalPerson {
    pub ruc: String,
    pub business_name: String,
    pub incorporation_date: Option<NaiveDate>,
    pub legal_representative_dni: String,
    pub legal_representative_name: String,
    pub fiscal_address: Option<String>,
    #[serde(default)]
    pub is_pep: bool,
    #[serde(flatten)]
    pub contact: ContactDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ClientProfile {
    /// DNI for individuals, RUC for companies
    pub fn document(&self) -> &str {
        match self {
            ClientProfile::Natural(p) => &p.dni,
            ClientProfile::Juridical(p) => &p.ruc,
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            ClientProfile::Natural(p) => format!("{} {}", p.first_name, p.last_name),
            ClientProfile::Juridical(p) => p.business_name.clone(),
        }
    }

    /// politically exposed person
    pub fn is_pep(&self) -> bool {
        match self {
            ClientProfile::Natural(p) => p.is_pep,
            ClientProfile::Juridical(p) => p.is_pep,
        }
    }

    pub fn contact(&self) -> &ContactDetails {
        match self {
            ClientProfile::Natural(p) => &p.contact,
            ClientProfile::Juridical(p) => &p.contact,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            ClientProfile::Natural(p) => {
                check_digits("DNI", &p.dni, DNI_LENGTH)?;
                check_present("first name", &p.first_name)?;
                check_present("last name", &p.last_name)?;
            }
            ClientProfile::Juridical(p) => {
                check_digits("RUC", &p.ruc, RUC_LENGTH)?;
                check_present("business name", &p.business_name)?;
                check_digits("legal representative DNI", &p.legal_representative_dni, DNI_LENGTH)?;
                check_present("legal representative name", &p.legal_representative_name)?;
            }
        }

        if let Some(email) = &self.contact().email {
            if !email.contains('@') {
                return Err(invalid(format!("malformed email: {}", email)));
            }
        }

        Ok(())
    }
}

fn check_digits(field: &str, value: &str, length: usize) -> Result<()> {
    if value.len() != length || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("{} must be exactly {} digits", field, length)));
    }
    Ok(())
}

fn check_present(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(format!("{} is required", field)));
    }
    Ok(())
}

fn invalid(message: String) -> LedgerError {
    LedgerError::InvalidClientProfile { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natural() -> ClientProfile {
        ClientProfile::Natural(NaturalPerson {
            dni: "45678912".to_string(),
            first_name: "Rosa".to_string(),
            last_name: "Quispe".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1988, 4, 2),
            is_pep: false,
            contact: ContactDetails {
                email: Some("rosa@example.com".to_string()),
                ..ContactDetails::default()
            },
        })
    }

    fn juridical() -> ClientProfile {
        ClientProfile::Juridical(JuridicalPerson {
            ruc: "20123456789".to_string(),
            business_name: "Panaderia El Sol SAC".to_string(),
            incorporation_date: None,
            legal_representative_dni: "40123456".to_string(),
            legal_representative_name: "Luis Huaman".to_string(),
            fiscal_address: Some("Av. Grau 120".to_string()),
            is_pep: true,
            contact: ContactDetails::default(),
        })
    }

    #[test]
    fn test_valid_profiles() {
        assert!(natural().validate().is_ok());
        assert!(juridical().validate().is_ok());
        assert_eq!(natural().document(), "45678912");
        assert_eq!(natural().display_name(), "Rosa Quispe");
        assert_eq!(juridical().document(), "20123456789");
        assert!(juridical().is_pep());
    }

    #[test]
    fn test_document_lengths_enforced() {
        let mut profile = natural();
        if let ClientProfile::Natural(p) = &mut profile {
            p.dni = "1234567".to_string();
        }
        assert!(profile.validate().unwrap_err().is_validation());

        let mut profile = juridical();
        if let ClientProfile::Juridical(p) = &mut profile {
            p.ruc = "2012345678X".to_string();
        }
        assert!(matches!(
            profile.validate(),
            Err(LedgerError::InvalidClientProfile { .. })
        ));

        let mut profile = juridical();
        if let ClientProfile::Juridical(p) = &mut profile {
            p.legal_representative_dni = "401234567".to_string();
        }
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_missing_names_and_bad_email() {
        let mut profile = natural();
        if let ClientProfile::Natural(p) = &mut profile {
            p.last_name = "  ".to_string();
        }
        assert!(profile.validate().is_err());

        let mut profile = natural();
        if let ClientProfile::Natural(p) = &mut profile {
            p.contact.email = Some("not-an-email".to_string());
        }
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_kind_tag_in_json() {
        let json = serde_json::to_string(&juridical()).unwrap();
        assert!(json.contains("\"kind\":\"JURIDICA\""));

        let raw = r#"{
            "kind": "NATURAL",
            "dni": "70001122",
            "first_name": "Ana",
            "last_name": "Torres",
            "birth_date": null,
            "phone": "987654321"
        }"#;
        let profile: ClientProfile = serde_json::from_str(raw).unwrap();
        assert!(profile.validate().is_ok());
        assert!(!profile.is_pep());
        assert_eq!(profile.contact().phone.as_deref(), Some("987654321"));
    }
}
