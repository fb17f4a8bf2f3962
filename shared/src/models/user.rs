//! Member profile (`GET /users/me`)

use crate::error::ErrorCode;
use crate::money::amount;
use crate::util::id_string;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Medical certificate review state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicalCertificateStatus {
    Valid,
    Expired,
    Pending,
    #[default]
    Missing,
}

/// Current member profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub medical_certificate: MedicalCertificateStatus,
    #[serde(default)]
    pub medical_certificate_expires_on: Option<NaiveDate>,
    /// Account balance; negative means the member owes the club
    #[serde(default, with = "amount")]
    pub balance: Decimal,
    #[serde(default)]
    pub has_debt: bool,
}

/// Why a member may not book right now
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EligibilityIssue {
    #[error("Upload a medical certificate before booking")]
    MedicalCertificateMissing,
    #[error("Your medical certificate expired on {0}, upload a new one to book")]
    MedicalCertificateExpired(String),
    #[error("Your medical certificate is still being reviewed")]
    MedicalCertificatePending,
    #[error("Settle your outstanding balance before booking")]
    OutstandingDebt,
}

impl EligibilityIssue {
    /// Error code the backend would answer with for the same gate
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MedicalCertificateMissing => ErrorCode::MedicalCertificateMissing,
            Self::MedicalCertificateExpired(_) => ErrorCode::MedicalCertificateExpired,
            Self::MedicalCertificatePending => ErrorCode::MedicalCertificatePending,
            Self::OutstandingDebt => ErrorCode::OutstandingDebt,
        }
    }
}

impl UserProfile {
    /// Check the booking gates against `today`
    ///
    /// The backend enforces the same gates; this only avoids a request that
    /// is bound to fail.
    pub fn eligibility(&self, today: NaiveDate) -> Result<(), EligibilityIssue> {
        match self.medical_certificate {
            MedicalCertificateStatus::Missing => {
                return Err(EligibilityIssue::MedicalCertificateMissing);
            }
            MedicalCertificateStatus::Pending => {
                return Err(EligibilityIssue::MedicalCertificatePending);
            }
            MedicalCertificateStatus::Expired => {
                let when = self
                    .medical_certificate_expires_on
                    .map(crate::time::format_date)
                    .unwrap_or_else(|| "an earlier date".to_string());
                return Err(EligibilityIssue::MedicalCertificateExpired(when));
            }
            MedicalCertificateStatus::Valid => {
                if let Some(expires_on) = self.medical_certificate_expires_on
                    && expires_on < today
                {
                    return Err(EligibilityIssue::MedicalCertificateExpired(
                        crate::time::format_date(expires_on),
                    ));
                }
            }
        }

        if self.has_debt || self.balance < Decimal::ZERO {
            return Err(EligibilityIssue::OutstandingDebt);
        }
        Ok(())
    }
}
