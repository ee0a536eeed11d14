use serde::{Deserialize, Serialize};

/// The eight rating criteria, in the fixed order every scan and table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Criterion {
    Security,
    Insurance,
    Regulatory,
    FeeTransparency,
    TrackRecord,
    WithdrawalFlexibility,
    ReportingAudit,
    CounterpartyDiversification,
}

impl Criterion {
    pub const COUNT: usize = 8;

    pub const fn ordered() -> [Self; Self::COUNT] {
        [
            Self::Security,
            Self::Insurance,
            Self::Regulatory,
            Self::FeeTransparency,
            Self::TrackRecord,
            Self::WithdrawalFlexibility,
            Self::ReportingAudit,
            Self::CounterpartyDiversification,
        ]
    }

    /// Dataset key, matching the JSON field name.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Security => "security",
            Self::Insurance => "insurance",
            Self::Regulatory => "regulatory",
            Self::FeeTransparency => "feeTransparency",
            Self::TrackRecord => "trackRecord",
            Self::WithdrawalFlexibility => "withdrawalFlexibility",
            Self::ReportingAudit => "reportingAudit",
            Self::CounterpartyDiversification => "counterpartyDiversification",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Insurance => "Insurance",
            Self::Regulatory => "Regulatory",
            Self::FeeTransparency => "Fee Transparency",
            Self::TrackRecord => "Track Record",
            Self::WithdrawalFlexibility => "Withdrawal Flexibility",
            Self::ReportingAudit => "Reporting & Audit",
            Self::CounterpartyDiversification => "Counterparty Diversification",
        }
    }
}

/// Per-criterion ratings for one provider, on a 1-10 scale by dataset convention.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderScores {
    pub security: f64,
    pub insurance: f64,
    pub regulatory: f64,
    pub fee_transparency: f64,
    pub track_record: f64,
    pub withdrawal_flexibility: f64,
    pub reporting_audit: f64,
    pub counterparty_diversification: f64,
}

impl ProviderScores {
    pub const fn uniform(value: f64) -> Self {
        Self {
            security: value,
            insurance: value,
            regulatory: value,
            fee_transparency: value,
            track_record: value,
            withdrawal_flexibility: value,
            reporting_audit: value,
            counterparty_diversification: value,
        }
    }

    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Security => self.security,
            Criterion::Insurance => self.insurance,
            Criterion::Regulatory => self.regulatory,
            Criterion::FeeTransparency => self.fee_transparency,
            Criterion::TrackRecord => self.track_record,
            Criterion::WithdrawalFlexibility => self.withdrawal_flexibility,
            Criterion::ReportingAudit => self.reporting_audit,
            Criterion::CounterpartyDiversification => self.counterparty_diversification,
        }
    }

    /// Ratings paired with their criterion, in criteria order.
    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ordered()
            .into_iter()
            .map(move |criterion| (criterion, self.get(criterion)))
    }
}

/// Weight applied to each criterion when folding ratings into a Custody Score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriterionWeights {
    pub security: f64,
    pub insurance: f64,
    pub regulatory: f64,
    pub fee_transparency: f64,
    pub track_record: f64,
    pub withdrawal_flexibility: f64,
    pub reporting_audit: f64,
    pub counterparty_diversification: f64,
}

impl CriterionWeights {
    /// Every criterion weighted 1/8.
    pub fn equal() -> Self {
        let share = 1.0 / Criterion::COUNT as f64;
        Self {
            security: share,
            insurance: share,
            regulatory: share,
            fee_transparency: share,
            track_record: share,
            withdrawal_flexibility: share,
            reporting_audit: share,
            counterparty_diversification: share,
        }
    }

    pub const fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Security => self.security,
            Criterion::Insurance => self.insurance,
            Criterion::Regulatory => self.regulatory,
            Criterion::FeeTransparency => self.fee_transparency,
            Criterion::TrackRecord => self.track_record,
            Criterion::WithdrawalFlexibility => self.withdrawal_flexibility,
            Criterion::ReportingAudit => self.reporting_audit,
            Criterion::CounterpartyDiversification => self.counterparty_diversification,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Criterion, f64)> + '_ {
        Criterion::ordered()
            .into_iter()
            .map(move |criterion| (criterion, self.get(criterion)))
    }

    pub fn total(&self) -> f64 {
        self.iter().map(|(_, weight)| weight).sum()
    }
}
