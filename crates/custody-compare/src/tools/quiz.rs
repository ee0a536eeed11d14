use serde::{Deserialize, Serialize};

use super::{top_of_type, ToolError, RECOMMENDATION_LIMIT};
use crate::dataset::{CustodyTypeId, ProviderSource};
use crate::scoring::RankedProvider;

macro_rules! answer_set {
    ($name:ident { $($variant:ident => $value:literal : $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        #[serde(rename_all = "lowercase")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn value(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub const fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            pub fn parse(value: &str) -> Option<Self> {
                Self::ALL.iter().copied().find(|candidate| candidate.value() == value)
            }

            fn options() -> Vec<QuizOption> {
                Self::ALL
                    .iter()
                    .map(|option| QuizOption {
                        label: option.label(),
                        value: option.value(),
                    })
                    .collect()
            }
        }
    };
}

answer_set!(Amount {
    Small => "small": "Under $50K",
    Medium => "medium": "$50K to $500K",
    Large => "large": "$500K to $5M",
    Institutional => "institutional": "Over $5M",
});

answer_set!(Technical {
    High => "high": "Very comfortable",
    Medium => "medium": "Somewhat comfortable",
    Low => "low": "Not at all",
});

answer_set!(Decentralization {
    Critical => "critical": "Critical",
    Important => "important": "Important",
    Low => "low": "Not a priority",
});

answer_set!(Regulation {
    Required => "required": "Yes, required",
    Preferred => "preferred": "Preferred",
    None => "none": "Don't care",
});

answer_set!(Frequency {
    Daily => "daily": "Daily",
    Weekly => "weekly": "Weekly",
    Monthly => "monthly": "Monthly",
    Rarely => "rarely": "Rarely",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizOption {
    pub label: &'static str,
    pub value: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub options: Vec<QuizOption>,
}

/// The five quiz questions in the order they are asked.
pub fn questions() -> Vec<Question> {
    vec![
        Question {
            id: "amount",
            text: "How much Bitcoin are you storing?",
            options: Amount::options(),
        },
        Question {
            id: "technical",
            text: "How comfortable are you operating hardware wallets?",
            options: Technical::options(),
        },
        Question {
            id: "decentralization",
            text: "How important is it that no single company controls your Bitcoin?",
            options: Decentralization::options(),
        },
        Question {
            id: "regulation",
            text: "Does your custodian need to be a regulated qualified custodian?",
            options: Regulation::options(),
        },
        Question {
            id: "frequency",
            text: "How often do you need to move your Bitcoin?",
            options: Frequency::options(),
        },
    ]
}

/// Answers as submitted, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnswers {
    pub amount: String,
    pub technical: String,
    pub decentralization: String,
    pub regulation: String,
    pub frequency: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizAnswers {
    pub amount: Amount,
    pub technical: Technical,
    pub decentralization: Decentralization,
    pub regulation: Regulation,
    pub frequency: Frequency,
}

impl TryFrom<RawAnswers> for QuizAnswers {
    type Error = ToolError;

    fn try_from(raw: RawAnswers) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: answer("amount", &raw.amount, Amount::parse)?,
            technical: answer("technical", &raw.technical, Technical::parse)?,
            decentralization: answer(
                "decentralization",
                &raw.decentralization,
                Decentralization::parse,
            )?,
            regulation: answer("regulation", &raw.regulation, Regulation::parse)?,
            frequency: answer("frequency", &raw.frequency, Frequency::parse)?,
        })
    }
}

fn answer<T>(
    question: &'static str,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T, ToolError> {
    parse(value).ok_or_else(|| ToolError::InvalidAnswer {
        question,
        value: value.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub custody_type: CustodyTypeId,
    pub type_name: &'static str,
    pub rationale: &'static str,
}

/// First matching rule wins.
pub fn recommend(answers: &QuizAnswers) -> Recommendation {
    use CustodyTypeId::*;

    let QuizAnswers {
        amount,
        technical,
        decentralization,
        regulation,
        frequency,
    } = *answers;

    let (custody_type, type_name, rationale) = if decentralization == Decentralization::Critical
        && matches!(amount, Amount::Large | Amount::Institutional)
    {
        (
            MultiInstitution,
            "Multi-Institution Custody",
            "Large holdings combined with a need to remove single points of failure call for spreading keys across independent institutions.",
        )
    } else if technical == Technical::High && decentralization == Decentralization::Critical {
        (
            SelfCustody,
            "Self-Custody / Multisig",
            "You have the skills to run your own multisig setup and want full control over every key.",
        )
    } else if technical == Technical::High && matches!(amount, Amount::Medium | Amount::Large) {
        (
            CollaborativeCustody,
            "Collaborative Custody",
            "You can hold your own keys but benefit from a professional backup key for recovery and inheritance.",
        )
    } else if regulation == Regulation::Required || amount == Amount::Institutional {
        (
            QualifiedCustodian,
            "Qualified Custodian",
            "Regulatory obligations or institutional-scale holdings require a qualified custodian.",
        )
    } else if frequency == Frequency::Rarely && technical != Technical::Low {
        (
            ColdStorage,
            "Cold Storage / Hardware",
            "Long-term holdings you rarely touch are best kept offline at minimal cost.",
        )
    } else if amount == Amount::Small && frequency == Frequency::Daily {
        (
            ExchangeCustody,
            "Exchange Custody",
            "Small balances that trade often are most practical to keep on an exchange.",
        )
    } else if decentralization == Decentralization::Important && amount == Amount::Medium {
        (
            CollaborativeCustody,
            "Collaborative Custody",
            "Holding your own keys with professional backup balances control against recoverability.",
        )
    } else {
        (
            QualifiedCustodian,
            "Qualified Custodian",
            "A qualified custodian gives the best balance of security, compliance, and convenience for your profile.",
        )
    };

    Recommendation {
        custody_type,
        type_name,
        rationale,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult<'a> {
    pub answers: QuizAnswers,
    #[serde(flatten)]
    pub recommendation: Recommendation,
    pub providers: Vec<RankedProvider<'a>>,
}

/// Recommendation plus the top-ranked providers of the recommended custody type.
pub fn evaluate<S>(source: &S, answers: QuizAnswers) -> QuizResult<'_>
where
    S: ProviderSource + ?Sized,
{
    let recommendation = recommend(&answers);
    QuizResult {
        answers,
        recommendation,
        providers: top_of_type(source, recommendation.custody_type, RECOMMENDATION_LIMIT),
    }
}
