use serde::Serialize;

use super::{top_of_type, ToolError, RECOMMENDATION_LIMIT};
use crate::dataset::{CustodyTypeId, ProviderSource};
use crate::scoring::RankedProvider;

pub const START_NODE: &str = "start";

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct TreeOption {
    pub label: &'static str,
    pub next: &'static str,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct QuestionNode {
    pub id: &'static str,
    pub question: &'static str,
    pub options: &'static [TreeOption],
}

#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultNode {
    pub id: &'static str,
    pub custody_type: CustodyTypeId,
    pub type_name: &'static str,
    pub reason: &'static str,
}

const fn option(label: &'static str, next: &'static str) -> TreeOption {
    TreeOption { label, next }
}

static QUESTIONS: [QuestionNode; 7] = [
    QuestionNode {
        id: START_NODE,
        question: "What kind of Bitcoin holder are you?",
        options: &[
            option("Individual investor", "individual-amount"),
            option("Family office or high-net-worth individual", "family-control"),
            option("Institution, fund, or RIA", "institution-reg"),
        ],
    },
    QuestionNode {
        id: "individual-amount",
        question: "How much Bitcoin do you hold?",
        options: &[
            option("Under $50K", "small-tech"),
            option("$50K to $500K", "medium-control"),
            option("Over $500K", "family-control"),
        ],
    },
    QuestionNode {
        id: "small-tech",
        question: "Are you comfortable managing hardware wallets?",
        options: &[
            option("Yes, I want full control", "result-cold-storage"),
            option("Somewhat, with a safety net", "result-collaborative"),
            option("No, I want simplicity", "result-exchange"),
        ],
    },
    QuestionNode {
        id: "medium-control",
        question: "How important is holding your own keys?",
        options: &[
            option("Critical, I hold every key", "result-self-custody"),
            option("Important, but I want backup help", "result-collaborative"),
            option("Not important, security and compliance come first", "result-qualified"),
        ],
    },
    QuestionNode {
        id: "family-control",
        question: "What matters most to you?",
        options: &[
            option("Removing single points of failure", "result-multi-institution"),
            option("Holding keys with professional support", "result-collaborative"),
            option("Maximum regulatory compliance", "result-qualified"),
        ],
    },
    QuestionNode {
        id: "institution-reg",
        question: "Do you need a qualified custodian for regulatory compliance?",
        options: &[
            option("Yes, it is required", "institution-risk"),
            option("No, we have flexibility", "family-control"),
        ],
    },
    QuestionNode {
        id: "institution-risk",
        question: "Is removing single-custodian risk a priority?",
        options: &[
            option("Yes, diversify across custodians", "result-multi-institution"),
            option("No, one strong custodian is fine", "result-qualified"),
        ],
    },
];

static RESULTS: [ResultNode; 6] = [
    ResultNode {
        id: "result-multi-institution",
        custody_type: CustodyTypeId::MultiInstitution,
        type_name: "Multi-Institution Custody",
        reason: "Keys are spread across independent custodians so no single party can move or lose your Bitcoin.",
    },
    ResultNode {
        id: "result-self-custody",
        custody_type: CustodyTypeId::SelfCustody,
        type_name: "Self-Custody / Multisig",
        reason: "You hold every key. Maximum sovereignty for technically capable holders.",
    },
    ResultNode {
        id: "result-exchange",
        custody_type: CustodyTypeId::ExchangeCustody,
        type_name: "Exchange Custody",
        reason: "The simplest option for small balances. Revisit self-custody or collaborative custody as holdings grow.",
    },
    ResultNode {
        id: "result-qualified",
        custody_type: CustodyTypeId::QualifiedCustodian,
        type_name: "Qualified Custodian",
        reason: "Regulated institutional custody with insurance, compliance, and audit trails.",
    },
    ResultNode {
        id: "result-cold-storage",
        custody_type: CustodyTypeId::ColdStorage,
        type_name: "Cold Storage / Hardware",
        reason: "Air-gapped keys for long-term holdings at low cost.",
    },
    ResultNode {
        id: "result-collaborative",
        custody_type: CustodyTypeId::CollaborativeCustody,
        type_name: "Collaborative Custody",
        reason: "You hold most keys while a provider keeps a backup key for recovery and inheritance.",
    },
];

/// A node as presented to the visitor.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TreeNode<'a> {
    Question(&'static QuestionNode),
    Result(Outcome<'a>),
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Outcome<'a> {
    #[serde(flatten)]
    pub node: &'static ResultNode,
    pub providers: Vec<RankedProvider<'a>>,
}

pub fn question_nodes() -> &'static [QuestionNode] {
    &QUESTIONS
}

pub fn result_nodes() -> &'static [ResultNode] {
    &RESULTS
}

/// Next node id after picking the 0-based `choice` at `id`.
pub fn step(id: &str, choice: usize) -> Result<&'static str, ToolError> {
    if let Some(question) = QUESTIONS.iter().find(|node| node.id == id) {
        return question
            .options
            .get(choice)
            .map(|option| option.next)
            .ok_or_else(|| ToolError::UnknownOption {
                node: id.to_string(),
                option: choice,
            });
    }
    if RESULTS.iter().any(|node| node.id == id) {
        return Err(ToolError::UnknownOption {
            node: id.to_string(),
            option: choice,
        });
    }
    Err(ToolError::UnknownNode(id.to_string()))
}

/// Resolves a node id. Result nodes carry the top-ranked providers of their custody type.
pub fn node<'a, S>(source: &'a S, id: &str) -> Result<TreeNode<'a>, ToolError>
where
    S: ProviderSource + ?Sized,
{
    if let Some(question) = QUESTIONS.iter().find(|node| node.id == id) {
        return Ok(TreeNode::Question(question));
    }
    let result = RESULTS
        .iter()
        .find(|node| node.id == id)
        .ok_or_else(|| ToolError::UnknownNode(id.to_string()))?;
    Ok(TreeNode::Result(Outcome {
        node: result,
        providers: top_of_type(source, result.custody_type, RECOMMENDATION_LIMIT),
    }))
}

/// Follows `choices` from the start node.
pub fn walk<'a, S>(source: &'a S, choices: &[usize]) -> Result<TreeNode<'a>, ToolError>
where
    S: ProviderSource + ?Sized,
{
    let mut current = START_NODE;
    for &choice in choices {
        current = step(current, choice)?;
    }
    node(source, current)
}
