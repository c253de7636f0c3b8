// Scenario replay
//
// A scenario deploys one controller and applies a list of calls in order.
// Every call records its outcome in the report and is checked against the
// expectation declared in the scenario.

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::{fmt, fs, path::Path};

use dpass_common::{
    access::AccessError,
    asset::{AssetError, AssetKind},
    config::{DPASS_NAME, DPASS_NFT_NAME},
    controller::{ControllerError, Dpass, DpassNft},
    crypto::{Principal, PRINCIPAL_SIZE},
    event::LoggedEvent,
};

/// Principal given either as hex or as a name to derive it from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalRef(String);

impl PrincipalRef {
    pub fn resolve(&self) -> Principal {
        if self.0.len() == PRINCIPAL_SIZE * 2 {
            if let Ok(principal) = self.0.parse() {
                return principal;
            }
        }
        Principal::from_seed(&self.0)
    }
}

impl fmt::Display for PrincipalRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fungible amount, written as a JSON number or as a decimal string
///
/// Values above `u64::MAX` must use the string form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenAmount(pub u128);

impl Serialize for TokenAmount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TokenAmountVisitor;

        impl<'de> Visitor<'de> for TokenAmountVisitor {
            type Value = TokenAmount;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "an unsigned integer or a decimal string")
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(TokenAmount(u128::from(value)))
            }

            fn visit_str<E: de::Error>(self, value: &str) -> std::result::Result<Self::Value, E> {
                value
                    .parse()
                    .map(TokenAmount)
                    .map_err(|e| E::custom(format!("invalid amount '{}': {}", value, e)))
            }
        }

        // Tagged enums buffer their content, which has no u128 slot
        deserializer.deserialize_any(TokenAmountVisitor)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum AssetSpec {
    Fungible {
        #[serde(default)]
        initial_supply: TokenAmount,
    },
    Nft,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Call {
    Pause,
    Unpause,
    TransferOwnership { new_owner: PrincipalRef },
    Mint {
        recipient: PrincipalRef,
        #[serde(default)]
        amount: Option<TokenAmount>,
    },
    Owner,
    Paused,
    BalanceOf { account: PrincipalRef },
    OwnerOf { token_id: u64 },
}

impl Call {
    fn name(&self) -> &'static str {
        match self {
            Call::Pause => "pause",
            Call::Unpause => "unpause",
            Call::TransferOwnership { .. } => "transfer_ownership",
            Call::Mint { .. } => "mint",
            Call::Owner => "owner",
            Call::Paused => "paused",
            Call::BalanceOf { .. } => "balance_of",
            Call::OwnerOf { .. } => "owner_of",
        }
    }
}

/// Expected outcome of a step
///
/// Written as `"ok"`, as an error identifier, or as
/// `{ "error": "<identifier>", "account": "<principal>" }` to also pin the
/// account carried by the error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ExpectationRepr", into = "ExpectationRepr")]
pub enum Expectation {
    #[default]
    Ok,
    Error {
        name: String,
        account: Option<PrincipalRef>,
    },
}

/// JSON forms of an [`Expectation`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectationRepr {
    Name(String),
    Detailed(DetailedExpectation),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetailedExpectation {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<PrincipalRef>,
}

impl From<ExpectationRepr> for Expectation {
    fn from(value: ExpectationRepr) -> Self {
        match value {
            ExpectationRepr::Name(name) if name.eq_ignore_ascii_case("ok") => Expectation::Ok,
            ExpectationRepr::Name(name) => Expectation::Error {
                name,
                account: None,
            },
            ExpectationRepr::Detailed(detailed) => Expectation::Error {
                name: detailed.error,
                account: detailed.account,
            },
        }
    }
}

impl From<Expectation> for ExpectationRepr {
    fn from(value: Expectation) -> Self {
        match value {
            Expectation::Ok => ExpectationRepr::Name("ok".to_owned()),
            Expectation::Error {
                name,
                account: None,
            } => ExpectationRepr::Name(name),
            Expectation::Error { name, account } => {
                ExpectationRepr::Detailed(DetailedExpectation {
                    error: name,
                    account,
                })
            }
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Ok => write!(f, "ok"),
            Expectation::Error {
                name,
                account: None,
            } => write!(f, "{}", name),
            Expectation::Error {
                name,
                account: Some(account),
            } => write!(f, "{}({})", name, account),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    pub caller: PrincipalRef,
    pub call: Call,
    #[serde(default)]
    pub expect: Expectation,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    pub asset: AssetSpec,
    pub owner: PrincipalRef,
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read scenario {}", path.display()))?;
        Self::from_json(&content).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}

// ========================================
// Report
// ========================================

/// Value returned by a successful call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CallValue {
    None,
    Bool(bool),
    Principal(Principal),
    Amount(u128),
    Token(u64),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Ok {
        #[serde(skip_serializing_if = "is_none_value")]
        value: CallValue,
    },
    Error {
        name: &'static str,
        code: u64,
        message: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        account: Option<Principal>,
    },
}

fn is_none_value(value: &CallValue) -> bool {
    *value == CallValue::None
}

impl Outcome {
    fn matches(&self, expectation: &Expectation) -> bool {
        match (self, expectation) {
            (Outcome::Ok { .. }, Expectation::Ok) => true,
            (
                Outcome::Error { name, account, .. },
                Expectation::Error {
                    name: expected,
                    account: expected_account,
                },
            ) => {
                name == expected
                    && expected_account
                        .as_ref()
                        .map_or(true, |expected| *account == Some(expected.resolve()))
            }
            _ => false,
        }
    }
}

impl From<Result<CallValue, ControllerError>> for Outcome {
    fn from(result: Result<CallValue, ControllerError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok { value },
            Err(e) => Outcome::Error {
                name: e.name(),
                code: e.code(),
                message: e.to_string(),
                account: error_account(&e),
            },
        }
    }
}

/// Account named by an error, if any
fn error_account(err: &ControllerError) -> Option<Principal> {
    match err {
        ControllerError::Access(
            AccessError::Unauthorized(account) | AccessError::InvalidArgument(account),
        ) => Some(*account),
        ControllerError::Asset(AssetError::InvalidReceiver { receiver, .. }) => Some(*receiver),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub caller: Principal,
    pub op: &'static str,
    pub outcome: Outcome,
    pub expected: Expectation,
    pub matched: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: Option<String>,
    pub contract: &'static str,
    pub kind: AssetKind,
    pub steps: Vec<StepReport>,
    pub events: Vec<LoggedEvent>,
    pub owner: Principal,
    pub paused: bool,
    pub passed: bool,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|step| !step.matched).count()
    }
}

// ========================================
// Replay
// ========================================

/// Deployed controller of either asset kind
enum Deployment {
    Fungible(Dpass),
    Nft(DpassNft),
}

impl Deployment {
    fn deploy(asset: &AssetSpec, owner: Principal) -> Result<Self, ControllerError> {
        Ok(match asset {
            AssetSpec::Fungible { initial_supply } => {
                Deployment::Fungible(Dpass::deploy_fungible(owner, initial_supply.0)?)
            }
            AssetSpec::Nft => Deployment::Nft(DpassNft::deploy_nft(owner)?),
        })
    }

    fn contract_name(&self) -> &'static str {
        match self {
            Deployment::Fungible(_) => DPASS_NAME,
            Deployment::Nft(_) => DPASS_NFT_NAME,
        }
    }

    fn kind(&self) -> AssetKind {
        match self {
            Deployment::Fungible(c) => c.kind(),
            Deployment::Nft(c) => c.kind(),
        }
    }

    fn owner(&self) -> Principal {
        match self {
            Deployment::Fungible(c) => *c.owner(),
            Deployment::Nft(c) => *c.owner(),
        }
    }

    fn paused(&self) -> bool {
        match self {
            Deployment::Fungible(c) => c.paused(),
            Deployment::Nft(c) => c.paused(),
        }
    }

    fn events(&self) -> Vec<LoggedEvent> {
        match self {
            Deployment::Fungible(c) => c.events().to_vec(),
            Deployment::Nft(c) => c.events().to_vec(),
        }
    }

    /// Apply one call
    ///
    /// The outer `Result` reports a malformed step, the inner one the
    /// controller outcome.
    fn apply(&mut self, caller: &Principal, call: &Call) -> Result<Result<CallValue, ControllerError>> {
        let outcome = match (self, call) {
            (Deployment::Fungible(c), Call::Pause) => c.pause(caller).map(|_| CallValue::None),
            (Deployment::Nft(c), Call::Pause) => c.pause(caller).map(|_| CallValue::None),
            (Deployment::Fungible(c), Call::Unpause) => c.unpause(caller).map(|_| CallValue::None),
            (Deployment::Nft(c), Call::Unpause) => c.unpause(caller).map(|_| CallValue::None),
            (Deployment::Fungible(c), Call::TransferOwnership { new_owner }) => c
                .transfer_ownership(caller, new_owner.resolve())
                .map(|_| CallValue::None),
            (Deployment::Nft(c), Call::TransferOwnership { new_owner }) => c
                .transfer_ownership(caller, new_owner.resolve())
                .map(|_| CallValue::None),
            (Deployment::Fungible(c), Call::Mint { recipient, amount }) => {
                let Some(amount) = amount else {
                    bail!("mint on {} requires an amount", DPASS_NAME);
                };
                c.mint(caller, &recipient.resolve(), amount.0)
                    .map(CallValue::Amount)
            }
            (Deployment::Nft(c), Call::Mint { recipient, amount }) => {
                if amount.is_some() {
                    warn!("{} mints one token per call, amount ignored", DPASS_NFT_NAME);
                }
                c.safe_mint(caller, &recipient.resolve()).map(CallValue::Token)
            }
            (Deployment::Fungible(c), Call::Owner) => Ok(CallValue::Principal(*c.owner())),
            (Deployment::Nft(c), Call::Owner) => Ok(CallValue::Principal(*c.owner())),
            (Deployment::Fungible(c), Call::Paused) => Ok(CallValue::Bool(c.paused())),
            (Deployment::Nft(c), Call::Paused) => Ok(CallValue::Bool(c.paused())),
            (Deployment::Fungible(c), Call::BalanceOf { account }) => {
                Ok(CallValue::Amount(c.balance_of(&account.resolve())))
            }
            (Deployment::Nft(c), Call::BalanceOf { account }) => {
                Ok(CallValue::Token(c.balance_of(&account.resolve())))
            }
            (Deployment::Nft(c), Call::OwnerOf { token_id }) => {
                c.owner_of(*token_id).map(CallValue::Principal)
            }
            (Deployment::Fungible(_), Call::OwnerOf { .. }) => {
                bail!("owner_of is only available on {}", DPASS_NFT_NAME)
            }
        };

        Ok(outcome)
    }
}

/// Replay `scenario` and build its report
pub fn run(scenario: &Scenario) -> Result<ScenarioReport> {
    let owner = scenario.owner.resolve();
    let mut deployment = Deployment::deploy(&scenario.asset, owner)
        .with_context(|| format!("cannot deploy with owner {}", owner))?;
    info!(
        "Deployed {} owned by {}, replaying {} step(s)",
        deployment.contract_name(),
        owner,
        scenario.steps.len()
    );

    let mut steps = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let caller = step.caller.resolve();
        let outcome: Outcome = deployment
            .apply(&caller, &step.call)
            .with_context(|| format!("step {} ({}) is malformed", index, step.call.name()))?
            .into();
        let matched = outcome.matches(&step.expect);

        if matched {
            debug!("step {} {}: {:?}", index, step.call.name(), outcome);
        } else {
            warn!(
                "step {} {}: expected {}, got {:?}",
                index,
                step.call.name(),
                step.expect,
                outcome
            );
        }

        steps.push(StepReport {
            index,
            caller,
            op: step.call.name(),
            outcome,
            expected: step.expect.clone(),
            matched,
        });
    }

    let report = ScenarioReport {
        name: scenario.name.clone(),
        contract: deployment.contract_name(),
        kind: deployment.kind(),
        passed: steps.iter().all(|step| step.matched),
        steps,
        events: deployment.events(),
        owner: deployment.owner(),
        paused: deployment.paused(),
    };

    Ok(report)
}
