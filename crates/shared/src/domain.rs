use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

use crate::error::{AddressError, DraftError};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name(pub u64);
    };
}

id_newtype!(AttemptId);

impl AttemptId {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub const DEFAULT_TOTAL_SUPPLY: &str = "1000000000";
pub const DEFAULT_DECIMALS: &str = "18";
pub const SYMBOL_MAX_CHARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenField {
    Name,
    Symbol,
    TotalSupply,
    Decimals,
    Description,
}

impl TokenField {
    pub const ALL: [TokenField; 5] = [
        TokenField::Name,
        TokenField::Symbol,
        TokenField::TotalSupply,
        TokenField::Decimals,
        TokenField::Description,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "TOKEN_NAME",
            Self::Symbol => "TOKEN_SYMBOL",
            Self::TotalSupply => "TOTAL_SUPPLY",
            Self::Decimals => "DECIMALS",
            Self::Description => "DESCRIPTION",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Name => "My Awesome Token",
            Self::Symbol => "MAT",
            Self::TotalSupply => "1000000000",
            Self::Decimals => "18",
            Self::Description => "Optional: Describe your token...",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Self::Name | Self::Symbol | Self::TotalSupply)
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, Self::TotalSupply | Self::Decimals)
    }

    pub fn max_chars(self) -> Option<usize> {
        match self {
            Self::Symbol => Some(SYMBOL_MAX_CHARS),
            _ => None,
        }
    }

    /// Applies the input constraints of the field widget (digits only for
    /// numeric fields, length cap for the symbol). The draft itself never
    /// validates; this is for the input layer.
    pub fn constrain_input(self, raw: &str) -> String {
        let filtered: String = if self.is_numeric() {
            raw.chars().filter(char::is_ascii_digit).collect()
        } else {
            raw.to_string()
        };
        match self.max_chars() {
            Some(limit) => filtered.chars().take(limit).collect(),
            None => filtered,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDraft {
    pub name: String,
    pub symbol: String,
    pub total_supply: String,
    pub decimals: String,
    pub description: String,
}

impl Default for TokenDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            symbol: String::new(),
            total_supply: DEFAULT_TOTAL_SUPPLY.into(),
            decimals: DEFAULT_DECIMALS.into(),
            description: String::new(),
        }
    }
}

impl TokenDraft {
    pub fn field(&self, field: TokenField) -> &str {
        match field {
            TokenField::Name => &self.name,
            TokenField::Symbol => &self.symbol,
            TokenField::TotalSupply => &self.total_supply,
            TokenField::Decimals => &self.decimals,
            TokenField::Description => &self.description,
        }
    }

    fn field_mut(&mut self, field: TokenField) -> &mut String {
        match field {
            TokenField::Name => &mut self.name,
            TokenField::Symbol => &mut self.symbol,
            TokenField::TotalSupply => &mut self.total_supply,
            TokenField::Decimals => &mut self.decimals,
            TokenField::Description => &mut self.description,
        }
    }

    /// Replaces exactly one field. No validation happens here.
    pub fn set_field(&mut self, field: TokenField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    pub fn missing_required_fields(&self) -> Vec<TokenField> {
        TokenField::ALL
            .into_iter()
            .filter(|field| field.is_required() && self.field(*field).is_empty())
            .collect()
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        let missing = self.missing_required_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DraftError::MissingFields(missing))
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && !self.symbol.is_empty() && !self.total_supply.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentPhase {
    #[default]
    Idle,
    Deploying,
    Success,
    /// Declared for completeness of the phase set; no transition produces it.
    Error,
}

impl DeploymentPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "READY",
            Self::Deploying => "DEPLOYING",
            Self::Success => "DEPLOYED",
            Self::Error => "FAILED",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploymentStep {
    pub label: &'static str,
    /// Delay relative to entering the deploying phase.
    pub offset: Duration,
}

pub const DEPLOYMENT_STEPS: [DeploymentStep; 7] = [
    DeploymentStep {
        label: "Initializing smart contract compiler...",
        offset: Duration::from_millis(0),
    },
    DeploymentStep {
        label: "Compiling ERC-20 standard interface...",
        offset: Duration::from_millis(600),
    },
    DeploymentStep {
        label: "Generating bytecode...",
        offset: Duration::from_millis(1200),
    },
    DeploymentStep {
        label: "Estimating gas requirements...",
        offset: Duration::from_millis(1800),
    },
    DeploymentStep {
        label: "Broadcasting to Base network...",
        offset: Duration::from_millis(2400),
    },
    DeploymentStep {
        label: "Awaiting block confirmation...",
        offset: Duration::from_millis(3000),
    },
    DeploymentStep {
        label: "Verifying contract on explorer...",
        offset: Duration::from_millis(3400),
    },
];

/// Fixed length of the deploying phase. Leaves a trailing pause after the
/// last step reveal.
pub const DEPLOY_DURATION: Duration = Duration::from_millis(4000);

pub const ADDRESS_BYTES: usize = 20;
pub const ADDRESS_HEX_CHARS: usize = ADDRESS_BYTES * 2;

/// Display-only contract address: `0x` plus 40 lowercase hex characters.
/// It is random text, never derived from any key material.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractAddress(String);

impl ContractAddress {
    pub fn parse(text: &str) -> Result<Self, AddressError> {
        let body = text
            .strip_prefix("0x")
            .ok_or_else(|| AddressError::MissingPrefix(text.to_string()))?;
        if body.len() != ADDRESS_HEX_CHARS {
            return Err(AddressError::WrongLength {
                expected: ADDRESS_HEX_CHARS,
                actual: body.len(),
            });
        }
        if let Some(upper) = body.chars().find(char::is_ascii_uppercase) {
            return Err(AddressError::InvalidChar(upper));
        }
        hex::decode(body).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, .. } => AddressError::InvalidChar(c),
            _ => AddressError::WrongLength {
                expected: ADDRESS_HEX_CHARS,
                actual: body.len(),
            },
        })?;
        Ok(Self(text.to_string()))
    }

    /// Hex-encodes 20 bytes. Uniform bytes give uniform hex characters, so
    /// callers only need to supply randomness.
    pub fn from_bytes(bytes: [u8; ADDRESS_BYTES]) -> Self {
        Self(format!("0x{}", hex::encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContractAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for ContractAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ContractAddress> for String {
    fn from(value: ContractAddress) -> Self {
        value.0
    }
}
