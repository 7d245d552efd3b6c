use std::{fmt::Display, num::IntErrorKind, str::FromStr};

use serde::{Deserialize, Serialize};

/// Requests with a user id above this bound are rejected as unknown users
pub const MAX_USER_ID: i64 = 1_000_000_000;

/// Number of items requested from the named providers
pub const PROVIDER_RECS: usize = 10;

/// Successful recommendation payload
///
/// `items` is ranked, best first, exactly as the provider produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecoResponse {
    pub user_id: i64,
    pub items: Vec<i64>,
}

/// User id segment of a recommendation path
///
/// Any integer is accepted. Ids too large for `i64` can only be above
/// `MAX_USER_ID`, so they are kept as their decimal digits for the
/// not-found message instead of being rejected as malformed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdParam {
    InRange(i64),
    AboveRange(String),
}

/// Returned when a user id segment is not an integer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUserId;

impl Display for InvalidUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Input should be a valid integer, unable to parse string as an integer")
    }
}

impl FromStr for UserIdParam {
    type Err = InvalidUserId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.parse::<i64>() {
            Ok(id) => Ok(UserIdParam::InRange(id)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
                let digits = s.trim_start_matches('+').trim_start_matches('0');
                Ok(UserIdParam::AboveRange(digits.to_string()))
            }
            Err(_) => Err(InvalidUserId),
        }
    }
}

/// Models served from precomputed offline recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfflineModel {
    Dssm,
    Ae,
    RecVae,
    Ranker,
}

impl OfflineModel {
    pub const ALL: [OfflineModel; 4] = [
        OfflineModel::Dssm,
        OfflineModel::Ae,
        OfflineModel::RecVae,
        OfflineModel::Ranker,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OfflineModel::Dssm => "dssm",
            OfflineModel::Ae => "ae",
            OfflineModel::RecVae => "recvae",
            OfflineModel::Ranker => "ranker",
        }
    }
}

impl Display for OfflineModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every model name the router knows how to dispatch
///
/// Parsing is case-sensitive and does no normalization. Variants are listed in
/// dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelName {
    /// Synthetic `0..k_recs` list, never touches a provider
    SomeModel,
    UserKnn,
    AlsAnn,
    LfmAnn,
    Offline(OfflineModel),
}

/// Returned when a path segment names no known model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownModel;

impl FromStr for ModelName {
    type Err = UnknownModel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "some_model" => Ok(ModelName::SomeModel),
            "userknn" => Ok(ModelName::UserKnn),
            "als_ann" => Ok(ModelName::AlsAnn),
            "lfm_ann" => Ok(ModelName::LfmAnn),
            other => OfflineModel::ALL
                .into_iter()
                .find(|m| m.as_str() == other)
                .map(ModelName::Offline)
                .ok_or(UnknownModel),
        }
    }
}

impl ModelName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::SomeModel => "some_model",
            ModelName::UserKnn => "userknn",
            ModelName::AlsAnn => "als_ann",
            ModelName::LfmAnn => "lfm_ann",
            ModelName::Offline(model) => model.as_str(),
        }
    }
}

impl Display for ModelName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
