//! Entity types indexed by the subgraph.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schema::{self, EntityDescriptor};

/// Event-log categories emitted by the tracked token contract.
///
/// Each variant maps to one subgraph collection; the collection token
/// (`"transfers"`, `"addedBlackLists"`, ...) is both the GraphQL field name
/// and the key under which results come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EntityType {
    /// New tokens issued.
    Issues,
    /// Tokens redeemed.
    Redeems,
    /// Contract deprecated in favour of a new address.
    Deprecates,
    /// Fee parameters changed.
    Params,
    /// Balance of a blacklisted address destroyed.
    DestroyedBlackFunds,
    /// Address added to the blacklist.
    AddedBlackLists,
    /// Address removed from the blacklist.
    RemovedBlackLists,
    /// Allowance granted.
    Approvals,
    /// Tokens moved between addresses.
    Transfers,
    /// Contract paused.
    Pauses,
    /// Contract unpaused.
    Unpauses,
}

impl EntityType {
    /// Every entity type, in the order the query form lists them.
    pub const ALL: [EntityType; 11] = [
        EntityType::Issues,
        EntityType::Redeems,
        EntityType::Deprecates,
        EntityType::Params,
        EntityType::DestroyedBlackFunds,
        EntityType::AddedBlackLists,
        EntityType::RemovedBlackLists,
        EntityType::Approvals,
        EntityType::Transfers,
        EntityType::Pauses,
        EntityType::Unpauses,
    ];

    /// The subgraph collection name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityType::Issues => "issues",
            EntityType::Redeems => "redeems",
            EntityType::Deprecates => "deprecates",
            EntityType::Params => "params",
            EntityType::DestroyedBlackFunds => "destroyedBlackFunds",
            EntityType::AddedBlackLists => "addedBlackLists",
            EntityType::RemovedBlackLists => "removedBlackLists",
            EntityType::Approvals => "approvals",
            EntityType::Transfers => "transfers",
            EntityType::Pauses => "pauses",
            EntityType::Unpauses => "unpauses",
        }
    }

    /// Contract event name.
    pub fn title(&self) -> &'static str {
        match self {
            EntityType::Issues => "Issue",
            EntityType::Redeems => "Redeem",
            EntityType::Deprecates => "Deprecate",
            EntityType::Params => "Params",
            EntityType::DestroyedBlackFunds => "DestroyedBlackFunds",
            EntityType::AddedBlackLists => "AddedBlackList",
            EntityType::RemovedBlackLists => "RemovedBlackList",
            EntityType::Approvals => "Approval",
            EntityType::Transfers => "Transfer",
            EntityType::Pauses => "Pause",
            EntityType::Unpauses => "Unpause",
        }
    }

    /// One-line description of what the event records.
    pub fn description(&self) -> &'static str {
        match self {
            EntityType::Issues => "new tokens issued",
            EntityType::Redeems => "tokens redeemed",
            EntityType::Deprecates => "contract deprecated",
            EntityType::Params => "fee parameters changed",
            EntityType::DestroyedBlackFunds => "blacklisted funds destroyed",
            EntityType::AddedBlackLists => "address added to blacklist",
            EntityType::RemovedBlackLists => "address removed from blacklist",
            EntityType::Approvals => "allowance approved",
            EntityType::Transfers => "tokens transferred",
            EntityType::Pauses => "contract paused",
            EntityType::Unpauses => "contract unpaused",
        }
    }

    /// The schema descriptor for this entity type.
    pub fn descriptor(&self) -> &'static EntityDescriptor {
        schema::descriptor(*self)
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityType::ALL
            .iter()
            .copied()
            .find(|entity| entity.as_str() == s)
            .ok_or_else(|| Error::UnknownEntity(s.to_string()))
    }
}
