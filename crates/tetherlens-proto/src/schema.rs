//! Static entity schema registry.
//!
//! One declarative table maps each [`EntityType`] to the extra columns its
//! events carry. Both the requested GraphQL field list and the rendered
//! column list are derived from it, so the two cannot drift apart.

use serde::Serialize;

use crate::entity::EntityType;

/// Field present on every event record.
pub const FIELD_ID: &str = "id";
/// Block the event was included in.
pub const FIELD_BLOCK_NUMBER: &str = "blockNumber";
/// Block timestamp in Unix seconds, encoded as a string.
pub const FIELD_BLOCK_TIMESTAMP: &str = "blockTimestamp";
/// Hash of the transaction that emitted the event.
pub const FIELD_TRANSACTION_HASH: &str = "transactionHash";

/// Fields every entity carries, in query order.
pub const BASE_FIELDS: [&str; 4] = [
    FIELD_ID,
    FIELD_BLOCK_NUMBER,
    FIELD_BLOCK_TIMESTAMP,
    FIELD_TRANSACTION_HASH,
];

/// Key of the per-row action column.
pub const ACTION_KEY: &str = "action";

/// How a column's cells should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderHint {
    /// Raw value.
    Plain,
    /// Long value (address or hash) that may break anywhere.
    Wrap,
    /// Long value that may be truncated.
    Ellipsis,
    /// Epoch seconds shown as local date-time.
    Timestamp,
    /// Row actions; carries no field.
    Actions,
}

/// A single rendered column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnSpec {
    /// Header label.
    pub label: &'static str,
    /// Record field (or [`ACTION_KEY`] for the action column).
    pub key: &'static str,
    /// Render hint.
    pub hint: RenderHint,
}

impl ColumnSpec {
    const fn new(label: &'static str, key: &'static str, hint: RenderHint) -> Self {
        Self { label, key, hint }
    }

    /// The record field this column reads, if any.
    pub fn field_key(&self) -> Option<&'static str> {
        match self.hint {
            RenderHint::Actions => None,
            _ => Some(self.key),
        }
    }
}

const ID_COLUMN: ColumnSpec = ColumnSpec::new("ID", FIELD_ID, RenderHint::Wrap);

const TAIL_COLUMNS: [ColumnSpec; 4] = [
    ColumnSpec::new("Block Number", FIELD_BLOCK_NUMBER, RenderHint::Plain),
    ColumnSpec::new("Timestamp", FIELD_BLOCK_TIMESTAMP, RenderHint::Timestamp),
    ColumnSpec::new("Transaction Hash", FIELD_TRANSACTION_HASH, RenderHint::Wrap),
    ColumnSpec::new("Actions", ACTION_KEY, RenderHint::Actions),
];

/// Schema of one entity type.
#[derive(Debug, PartialEq, Eq)]
pub struct EntityDescriptor {
    entity: Option<EntityType>,
    extra: &'static [ColumnSpec],
}

impl EntityDescriptor {
    /// The entity type described, or `None` for the base fallback.
    pub fn entity(&self) -> Option<EntityType> {
        self.entity
    }

    /// Entity-specific columns, in display order.
    pub fn extra_columns(&self) -> &'static [ColumnSpec] {
        self.extra
    }

    /// True when the entity carries only the base fields.
    pub fn is_base(&self) -> bool {
        self.extra.is_empty()
    }

    /// Fields to request: `id`, the entity-specific fields, then the
    /// remaining base fields.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::with_capacity(BASE_FIELDS.len() + self.extra.len());
        fields.push(FIELD_ID);
        fields.extend(self.extra.iter().map(|column| column.key));
        fields.extend_from_slice(&BASE_FIELDS[1..]);
        fields
    }

    /// Columns to render: `id`, the entity-specific columns, then block
    /// number, timestamp, transaction hash and the action column.
    pub fn columns(&self) -> Vec<ColumnSpec> {
        let mut columns = Vec::with_capacity(1 + self.extra.len() + TAIL_COLUMNS.len());
        columns.push(ID_COLUMN);
        columns.extend_from_slice(self.extra);
        columns.extend_from_slice(&TAIL_COLUMNS);
        columns
    }

    /// Look up the column reading `field`.
    pub fn column(&self, field: &str) -> Option<ColumnSpec> {
        self.columns()
            .into_iter()
            .find(|column| column.field_key() == Some(field))
    }
}

const AMOUNT_ISSUED: &[ColumnSpec] =
    &[ColumnSpec::new("Issued Amount", "amount", RenderHint::Plain)];
const AMOUNT_REDEEMED: &[ColumnSpec] =
    &[ColumnSpec::new("Redeemed Amount", "amount", RenderHint::Plain)];
const DEPRECATE: &[ColumnSpec] = &[ColumnSpec::new("New Address", "newAddress", RenderHint::Wrap)];
const PARAMS: &[ColumnSpec] = &[
    ColumnSpec::new("Fee Basis Points", "feeBasisPoints", RenderHint::Plain),
    ColumnSpec::new("Max Fee", "maxFee", RenderHint::Plain),
];
const DESTROYED_BLACK_FUNDS: &[ColumnSpec] = &[
    ColumnSpec::new("Blacklisted User", "_blackListedUser", RenderHint::Wrap),
    ColumnSpec::new("Destroyed Balance", "_balance", RenderHint::Plain),
];
const BLACKLIST_USER: &[ColumnSpec] = &[ColumnSpec::new("User Address", "_user", RenderHint::Wrap)];
const APPROVAL: &[ColumnSpec] = &[
    ColumnSpec::new("Owner", "owner", RenderHint::Wrap),
    ColumnSpec::new("Spender", "spender", RenderHint::Wrap),
    ColumnSpec::new("Allowance", "value", RenderHint::Wrap),
];
const TRANSFER: &[ColumnSpec] = &[
    ColumnSpec::new("Sender", "from", RenderHint::Ellipsis),
    ColumnSpec::new("Recipient", "to", RenderHint::Ellipsis),
    ColumnSpec::new("Amount", "value", RenderHint::Plain),
];

const fn entry(entity: EntityType, extra: &'static [ColumnSpec]) -> EntityDescriptor {
    EntityDescriptor {
        entity: Some(entity),
        extra,
    }
}

/// Indexed in [`EntityType::ALL`] order.
static DESCRIPTORS: [EntityDescriptor; 11] = [
    entry(EntityType::Issues, AMOUNT_ISSUED),
    entry(EntityType::Redeems, AMOUNT_REDEEMED),
    entry(EntityType::Deprecates, DEPRECATE),
    entry(EntityType::Params, PARAMS),
    entry(EntityType::DestroyedBlackFunds, DESTROYED_BLACK_FUNDS),
    entry(EntityType::AddedBlackLists, BLACKLIST_USER),
    entry(EntityType::RemovedBlackLists, BLACKLIST_USER),
    entry(EntityType::Approvals, APPROVAL),
    entry(EntityType::Transfers, TRANSFER),
    entry(EntityType::Pauses, &[]),
    entry(EntityType::Unpauses, &[]),
];

static BASE_DESCRIPTOR: EntityDescriptor = EntityDescriptor {
    entity: None,
    extra: &[],
};

/// The descriptor for `entity`.
pub fn descriptor(entity: EntityType) -> &'static EntityDescriptor {
    &DESCRIPTORS[entity as usize]
}

/// The descriptor for a collection token, falling back to the base
/// descriptor for tokens outside the known set.
pub fn lookup(token: &str) -> &'static EntityDescriptor {
    match token.parse::<EntityType>() {
        Ok(entity) => descriptor(entity),
        Err(_) => {
            tracing::debug!(token, "unknown entity token, using base descriptor");
            &BASE_DESCRIPTOR
        }
    }
}

/// The base fields-only descriptor.
pub fn base_descriptor() -> &'static EntityDescriptor {
    &BASE_DESCRIPTOR
}
