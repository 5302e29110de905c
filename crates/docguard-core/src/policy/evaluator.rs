use crate::error::{DocGuardError, Result};
use crate::model::{
    Decision, DenyReason, Document, Fields, Operation, OwnershipViolation, Request,
};
use crate::schema::{FieldKind, Presence, Schema, WriteKind};

type Check<T = ()> = std::result::Result<T, DenyReason>;

/// Compiled policy for one collection of owned documents.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct CollectionPolicy {
    name: String,
    owner_field: String,
    schema: Schema,
}

impl CollectionPolicy {
    /// The owner field must be declared as a required string field.
    pub fn new(
        name: impl Into<String>,
        owner_field: impl Into<String>,
        schema: Schema,
    ) -> Result<Self> {
        let name = name.into();
        let owner_field = owner_field.into();

        let rule = schema.field(&owner_field).ok_or_else(|| {
            DocGuardError::InvalidConfig(format!(
                "collection `{name}`: owner field `{owner_field}` is not declared"
            ))
        })?;
        if rule.kind != FieldKind::String || rule.presence != Presence::Required {
            return Err(DocGuardError::InvalidConfig(format!(
                "collection `{name}`: owner field `{owner_field}` must be a required string"
            )));
        }

        Ok(Self { name, owner_field, schema })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner_field(&self) -> &str {
        &self.owner_field
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Evaluate one operation. Pure: identical input, identical decision.
    pub fn evaluate(&self, req: &Request<'_>) -> Decision {
        match self.check(req) {
            Ok(()) => Decision::Allow,
            Err(reason) => {
                tracing::debug!(
                    collection = %self.name,
                    op = req.operation.as_str(),
                    identity = %req.identity,
                    doc_id = req.existing.map(|d| d.id.as_str()),
                    code = reason.code(),
                    %reason,
                    "denied"
                );
                Decision::Deny(reason)
            }
        }
    }

    fn check(&self, req: &Request<'_>) -> Check {
        let Some(requester) = req.identity.as_principal() else {
            return Err(DenyReason::Unauthenticated);
        };

        match req.operation {
            Operation::Create => self.check_create(requester, req),
            Operation::Read | Operation::Delete => self.owned(requester, req.existing).map(|_| ()),
            Operation::Update => self.check_update(requester, req),
        }
    }

    fn check_create(&self, requester: &str, req: &Request<'_>) -> Check {
        if req.existing.is_some() {
            return Err(DenyReason::AlreadyExists);
        }
        let payload = req.payload.ok_or(DenyReason::MissingPayload)?;

        match payload.get(&self.owner_field).and_then(|v| v.as_str()) {
            Some(owner) if owner == requester => {}
            Some(_) => return Err(OwnershipViolation::OwnerMismatch.into()),
            None => return Err(OwnershipViolation::OwnerMissing(self.owner_field.clone()).into()),
        }

        self.schema.validate(payload, WriteKind::Create)?;
        Ok(())
    }

    fn check_update(&self, requester: &str, req: &Request<'_>) -> Check {
        let stored = self.owned(requester, req.existing)?;
        let payload = req.payload.ok_or(DenyReason::MissingPayload)?;

        // ownership is compared against the stored value, never the payload
        if let Some(v) = payload.get(&self.owner_field) {
            if stored.get(&self.owner_field) != Some(v) {
                return Err(OwnershipViolation::OwnerChanged(self.owner_field.clone()).into());
            }
        }

        self.schema.check_immutable(&stored.fields, payload)?;
        let merged: Fields = stored.merged(payload);
        self.schema.validate(&merged, WriteKind::Update)?;
        Ok(())
    }

    /// Resolve the stored document and require the requester to own it.
    /// Absence and foreign ownership both deny.
    fn owned<'a>(&self, requester: &str, existing: Option<&'a Document>) -> Check<&'a Document> {
        let doc = existing.ok_or(DenyReason::NotFound)?;
        match doc.owner(&self.owner_field) {
            Some(owner) if owner == requester => Ok(doc),
            Some(_) => Err(OwnershipViolation::OwnerMismatch.into()),
            None => Err(OwnershipViolation::OwnerMissing(self.owner_field.clone()).into()),
        }
    }
}
