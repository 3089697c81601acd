//! # Relation Resolver
//!
//! Derives the relation set from relation-flagged fields. Runs once when a
//! model is built and holds names only; endpoints are looked up through the
//! owning `Model`.
//!
//! ## Pairing
//!
//! A field `F` on `T` targeting `U` pairs with a field `G` on `U` when
//! either `F` names `G` as its inverse, or `F` names no inverse and `G`
//! declares itself the inverse of `F`. In both cases `G` must be a relation
//! field resolving back to `T`. A paired relation is oriented so that the
//! field without `inverseOfFieldName` is the `from` side.
//!
//! Fields that fail to pair become one-directional relations. Validation
//! reports why; the resolver never fails.

use std::collections::HashSet;

use crate::field::Field;
use crate::model::Model;
use crate::object_type::ObjectTypeBase;
use crate::types::Type;

/// A derived edge between two object types.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relation {
    from_type: String,
    from_field: String,
    to_type: String,
    to_field: Option<String>,
}

impl Relation {
    pub fn from_type_name(&self) -> &str {
        &self.from_type
    }

    pub fn from_field_name(&self) -> &str {
        &self.from_field
    }

    pub fn to_type_name(&self) -> &str {
        &self.to_type
    }

    /// The inverse field, or `None` for a one-directional relation.
    pub fn to_field_name(&self) -> Option<&str> {
        self.to_field.as_deref()
    }

    pub fn is_bidirectional(&self) -> bool {
        self.to_field.is_some()
    }

    /// Whether `type_name` is either endpoint.
    pub fn involves(&self, type_name: &str) -> bool {
        self.from_type == type_name || self.to_type == type_name
    }

    /// The `from` field, resolved against the model that produced this relation.
    ///
    /// # Panics
    ///
    /// Panics if `model` did not produce this relation.
    pub fn from_field<'m>(&self, model: &'m Model) -> &'m Field {
        model.expect_object_type(&self.from_type).expect_field(&self.from_field)
    }

    /// The `to` field, if any, resolved against the model that produced this relation.
    ///
    /// # Panics
    ///
    /// Panics if `model` did not produce this relation.
    pub fn to_field<'m>(&self, model: &'m Model) -> Option<&'m Field> {
        self.to_field
            .as_deref()
            .map(|name| model.expect_object_type(&self.to_type).expect_field(name))
    }
}

type FieldKey<'a> = (&'a str, &'a str);

fn key(field: &Field) -> FieldKey<'_> {
    (field.declaring_type_name(), field.name())
}

/// Compute all relations of `types`, resolving type names through `lookup`.
pub(crate) fn resolve_relations<'a>(
    types: impl IntoIterator<Item = &'a Type>,
    lookup: impl Fn(&str) -> Option<&'a Type>,
) -> Vec<Relation> {
    let mut relations = Vec::new();
    // Each field takes part in at most one relation.
    let mut used: HashSet<FieldKey<'a>> = HashSet::new();

    for ty in types {
        let Some(object) = ty.as_object() else {
            continue;
        };
        for field in object.relation_fields() {
            if used.contains(&key(field)) {
                continue;
            }
            let Some(target) = lookup(field.type_name()).and_then(Type::as_object) else {
                continue;
            };

            let partner = find_partner(field, target, &used);
            used.insert(key(field));

            let relation = match partner {
                Some(partner) => {
                    used.insert(key(partner));
                    // The field that declares the inverse is the `to` side.
                    let (from, to) = if field.inverse_of_field_name().is_some()
                        && partner.inverse_of_field_name().is_none()
                    {
                        (partner, field)
                    } else {
                        (field, partner)
                    };
                    Relation {
                        from_type: from.declaring_type_name().to_string(),
                        from_field: from.name().to_string(),
                        to_type: to.declaring_type_name().to_string(),
                        to_field: Some(to.name().to_string()),
                    }
                }
                None => Relation {
                    from_type: object.name().to_string(),
                    from_field: field.name().to_string(),
                    to_type: target.name().to_string(),
                    to_field: None,
                },
            };
            tracing::trace!(
                from_type = %relation.from_type,
                from_field = %relation.from_field,
                to_type = %relation.to_type,
                bidirectional = relation.is_bidirectional(),
                "resolved relation"
            );
            relations.push(relation);
        }
    }
    relations
}

fn find_partner<'a>(
    field: &'a Field,
    target: &'a ObjectTypeBase,
    used: &HashSet<FieldKey<'a>>,
) -> Option<&'a Field> {
    let is_self = |candidate: &Field| key(candidate) == key(field);
    match field.inverse_of_field_name() {
        Some(inverse) => target.field(inverse).filter(|&candidate| {
            candidate.is_relation()
                && candidate.type_name() == field.declaring_type_name()
                && !is_self(candidate)
                && !used.contains(&key(candidate))
        }),
        None => field
            .inverse_fields_on(target)
            .find(|&candidate| !used.contains(&key(candidate))),
    }
}
