//! Uniform attribute-set operations
//!
//! One contract for all (entity kind × attribute) pairs: get, add, replace,
//! remove-one and remove-all over `tags`, `configs` and `jars`. The tag set
//! is special-cased in exactly two ways, both delegated to
//! [`crate::rules::protected_tags`]: the permanent members `{id, name}` are
//! re-inserted after every mutation, and removing one of them singly is
//! rejected.
//!
//! Validation of the entity id always precedes the existence lookup.

use std::collections::BTreeSet;

use crate::errors::{RegistryError, Result};
use crate::model::{Attribute, EntityKind, Resource};
use crate::ops::store::Store;
use crate::rules::{protected_tags, validation};

/// Read an attribute set
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If the entity does not exist
pub fn get_attributes(
    store: &Store,
    kind: EntityKind,
    id: &str,
    attr: Attribute,
) -> Result<BTreeSet<String>> {
    validation::require_id(kind, id)?;
    let resource = store.resource(kind, id)?;
    Ok(resource.attr_set(attr).clone())
}

/// Add values to an attribute set (union)
///
/// An empty `values` set is a valid no-op union.
///
/// # Returns
/// The resulting set
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If the entity does not exist
pub fn add_attributes(
    store: &mut Store,
    kind: EntityKind,
    id: &str,
    attr: Attribute,
    values: BTreeSet<String>,
) -> Result<BTreeSet<String>> {
    validation::require_id(kind, id)?;
    let resource = store.resource_mut(kind, id)?;
    let (entity_id, entity_name) = (resource.id().to_string(), resource.name().to_string());

    let set = resource.attr_set_mut(attr);
    set.extend(values);
    if attr == Attribute::Tags {
        protected_tags::enforce_protected_tags(&entity_id, &entity_name, set);
    }
    let result = set.clone();
    resource.touch();
    Ok(result)
}

/// Replace an attribute set wholesale
///
/// The set becomes exactly `values`, except for tags where the permanent
/// members `{id, name}` are re-inserted even when `values` omits them.
///
/// # Returns
/// The resulting set
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If the entity does not exist
pub fn replace_attributes(
    store: &mut Store,
    kind: EntityKind,
    id: &str,
    attr: Attribute,
    values: BTreeSet<String>,
) -> Result<BTreeSet<String>> {
    validation::require_id(kind, id)?;
    let resource = store.resource_mut(kind, id)?;
    let (entity_id, entity_name) = (resource.id().to_string(), resource.name().to_string());

    let set = resource.attr_set_mut(attr);
    *set = values;
    if attr == Attribute::Tags {
        protected_tags::enforce_protected_tags(&entity_id, &entity_name, set);
    }
    let result = set.clone();
    resource.touch();
    Ok(result)
}

/// Remove a single value from an attribute set
///
/// `None`, or a value not present, is a no-op that succeeds and returns the
/// set unchanged ("nothing to remove" is not an error). Removing one of an
/// entity's permanent tags is rejected.
///
/// # Returns
/// The resulting set
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If the entity does not exist
/// * `ProtectedTag` - If `attr` is tags and `value` is the entity's id or
///   name
pub fn remove_attribute(
    store: &mut Store,
    kind: EntityKind,
    id: &str,
    attr: Attribute,
    value: Option<&str>,
) -> Result<BTreeSet<String>> {
    validation::require_id(kind, id)?;
    let resource = store.resource_mut(kind, id)?;
    let (entity_id, entity_name) = (resource.id().to_string(), resource.name().to_string());

    if let Some(value) = value {
        if attr == Attribute::Tags && protected_tags::is_protected(&entity_id, &entity_name, value)
        {
            return Err(RegistryError::ProtectedTag {
                kind,
                id: entity_id,
                tag: value.to_string(),
            });
        }
        let set = resource.attr_set_mut(attr);
        set.remove(value);
        if attr == Attribute::Tags {
            protected_tags::enforce_protected_tags(&entity_id, &entity_name, set);
        }
        resource.touch();
    }

    Ok(resource.attr_set(attr).clone())
}

/// Empty an attribute set
///
/// For tags the result is exactly `{id, name}`; the set is never truly
/// empty.
///
/// # Returns
/// The resulting set
///
/// # Errors
/// * `MissingId` - If `id` is blank
/// * `EntityNotFound` - If the entity does not exist
pub fn remove_all_attributes(
    store: &mut Store,
    kind: EntityKind,
    id: &str,
    attr: Attribute,
) -> Result<BTreeSet<String>> {
    validation::require_id(kind, id)?;
    let resource = store.resource_mut(kind, id)?;
    let (entity_id, entity_name) = (resource.id().to_string(), resource.name().to_string());

    let set = resource.attr_set_mut(attr);
    set.clear();
    if attr == Attribute::Tags {
        protected_tags::enforce_protected_tags(&entity_id, &entity_name, set);
    }
    let result = set.clone();
    resource.touch();
    Ok(result)
}
