//! # Hydrator
//!
//! Builds typed instances from raw records by matching record keys to
//! constructor parameters.
//!
//! ## Resolution
//!
//! ```text
//! ConstructorSignature ──► for each parameter ──► candidate keys ──► first key present
//!                                                                       │
//!                         ┌─────────────────────────────────────────────┘
//!                         ▼
//!            all parameters matched? ── yes ──► Resolved(args)  ──► constructor(args)
//!                         │
//!                         no ────────────────► Incomplete      ──► zero-argument constructor
//! ```
//!
//! Partial matches never raise. They select the zero-argument constructor, and
//! only a type without one turns the mismatch into a `ConstructionError`.
//!
//! ## Collections
//!
//! `hydrate_collection` aborts on the first failing record and reports its
//! position; `hydrate_each` returns one result per record instead. Both keep
//! input order, including when records are hydrated on the rayon pool.

use crate::config::HydratorConfig;
use crate::error::{HydrationError, HydrationResult};
use crate::hydratable::Hydratable;
use crate::keys::candidate_keys;
use crate::log_hydration;
use crate::record::RawRecord;
use crate::registry::{HydratedObject, TypeRegistry, TypeSchema};
use crate::signature::{CallArguments, ConstructorSignature, ResolvedArgument};
use rayon::prelude::*;
use std::any::Any;
use std::sync::Arc;
use tracing::trace;

/// Outcome of matching a raw record against a constructor signature
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Every parameter matched a key
    Resolved(CallArguments),
    /// At least one parameter had no matching key
    Incomplete {
        resolved: usize,
        unresolved: Vec<String>,
    },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }
}

/// Match every parameter of `signature` against the keys of `raw`
pub fn resolve_arguments<R: RawRecord + ?Sized>(
    signature: &ConstructorSignature,
    raw: &R,
) -> Resolution {
    let mut args = CallArguments::new(signature.type_name());
    let mut unresolved = Vec::new();

    for parameter in signature.parameters() {
        let candidates = candidate_keys(&parameter.name);
        let matched = candidates
            .iter()
            .find_map(|key| raw.lookup(key).map(|value| (key, value)));

        match matched {
            Some((key, value)) => {
                trace!(
                    type_name = signature.type_name(),
                    parameter = %parameter.name,
                    key = key,
                    "Parameter matched"
                );
                args.push(ResolvedArgument {
                    parameter: parameter.name.clone(),
                    key: key.to_string(),
                    value: value.clone(),
                });
            }
            None => unresolved.push(parameter.name.clone()),
        }
    }

    if args.len() == signature.arity() {
        Resolution::Resolved(args)
    } else {
        Resolution::Incomplete {
            resolved: args.len(),
            unresolved,
        }
    }
}

fn hydrate_with<T, R, C, D>(
    signature: &ConstructorSignature,
    raw: &R,
    construct: C,
    construct_default: D,
) -> HydrationResult<T>
where
    R: RawRecord + ?Sized,
    C: FnOnce(CallArguments) -> HydrationResult<T>,
    D: FnOnce() -> HydrationResult<T>,
{
    match resolve_arguments(signature, raw) {
        Resolution::Resolved(args) => construct(args),
        Resolution::Incomplete {
            resolved,
            unresolved,
        } => {
            log_hydration!(debug, "zero-argument fallback",
                type_name: signature.type_name(),
                resolved: resolved,
                unresolved: unresolved,
            );
            construct_default()
        }
    }
}

/// Stateless hydrator; cheap to clone and safe to share between threads
#[derive(Debug, Clone, Default)]
pub struct Hydrator {
    config: HydratorConfig,
    registry: Option<Arc<TypeRegistry>>,
}

impl Hydrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HydratorConfig) -> Self {
        Self {
            config,
            registry: None,
        }
    }

    /// Attach a registry so types can be addressed by name
    #[must_use]
    pub fn with_registry(mut self, registry: Arc<TypeRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn config(&self) -> &HydratorConfig {
        &self.config
    }

    pub fn registry(&self) -> Option<&Arc<TypeRegistry>> {
        self.registry.as_ref()
    }

    /// Construct one `T` from `raw`
    pub fn hydrate<T, R>(&self, raw: &R) -> HydrationResult<T>
    where
        T: Hydratable,
        R: RawRecord + ?Sized,
    {
        let signature = ConstructorSignature::of::<T>();
        hydrate_with(&signature, raw, T::construct, T::construct_default)
    }

    /// Construct one `T` per record, aborting on the first failure
    pub fn hydrate_collection<T, R>(&self, raws: &[R]) -> HydrationResult<Vec<T>>
    where
        T: Hydratable + Send,
        R: RawRecord + Sync,
    {
        self.collect_all(raws, |raw| self.hydrate::<T, R>(raw))
    }

    /// Construct one `T` per record, keeping every per-record result
    pub fn hydrate_each<T, R>(&self, raws: &[R]) -> Vec<HydrationResult<T>>
    where
        T: Hydratable + Send,
        R: RawRecord + Sync,
    {
        self.collect_each(raws, |raw| self.hydrate::<T, R>(raw))
    }

    /// Construct an instance of the registered type `type_name`
    pub fn hydrate_named<R>(&self, type_name: &str, raw: &R) -> HydrationResult<HydratedObject>
    where
        R: RawRecord + ?Sized,
    {
        let schema = self.resolve_schema(type_name)?;
        hydrate_named_with(&schema, raw)
    }

    /// Construct a registered type and downcast it to `T`
    pub fn hydrate_named_as<T, R>(&self, type_name: &str, raw: &R) -> HydrationResult<T>
    where
        T: Any,
        R: RawRecord + ?Sized,
    {
        let object = self.hydrate_named(type_name, raw)?;
        downcast(type_name, object)
    }

    /// Construct one registered instance per record, aborting on the first failure
    pub fn hydrate_named_collection<R>(
        &self,
        type_name: &str,
        raws: &[R],
    ) -> HydrationResult<Vec<HydratedObject>>
    where
        R: RawRecord + Sync,
    {
        let schema = self.resolve_schema(type_name)?;
        self.collect_all(raws, |raw| hydrate_named_with(&schema, raw))
    }

    fn resolve_schema(&self, type_name: &str) -> HydrationResult<Arc<TypeSchema>> {
        let registry = self.registry.as_ref().ok_or_else(|| {
            HydrationError::type_resolution(type_name, "no type registry attached to this hydrator")
        })?;
        registry.resolve(type_name)
    }

    fn collect_all<T, R, F>(&self, raws: &[R], hydrate_one: F) -> HydrationResult<Vec<T>>
    where
        T: Send,
        R: Sync,
        F: Fn(&R) -> HydrationResult<T> + Sync,
    {
        if self.config.should_parallelize(raws.len()) {
            // Lowest failing index wins, same as the sequential path
            self.collect_each(raws, hydrate_one).into_iter().collect()
        } else {
            log_hydration!(debug, "hydrate collection", size: raws.len(), parallel: false);
            raws.iter()
                .enumerate()
                .map(|(index, raw)| hydrate_one(raw).map_err(|e| e.at_index(index)))
                .collect()
        }
    }

    fn collect_each<T, R, F>(&self, raws: &[R], hydrate_one: F) -> Vec<HydrationResult<T>>
    where
        T: Send,
        R: Sync,
        F: Fn(&R) -> HydrationResult<T> + Sync,
    {
        let parallel = self.config.should_parallelize(raws.len());
        log_hydration!(debug, "hydrate collection", size: raws.len(), parallel: parallel);

        let hydrate_at =
            |(index, raw): (usize, &R)| hydrate_one(raw).map_err(|e| e.at_index(index));

        if parallel {
            raws.par_iter().enumerate().map(hydrate_at).collect()
        } else {
            raws.iter().enumerate().map(hydrate_at).collect()
        }
    }
}

fn hydrate_named_with<R: RawRecord + ?Sized>(
    schema: &TypeSchema,
    raw: &R,
) -> HydrationResult<HydratedObject> {
    let signature = schema.signature();
    hydrate_with(
        &signature,
        raw,
        |args| schema.construct(args),
        || schema.construct_default(),
    )
}

fn downcast<T: Any>(type_name: &str, object: HydratedObject) -> HydrationResult<T> {
    object.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
        HydrationError::type_resolution(
            type_name,
            format!(
                "registered type does not produce {}",
                std::any::type_name::<T>()
            ),
        )
    })
}
