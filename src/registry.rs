//! # Type Registry
//!
//! Runtime type descriptors addressed by name.
//!
//! A [`TypeSchema`] carries what the hydrator needs to build a type it only
//! knows by name: the ordered parameter names, an argument constructor and an
//! optional zero-argument constructor. Schemas live in a [`TypeRegistry`]
//! that a [`Hydrator`](crate::Hydrator) can be attached to.
//!
//! ## Usage
//!
//! ```rust
//! use hydrator::registry::{TypeRegistry, TypeSchema};
//! use hydrator::Hydrator;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TypeRegistry::new();
//! registry.register_schema(
//!     TypeSchema::new("Temperature")
//!         .with_parameters(["celsiusValue"])
//!         .with_constructor(|mut args| Ok(Box::new(args.take::<f64>()?))),
//! )?;
//!
//! let hydrator = Hydrator::new().with_registry(Arc::new(registry));
//! let celsius: f64 = hydrator.hydrate_named_as("Temperature", &json!({"celsius_value": 21.5}))?;
//! assert_eq!(celsius, 21.5);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! Registration takes a write lock; hydration clones the `Arc` of the schema
//! it needs and releases the read lock before any constructor runs.

use crate::error::{HydrationError, HydrationResult};
use crate::hydratable::Hydratable;
use crate::signature::{CallArguments, ConstructorSignature};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Instance produced by a runtime type descriptor
pub type HydratedObject = Box<dyn Any + Send>;

/// Argument constructor of a registered type
pub type ConstructorFn =
    Box<dyn Fn(CallArguments) -> HydrationResult<HydratedObject> + Send + Sync>;

/// Zero-argument constructor of a registered type
pub type DefaultConstructorFn = Box<dyn Fn() -> HydrationResult<HydratedObject> + Send + Sync>;

/// Runtime description of one constructible type
pub struct TypeSchema {
    name: String,
    parameters: Vec<String>,
    constructor: Option<ConstructorFn>,
    default_constructor: Option<DefaultConstructorFn>,
}

impl fmt::Debug for TypeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeSchema")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("constructible", &self.constructor.is_some())
            .field("default_constructor", &self.default_constructor.is_some())
            .finish()
    }
}

impl TypeSchema {
    /// Declare a type with no parameters and no constructors yet.
    ///
    /// A schema with neither constructor is declared but not constructible. A
    /// schema with only a default constructor is treated as having no
    /// parameters and always hydrates to its default instance.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Vec::new(),
            constructor: None,
            default_constructor: None,
        }
    }

    /// Schema mirroring a compile-time [`Hydratable`] type
    #[must_use]
    pub fn from_hydratable<T: Hydratable + Send + 'static>() -> Self {
        let schema = Self::new(T::type_name())
            .with_parameters(T::constructor_parameters().iter().copied())
            .with_constructor(|args| T::construct(args).map(|value| Box::new(value) as HydratedObject));

        if T::has_default_constructor() {
            schema.with_default_constructor(|| {
                T::construct_default().map(|value| Box::new(value) as HydratedObject)
            })
        } else {
            schema
        }
    }

    /// Append one constructor parameter
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>) -> Self {
        self.parameters.push(name.into());
        self
    }

    /// Append constructor parameters in declaration order
    #[must_use]
    pub fn with_parameters<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parameters.extend(names.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn with_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn(CallArguments) -> HydrationResult<HydratedObject> + Send + Sync + 'static,
    {
        self.constructor = Some(Box::new(constructor));
        self
    }

    #[must_use]
    pub fn with_default_constructor<F>(mut self, constructor: F) -> Self
    where
        F: Fn() -> HydrationResult<HydratedObject> + Send + Sync + 'static,
    {
        self.default_constructor = Some(Box::new(constructor));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[String] {
        &self.parameters
    }

    pub fn is_constructible(&self) -> bool {
        self.constructor.is_some() || self.default_constructor.is_some()
    }

    pub fn has_default_constructor(&self) -> bool {
        self.default_constructor.is_some()
    }

    /// Fresh constructor signature for one hydration call
    pub fn signature(&self) -> ConstructorSignature {
        if self.constructor.is_none() {
            return ConstructorSignature::new(self.name.as_str(), Vec::<String>::new());
        }
        ConstructorSignature::new(self.name.as_str(), self.parameters.iter().map(String::as_str))
    }

    /// Argument-based construction; default-only schemas ignore `args`
    pub fn construct(&self, args: CallArguments) -> HydrationResult<HydratedObject> {
        match (&self.constructor, &self.default_constructor) {
            (Some(constructor), _) => constructor(args),
            (None, Some(default_constructor)) => default_constructor(),
            (None, None) => Err(HydrationError::type_resolution(
                self.name.as_str(),
                "type has no constructor",
            )),
        }
    }

    pub fn construct_default(&self) -> HydrationResult<HydratedObject> {
        match &self.default_constructor {
            Some(constructor) => constructor(),
            None => {
                let parameters: Vec<&str> = self.parameters.iter().map(String::as_str).collect();
                Err(HydrationError::no_default_constructor(
                    self.name.as_str(),
                    &parameters,
                ))
            }
        }
    }

    /// Reject empty names and repeated parameter names
    pub fn validate(&self) -> HydrationResult<()> {
        if self.name.trim().is_empty() {
            return Err(HydrationError::type_resolution(
                self.name.as_str(),
                "type name must not be empty",
            ));
        }

        let mut seen = HashSet::new();
        for parameter in &self.parameters {
            if !seen.insert(parameter.as_str()) {
                return Err(HydrationError::type_resolution(
                    self.name.as_str(),
                    format!("parameter '{parameter}' is declared more than once"),
                ));
            }
        }

        Ok(())
    }
}

/// Registry statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub total_types: usize,
    pub constructible_types: usize,
    pub types_with_default_constructor: usize,
}

/// Thread-safe map of type names to schemas
#[derive(Default)]
pub struct TypeRegistry {
    schemas: RwLock<HashMap<String, Arc<TypeSchema>>>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("registered_types", &self.registered_types())
            .finish()
    }
}

impl TypeRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a compile-time hydratable type under its type name
    pub fn register<T: Hydratable + Send + 'static>(&self) -> HydrationResult<()> {
        self.register_schema(TypeSchema::from_hydratable::<T>())
    }

    /// Register a compile-time hydratable type under a custom name
    pub fn register_as<T: Hydratable + Send + 'static>(
        &self,
        name: impl Into<String>,
    ) -> HydrationResult<()> {
        let schema = TypeSchema::from_hydratable::<T>();
        self.register_schema(TypeSchema {
            name: name.into(),
            ..schema
        })
    }

    /// Register a schema, replacing any schema with the same name
    pub fn register_schema(&self, schema: TypeSchema) -> HydrationResult<()> {
        schema.validate()?;

        let name = schema.name.clone();
        let parameters = schema.parameters.len();
        let replaced = self
            .schemas
            .write()
            .insert(name.clone(), Arc::new(schema))
            .is_some();

        if replaced {
            info!(type_name = %name, parameters, "Replaced registered type schema");
        } else {
            debug!(type_name = %name, parameters, "Registered type schema");
        }

        Ok(())
    }

    /// Returns `true` if a schema was removed
    pub fn unregister(&self, name: &str) -> bool {
        self.schemas.write().remove(name).is_some()
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.schemas.read().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<TypeSchema>> {
        self.schemas.read().get(name).cloned()
    }

    /// Schema for `name`, or a `TypeResolutionError` if it cannot be constructed
    pub fn resolve(&self, name: &str) -> HydrationResult<Arc<TypeSchema>> {
        let schema = self.get(name).ok_or_else(|| {
            HydrationError::type_resolution(name, "type is not registered")
        })?;

        if !schema.is_constructible() {
            return Err(HydrationError::type_resolution(
                name,
                "type is declared but has no constructor",
            ));
        }

        Ok(schema)
    }

    pub fn len(&self) -> usize {
        self.schemas.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.read().is_empty()
    }

    /// Registered type names, sorted
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.schemas.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn stats(&self) -> RegistryStats {
        let schemas = self.schemas.read();
        RegistryStats {
            total_types: schemas.len(),
            constructible_types: schemas.values().filter(|s| s.is_constructible()).count(),
            types_with_default_constructor: schemas
                .values()
                .filter(|s| s.has_default_constructor())
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hydratable;

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: i64,
        y: i64,
    }

    hydratable!(Point { x: i64, y: i64 } => |x, y| Point { x, y }, default => Point::default());

    #[test]
    fn test_register_hydratable_uses_type_name() {
        let registry = TypeRegistry::new();
        registry.register::<Point>().unwrap();

        assert!(registry.is_registered("Point"));
        let schema = registry.resolve("Point").unwrap();
        assert_eq!(schema.parameters(), &["x".to_string(), "y".to_string()]);
        assert!(schema.has_default_constructor());
    }

    #[test]
    fn test_unknown_type_is_type_resolution_error() {
        let registry = TypeRegistry::new();
        let error = registry.resolve("Ghost").unwrap_err();
        assert!(error.is_type_resolution());
    }

    #[test]
    fn test_declared_only_schema_is_not_constructible() {
        let registry = TypeRegistry::new();
        registry
            .register_schema(TypeSchema::new("Shape").with_parameter("sides"))
            .unwrap();

        assert!(registry.is_registered("Shape"));
        assert!(registry.resolve("Shape").unwrap_err().is_type_resolution());
    }

    #[test]
    fn test_duplicate_parameters_are_rejected() {
        let registry = TypeRegistry::new();
        let schema = TypeSchema::new("Pair")
            .with_parameters(["left", "left"])
            .with_constructor(|_| Ok(Box::new(())));
        assert!(registry.register_schema(schema).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_register_as_and_unregister() {
        let registry = TypeRegistry::new();
        registry.register_as::<Point>("geo.Point").unwrap();
        registry.register::<Point>().unwrap();

        assert_eq!(registry.registered_types(), vec!["Point", "geo.Point"]);
        assert!(registry.unregister("geo.Point"));
        assert!(!registry.unregister("geo.Point"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_schema_without_default_constructor() {
        let schema = TypeSchema::new("Strict")
            .with_parameter("x")
            .with_constructor(|mut args| Ok(Box::new(args.take::<i64>()?)));
        let error = schema.construct_default().err().unwrap();
        assert!(error.is_construction());
    }

    #[derive(Debug, PartialEq)]
    struct Strict {
        x: i64,
    }

    hydratable!(Strict { x: i64 } => |x| Strict { x });

    #[test]
    fn test_hydratable_without_default_registers_no_default_constructor() {
        let schema = TypeSchema::from_hydratable::<Strict>();
        assert!(schema.is_constructible());
        assert!(!schema.has_default_constructor());
    }

    #[test]
    fn test_default_only_schema_has_no_parameters() {
        let schema = TypeSchema::new("Marker")
            .with_parameter("ignored")
            .with_default_constructor(|| Ok(Box::new("marker")));

        assert!(schema.is_constructible());
        assert!(schema.signature().is_nullary());
        let object = schema.construct(CallArguments::new("Marker")).unwrap();
        assert_eq!(*object.downcast::<&str>().unwrap(), "marker");
    }

    #[test]
    fn test_stats() {
        let registry = TypeRegistry::new();
        registry.register::<Point>().unwrap();
        registry.register::<Strict>().unwrap();
        registry
            .register_schema(TypeSchema::new("Abstract"))
            .unwrap();

        assert_eq!(
            registry.stats(),
            RegistryStats {
                total_types: 3,
                constructible_types: 2,
                types_with_default_constructor: 1,
            }
        );
    }
}
