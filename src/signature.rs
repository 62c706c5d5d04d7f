//! # Constructor Signatures and Call Arguments
//!
//! A [`ConstructorSignature`] is the ordered parameter list of a target type's
//! constructor. It is derived fresh for every hydration call from either a
//! [`Hydratable`](crate::Hydratable) implementation or a registered
//! [`TypeSchema`](crate::registry::TypeSchema).
//!
//! [`CallArguments`] is the positional argument sequence built while matching
//! raw keys, consumed by the constructor in declaration order.

use crate::error::{HydrationError, HydrationResult};
use crate::hydratable::Hydratable;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// One declared constructor parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub position: usize,
}

/// Ordered constructor parameters of one target type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorSignature {
    type_name: String,
    parameters: Vec<ParameterDescriptor>,
}

impl ConstructorSignature {
    pub fn new<I, S>(type_name: impl Into<String>, parameter_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parameters = parameter_names
            .into_iter()
            .enumerate()
            .map(|(position, name)| ParameterDescriptor {
                name: name.into(),
                position,
            })
            .collect();

        Self {
            type_name: type_name.into(),
            parameters,
        }
    }

    /// Signature of a compile-time hydratable type
    pub fn of<T: Hydratable>() -> Self {
        Self::new(T::type_name(), T::constructor_parameters().iter().copied())
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn arity(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_nullary(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl fmt::Display for ConstructorSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.type_name, self.parameter_names().join(", "))
    }
}

/// A raw value matched to a constructor parameter
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgument {
    pub parameter: String,
    pub key: String,
    pub value: Value,
}

/// Positional constructor arguments.
///
/// Values are handed out in declaration order with [`CallArguments::take`],
/// which converts each raw value into the parameter's Rust type.
#[derive(Debug, Clone, PartialEq)]
pub struct CallArguments {
    type_name: String,
    arguments: Vec<ResolvedArgument>,
    cursor: usize,
}

impl CallArguments {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            arguments: Vec::new(),
            cursor: 0,
        }
    }

    pub(crate) fn push(&mut self, argument: ResolvedArgument) {
        self.arguments.push(argument);
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }

    pub fn arguments(&self) -> &[ResolvedArgument] {
        &self.arguments
    }

    /// Number of arguments not yet consumed by `take`/`take_value`
    pub fn remaining(&self) -> usize {
        self.arguments.len() - self.cursor
    }

    /// Take the next raw value without conversion.
    ///
    /// The matched value stays readable through [`arguments`](Self::arguments).
    pub fn take_value(&mut self) -> HydrationResult<Value> {
        let argument = self.arguments.get(self.cursor).ok_or_else(|| {
            HydrationError::construction(
                self.type_name.as_str(),
                format!(
                    "constructor asked for argument {} but only {} were resolved",
                    self.cursor + 1,
                    self.arguments.len()
                ),
            )
        })?;
        let value = argument.value.clone();
        self.cursor += 1;
        Ok(value)
    }

    /// Take the next value and convert it into the parameter's type
    pub fn take<T: DeserializeOwned>(&mut self) -> HydrationResult<T> {
        let position = self.cursor;
        let value = self.take_value()?;
        serde_json::from_value(value).map_err(|e| {
            let argument = &self.arguments[position];
            HydrationError::construction(
                self.type_name.clone(),
                format!(
                    "parameter '{}' (key '{}') could not be converted: {e}",
                    argument.parameter, argument.key
                ),
            )
        })
    }

    /// Raw values in declaration order
    pub fn into_values(self) -> Vec<Value> {
        self.arguments.into_iter().map(|a| a.value).collect()
    }
}
