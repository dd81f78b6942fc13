//! Strategy id strings.
//!
//! An id is the provider name followed by `:name=value` for every supplied
//! parameter, in the provider's declared order:
//!
//! ```text
//! UCT:c_p=0.5:iterationCount=1000
//! ```
//!
//! Names and formatted values may not contain `:` or `=`.

use std::collections::BTreeMap;

use crate::core::{Error, Result};
use crate::strategy::{StrategyParameters, StrategyProvider};

/// Separates the provider name and the parameter components.
pub const SEPARATOR: char = ':';

/// Separates a parameter name from its value.
pub const ASSIGNMENT: char = '=';

fn check_text(what: &'static str, text: &str) -> Result<()> {
    match text.chars().find(|&c| c == SEPARATOR || c == ASSIGNMENT) {
        Some(character) => Err(Error::DisallowedCharacter {
            what,
            text: text.to_string(),
            character,
        }),
        None => Ok(()),
    }
}

/// Check that a strategy name can appear in an id.
pub fn check_name(name: &str) -> Result<()> {
    check_text("strategy name", name)
}

/// Encode a provider and the parameters supplied to it.
///
/// Only explicitly supplied parameters appear; defaults stay implicit.
pub fn encode(provider: &dyn StrategyProvider, params: &StrategyParameters) -> Result<String> {
    let name = provider.name();
    check_name(name)?;

    let declared = provider.parameters();
    if let Some((desc, _)) = params
        .iter()
        .find(|(desc, _)| !declared.iter().any(|d| d.name() == desc.name()))
    {
        return Err(Error::UnknownParameter {
            strategy: name.to_string(),
            parameter: desc.name().to_string(),
        });
    }

    let mut id = name.to_string();
    for desc in declared {
        if let Some(value) = params.get(desc.name()) {
            let text = value.to_string();
            check_text("parameter name", desc.name())?;
            check_text("parameter value", &text)?;
            id.push(SEPARATOR);
            id.push_str(desc.name());
            id.push(ASSIGNMENT);
            id.push_str(&text);
        }
    }
    Ok(id)
}

/// Split an id into its provider name and raw `(name, value)` components.
pub fn split(id: &str) -> Result<(&str, Vec<(&str, &str)>)> {
    let mut parts = id.split(SEPARATOR);
    let name = parts.next().unwrap_or_default();
    let components = parts
        .map(|component| {
            let mut halves = component.split(ASSIGNMENT);
            match (halves.next(), halves.next(), halves.next()) {
                (Some(key), Some(value), None) => Ok((key, value)),
                _ => Err(Error::MalformedStrategyId {
                    id: id.to_string(),
                    component: component.to_string(),
                }),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((name, components))
}

/// Decode the parameters of an id against the provider it names.
///
/// The caller resolves the provider; its name must match the id's.
pub fn decode_parameters(provider: &dyn StrategyProvider, id: &str) -> Result<StrategyParameters> {
    let (name, components) = split(id)?;
    if name != provider.name() {
        return Err(Error::UnknownStrategy(name.to_string()));
    }

    let mut builder = StrategyParameters::builder();
    for (key, value) in components {
        let desc = provider
            .parameters()
            .iter()
            .find(|d| d.name() == key)
            .ok_or_else(|| Error::UnknownParameter {
                strategy: name.to_string(),
                parameter: key.to_string(),
            })?;
        builder = builder.parse(desc, value)?;
    }
    Ok(builder.build())
}

/// Raw parameter values of an id, keyed by parameter name.
///
/// Needs no provider, so it works for ids of strategies that are no longer
/// registered. Useful for grouping stored results by parameter value.
pub fn parameters_from_id(id: &str) -> Result<BTreeMap<String, String>> {
    let (_, components) = split(id)?;
    let mut params = BTreeMap::new();
    for (key, value) in components {
        if params.insert(key.to_string(), value.to_string()).is_some() {
            return Err(Error::DuplicateParameter(key.to_string()));
        }
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{LookaheadProvider, RandomProvider, UctProvider};

    #[test]
    fn test_encode_uses_declared_order() {
        let params = StrategyParameters::builder()
            .put(&UctProvider::iteration_count(), 1000_i64)
            .unwrap()
            .put(&UctProvider::exploration(), 0.5)
            .unwrap()
            .build();
        let id = encode(&UctProvider::record_all_nodes(), &params).unwrap();
        assert_eq!(id, "UCT:c_p=0.5:iterationCount=1000");
    }

    #[test]
    fn test_encode_without_parameters() {
        let id = encode(&RandomProvider, &StrategyParameters::empty()).unwrap();
        assert_eq!(id, "Random");
    }

    #[test]
    fn test_encode_rejects_foreign_parameters() {
        let params = StrategyParameters::builder()
            .put(&LookaheadProvider::plies(), 2_i64)
            .unwrap()
            .build();
        assert!(matches!(
            encode(&RandomProvider, &params),
            Err(Error::UnknownParameter { .. })
        ));
    }

    #[test]
    fn test_decode() {
        let provider = LookaheadProvider::new();
        let params = decode_parameters(&provider, "NPlyLookahead:pliesToLookAhead=3").unwrap();
        assert_eq!(params.get_int(&LookaheadProvider::plies()).unwrap(), 3);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_decode_errors() {
        let provider = LookaheadProvider::new();
        assert!(matches!(
            decode_parameters(&provider, "NPlyLookahead:pliesToLookAhead"),
            Err(Error::MalformedStrategyId { .. })
        ));
        assert!(matches!(
            decode_parameters(&provider, "NPlyLookahead:a=1=2"),
            Err(Error::MalformedStrategyId { .. })
        ));
        assert!(matches!(
            decode_parameters(&provider, "NPlyLookahead:depth=3"),
            Err(Error::UnknownParameter { .. })
        ));
        assert!(matches!(
            decode_parameters(&provider, "NPlyLookahead:pliesToLookAhead=0"),
            Err(Error::ParameterOutOfBounds { .. })
        ));
        assert!(matches!(
            decode_parameters(&provider, "NPlyLookahead:pliesToLookAhead=two"),
            Err(Error::InvalidParameterValue { .. })
        ));
        assert!(matches!(
            decode_parameters(&provider, "NPlyLookahead:pliesToLookAhead=2:pliesToLookAhead=3"),
            Err(Error::DuplicateParameter(_))
        ));
    }

    #[test]
    fn test_parameters_from_id() {
        let params = parameters_from_id("UCT:c_p=0.5:iterationCount=1000").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["c_p"], "0.5");
        assert_eq!(params["iterationCount"], "1000");

        assert!(parameters_from_id("Random").unwrap().is_empty());
    }
}
