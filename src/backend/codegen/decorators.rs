//! Decorator extraction.
//!
//! Decorators carry model metadata that has no serde meaning. They survive in the output as doc
//! lines (`/// @Term("A person")`) above the item they annotate.

use std::collections::BTreeMap;

use crate::frontend::model::{Decorator, DecoratorLiteral};

/// Decorator name -> argument list
pub type DecoratorMap = BTreeMap<String, Vec<DecoratorLiteral>>;

/// Collect decorators by name. Later decorators with the same name replace earlier ones.
///
/// Returns `None` when there are no decorators at all, so "no metadata" stays distinct from
/// "empty metadata".
pub fn extract_decorators(decorators: &[Decorator]) -> Option<DecoratorMap> {
    if decorators.is_empty() {
        return None;
    }
    Some(
        decorators
            .iter()
            .map(|d| (d.name.clone(), d.arguments.clone()))
            .collect(),
    )
}

/// Render extracted decorators as doc-comment text, one entry per decorator.
pub fn render_decorators(map: &DecoratorMap) -> Vec<String> {
    map.iter()
        .map(|(name, args)| {
            if args.is_empty() {
                format!("@{}", name)
            } else {
                let args: Vec<String> = args.iter().map(ToString::to_string).collect();
                format!("@{}({})", name, args.join(", "))
            }
        })
        .collect()
}
