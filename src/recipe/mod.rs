//! Recipe catalog and expansion.
//!
//! Expansion turns a recipe plus a map of named inputs into an ordered list
//! of concrete (tool, parameters) pairs. It never invokes the tools itself;
//! the caller feeds each pair to [`crate::dispatch`] sequentially, awaiting
//! each call before the next, and stops at the first failure.
//!
//! Expansion is all-or-nothing: a missing input or a bad template fails the
//! whole recipe before any step is returned.

mod catalog;
mod expr;

pub use catalog::{catalog, lookup, Recipe, RecipeStep};
pub use expr::ExprError;

use std::collections::HashMap;

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors that can occur while expanding a recipe.
#[derive(Error, Debug)]
pub enum RecipeError {
    /// The recipe name is not in the catalog.
    #[error("unknown recipe: {name}")]
    UnknownRecipe {
        /// The unrecognised recipe name.
        name: String,
    },

    /// A required input was not supplied.
    #[error("recipe '{recipe}' is missing required input '{input}'")]
    MissingInput {
        /// The recipe being expanded.
        recipe: String,
        /// Name of the missing input.
        input: String,
    },

    /// A `${...}` template could not be evaluated.
    #[error("failed to evaluate '{expr}' in recipe '{recipe}'")]
    Expression {
        /// The recipe being expanded.
        recipe: String,
        /// The offending expression, without the `${}` wrapper.
        expr: String,
        /// The underlying evaluation error.
        #[source]
        source: ExprError,
    },

    /// A template evaluated to NaN or infinity.
    #[error("expression '{expr}' in recipe '{recipe}' is not a finite number")]
    NonFinite {
        /// The recipe being expanded.
        recipe: String,
        /// The offending expression.
        expr: String,
    },
}

/// One concrete step of an expanded recipe.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ExpandedStep {
    /// Tool name to dispatch.
    pub tool: String,
    /// Fully substituted parameter object.
    pub params: Value,
}

/// Expands a recipe against the supplied inputs.
///
/// Numeric inputs become variables for `${...}` arithmetic; string inputs can
/// be spliced with a bare `${name}` template. Pure function over its inputs.
///
/// # Errors
///
/// Fails without returning any steps if the recipe is unknown, a required
/// input is absent, or any template fails to evaluate.
pub fn expand(name: &str, inputs: &Map<String, Value>) -> Result<Vec<ExpandedStep>, RecipeError> {
    let recipe = lookup(name).ok_or_else(|| RecipeError::UnknownRecipe {
        name: name.to_string(),
    })?;

    for input in recipe.required_inputs {
        if !inputs.contains_key(*input) {
            return Err(RecipeError::MissingInput {
                recipe: recipe.name.to_string(),
                input: (*input).to_string(),
            });
        }
    }

    let numeric: HashMap<String, f64> = inputs
        .iter()
        .filter_map(|(k, v)| v.as_f64().map(|n| (k.clone(), n)))
        .collect();

    let mut steps = Vec::with_capacity(recipe.steps.len());
    for step in &recipe.steps {
        let params = substitute(recipe.name, &step.params, inputs, &numeric)?;
        steps.push(ExpandedStep {
            tool: step.tool.to_string(),
            params,
        });
    }

    Ok(steps)
}

/// Recursively substitutes `${...}` templates in a parameter value.
fn substitute(
    recipe: &str,
    value: &Value,
    inputs: &Map<String, Value>,
    numeric: &HashMap<String, f64>,
) -> Result<Value, RecipeError> {
    match value {
        Value::String(s) => match template_body(s) {
            Some(expr) => resolve_template(recipe, expr, inputs, numeric),
            None => Ok(value.clone()),
        },
        Value::Object(map) => {
            let mut out = Map::new();
            for (k, v) in map {
                out.insert(k.clone(), substitute(recipe, v, inputs, numeric)?);
            }
            Ok(Value::Object(out))
        }
        Value::Array(items) => items
            .iter()
            .map(|v| substitute(recipe, v, inputs, numeric))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        _ => Ok(value.clone()),
    }
}

/// Returns the inner expression if the whole string is a `${...}` template.
fn template_body(s: &str) -> Option<&str> {
    s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}'))
}

/// Evaluates one template: bare string inputs pass through, everything else
/// goes through the arithmetic evaluator.
fn resolve_template(
    recipe: &str,
    expr: &str,
    inputs: &Map<String, Value>,
    numeric: &HashMap<String, f64>,
) -> Result<Value, RecipeError> {
    // A bare `${name}` naming a string input splices the string.
    if let Some(Value::String(s)) = inputs.get(expr.trim()) {
        return Ok(Value::String(s.clone()));
    }

    let result = expr::evaluate(expr, numeric).map_err(|source| RecipeError::Expression {
        recipe: recipe.to_string(),
        expr: expr.to_string(),
        source,
    })?;

    serde_json::Number::from_f64(result)
        .map(Value::Number)
        .ok_or_else(|| RecipeError::NonFinite {
            recipe: recipe.to_string(),
            expr: expr.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn cylinder_radius_is_half_the_diameter() {
        let steps = expand("cylinder", &obj(json!({ "diameter": 0.1, "height": 0.05 }))).unwrap();

        let circle = steps.iter().find(|s| s.tool == "sketch_circle").unwrap();
        assert_eq!(circle.params["radius"].as_f64().unwrap(), 0.05);

        let extrude = steps.iter().find(|s| s.tool == "extrude").unwrap();
        assert_eq!(extrude.params["depth"].as_f64().unwrap(), 0.05);
    }

    #[test]
    fn steps_come_back_in_recipe_order() {
        let steps = expand("cylinder", &obj(json!({ "diameter": 0.1, "height": 0.05 }))).unwrap();
        let tools: Vec<&str> = steps.iter().map(|s| s.tool.as_str()).collect();
        assert_eq!(
            tools,
            vec!["new_part", "create_sketch", "sketch_circle", "close_sketch", "extrude"]
        );
    }

    #[test]
    fn negative_templates_centre_the_box() {
        let steps = expand(
            "box",
            &obj(json!({ "width": 0.2, "depth": 0.1, "height": 0.05 })),
        )
        .unwrap();

        let rect = steps.iter().find(|s| s.tool == "sketch_rectangle").unwrap();
        assert_eq!(rect.params["x1"].as_f64().unwrap(), -0.1);
        assert_eq!(rect.params["x2"].as_f64().unwrap(), 0.1);
        assert_eq!(rect.params["y1"].as_f64().unwrap(), -0.05);
    }

    #[test]
    fn missing_input_fails_before_any_step() {
        let err = expand("cylinder", &obj(json!({ "diameter": 0.1 }))).unwrap_err();
        assert!(
            matches!(err, RecipeError::MissingInput { ref input, .. } if input == "height"),
            "got {err}"
        );
    }

    #[test]
    fn unknown_recipe_fails() {
        let err = expand("klein_bottle", &obj(json!({}))).unwrap_err();
        assert!(matches!(err, RecipeError::UnknownRecipe { .. }));
    }

    #[test]
    fn literal_params_pass_through_untouched() {
        let steps = expand("cylinder", &obj(json!({ "diameter": 0.1, "height": 0.05 }))).unwrap();
        let sketch = steps.iter().find(|s| s.tool == "create_sketch").unwrap();
        assert_eq!(sketch.params, json!({ "plane": "Front" }));
    }

    #[test]
    fn expansion_is_idempotent() {
        let inputs = obj(json!({ "diameter": 0.1, "height": 0.05 }));
        let a = expand("cylinder", &inputs).unwrap();
        let b = expand("cylinder", &inputs).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn extra_inputs_are_allowed() {
        let steps = expand(
            "cylinder",
            &obj(json!({ "diameter": 0.1, "height": 0.05, "colour": "red" })),
        )
        .unwrap();
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn string_input_requires_a_bare_name() {
        // Arithmetic on a string input is an evaluation error, not a splice.
        let err = expand(
            "cylinder",
            &obj(json!({ "diameter": "ten", "height": 0.05 })),
        )
        .unwrap_err();
        assert!(matches!(err, RecipeError::Expression { .. }));
    }
}
