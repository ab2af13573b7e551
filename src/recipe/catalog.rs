//! The static recipe tables.
//!
//! A recipe is an ordered script of tool calls for a common part shape, with
//! `${...}` templates in place of concrete dimensions. The tables are built
//! fresh on each call (parameter objects are `serde_json` values, which have
//! no const constructor); building them is cheap and the result is always
//! identical.

use serde_json::{json, Value};

/// One step of a recipe: a catalog tool plus its (possibly templated) params.
#[derive(Debug, Clone)]
pub struct RecipeStep {
    /// Tool name; must exist in the dispatch catalog.
    pub tool: &'static str,
    /// Parameter object. String values of the form `${expr}` are evaluated
    /// against the recipe inputs at expansion time.
    pub params: Value,
}

/// A named construction sequence.
#[derive(Debug, Clone)]
pub struct Recipe {
    /// Unique recipe name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Grouping for the recipe browser ("primitive", "machined", ...).
    pub category: &'static str,
    /// Inputs that must be present for expansion to start.
    pub required_inputs: &'static [&'static str],
    /// Ordered steps.
    pub steps: Vec<RecipeStep>,
}

fn step(tool: &'static str, params: Value) -> RecipeStep {
    RecipeStep { tool, params }
}

/// Returns all recipes, in declaration order.
#[must_use]
pub fn catalog() -> Vec<Recipe> {
    vec![
        Recipe {
            name: "cylinder",
            description: "A solid cylinder: circle sketched on the front plane, extruded to height.",
            category: "primitive",
            required_inputs: &["diameter", "height"],
            steps: vec![
                step("new_part", json!({})),
                step("create_sketch", json!({ "plane": "Front" })),
                step(
                    "sketch_circle",
                    json!({ "x": 0, "y": 0, "radius": "${diameter/2}" }),
                ),
                step("close_sketch", json!({})),
                step("extrude", json!({ "depth": "${height}" })),
            ],
        },
        Recipe {
            name: "box",
            description: "A rectangular block centred on the origin.",
            category: "primitive",
            required_inputs: &["width", "depth", "height"],
            steps: vec![
                step("new_part", json!({})),
                step("create_sketch", json!({ "plane": "Top" })),
                step(
                    "sketch_rectangle",
                    json!({
                        "x1": "${-width/2}",
                        "y1": "${-depth/2}",
                        "x2": "${width/2}",
                        "y2": "${depth/2}",
                    }),
                ),
                step("close_sketch", json!({})),
                step("extrude", json!({ "depth": "${height}" })),
            ],
        },
        Recipe {
            name: "plate_with_hole",
            description: "A rectangular plate with a centred drilled hole.",
            category: "machined",
            required_inputs: &["width", "length", "thickness", "hole_diameter"],
            steps: vec![
                step("new_part", json!({})),
                step("create_sketch", json!({ "plane": "Top" })),
                step(
                    "sketch_rectangle",
                    json!({
                        "x1": "${-width/2}",
                        "y1": "${-length/2}",
                        "x2": "${width/2}",
                        "y2": "${length/2}",
                    }),
                ),
                step("close_sketch", json!({})),
                step("extrude", json!({ "depth": "${thickness}" })),
                step(
                    "hole",
                    json!({ "diameter": "${hole_diameter}", "x": 0, "y": 0 }),
                ),
            ],
        },
        Recipe {
            name: "shaft_with_chamfer",
            description: "A turned shaft with chamfered ends.",
            category: "machined",
            required_inputs: &["diameter", "length", "chamfer"],
            steps: vec![
                step("new_part", json!({})),
                step("create_sketch", json!({ "plane": "Front" })),
                step(
                    "sketch_circle",
                    json!({ "x": 0, "y": 0, "radius": "${diameter/2}" }),
                ),
                step("close_sketch", json!({})),
                step("extrude", json!({ "depth": "${length}" })),
                step("chamfer", json!({ "distance": "${chamfer}" })),
            ],
        },
        Recipe {
            name: "washer",
            description: "A flat washer: outer disc extruded, inner hole cut through.",
            category: "machined",
            required_inputs: &["outer_diameter", "inner_diameter", "thickness"],
            steps: vec![
                step("new_part", json!({})),
                step("create_sketch", json!({ "plane": "Front" })),
                step(
                    "sketch_circle",
                    json!({ "x": 0, "y": 0, "radius": "${outer_diameter/2}" }),
                ),
                step("close_sketch", json!({})),
                step("extrude", json!({ "depth": "${thickness}" })),
                step(
                    "hole",
                    json!({ "diameter": "${inner_diameter}", "x": 0, "y": 0 }),
                ),
            ],
        },
    ]
}

/// Looks up a recipe by name.
#[must_use]
pub fn lookup(name: &str) -> Option<Recipe> {
    catalog().into_iter().find(|r| r.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_recipe() {
        let recipe = lookup("cylinder").unwrap();
        assert_eq!(recipe.required_inputs, &["diameter", "height"]);
        assert_eq!(recipe.steps.len(), 5);
    }

    #[test]
    fn lookup_unknown_recipe() {
        assert!(lookup("klein_bottle").is_none());
    }

    #[test]
    fn names_are_unique() {
        let recipes = catalog();
        for (i, a) in recipes.iter().enumerate() {
            for b in &recipes[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn catalog_is_stable_across_calls() {
        let a = catalog();
        let b = catalog();
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.name, y.name);
            assert_eq!(x.steps.len(), y.steps.len());
        }
    }
}
