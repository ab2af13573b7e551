//! The static tool catalog.
//!
//! One entry per desktop server endpoint. Entries are structurally identical:
//! a tool name, an HTTP method and path, and a flat parameter list from which
//! the JSON input schema is generated. Paths may contain `{placeholder}`
//! segments that are filled from (and removed from) the tool arguments at
//! dispatch time.
//!
//! Declaration order is preserved in `tools/list`, grouped by endpoint family.

use std::sync::LazyLock;

use indexmap::IndexMap;
use serde_json::{json, Map, Value};

/// HTTP method used by an endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET; tool arguments may only fill path placeholders.
    Get,
    /// POST; remaining arguments are sent as the JSON body.
    Post,
}

impl HttpMethod {
    /// The method name as it appears on the wire.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A JSON string.
    String,
    /// A JSON number.
    Number,
    /// A JSON integer.
    Integer,
    /// A JSON boolean.
    Boolean,
    /// A JSON array.
    Array,
}

impl ParamKind {
    const fn json_type(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Array => "array",
        }
    }
}

/// A single tool parameter.
#[derive(Debug, Clone, Copy)]
pub struct Param {
    /// Parameter name as it appears in the schema and the forwarded JSON.
    pub name: &'static str,
    /// JSON type.
    pub kind: ParamKind,
    /// Whether the parameter is listed in the schema's `required` array.
    pub required: bool,
    /// One-line description for the schema.
    pub description: &'static str,
}

/// Shorthand for the parameter tables below.
const fn p(name: &'static str, kind: ParamKind, required: bool, description: &'static str) -> Param {
    Param {
        name,
        kind,
        required,
        description,
    }
}

/// A catalog entry: one tool, one endpoint.
#[derive(Debug, Clone, Copy)]
pub struct Endpoint {
    /// Unique tool name.
    pub name: &'static str,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path on the desktop server, may contain `{placeholder}` segments.
    pub path: &'static str,
    /// Human-readable description, surfaced in `tools/list`.
    pub description: &'static str,
    /// Parameters, in schema order.
    pub params: &'static [Param],
}

impl Endpoint {
    /// Builds the JSON Schema for this tool's input.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in self.params {
            properties.insert(
                param.name.to_string(),
                json!({
                    "type": param.kind.json_type(),
                    "description": param.description,
                }),
            );
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Returns the `{placeholder}` names embedded in the path, in order.
    #[must_use]
    pub fn path_placeholders(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        let mut rest = self.path;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start + 1..].find('}') else {
                break;
            };
            names.push(&rest[start + 1..start + 1 + len]);
            rest = &rest[start + 1 + len + 1..];
        }
        names
    }
}

use HttpMethod::{Get, Post};
use ParamKind::{Array, Boolean, Integer, Number, String as Str};

/// Every proxied tool, grouped by endpoint family.
static ENDPOINTS: &[Endpoint] = &[
    // === Desktop server health ===
    Endpoint {
        name: "get_desktop_health",
        method: Get,
        path: "/health",
        description: "Check whether the desktop automation server is reachable and \
                      which CAD applications it currently has open.",
        params: &[],
    },
    // === SolidWorks document lifecycle ===
    Endpoint {
        name: "open_document",
        method: Post,
        path: "/com/solidworks/open",
        description: "Open a part, assembly, or drawing document in SolidWorks.",
        params: &[p("filepath", Str, true, "Absolute path to the document")],
    },
    Endpoint {
        name: "new_part",
        method: Post,
        path: "/com/solidworks/new-part",
        description: "Create a new empty part document.",
        params: &[p("template", Str, false, "Part template name (default: standard part)")],
    },
    Endpoint {
        name: "save_document",
        method: Post,
        path: "/com/solidworks/save",
        description: "Save the active document, optionally to a new path.",
        params: &[p("filepath", Str, false, "Save-as target path (default: in place)")],
    },
    Endpoint {
        name: "close_document",
        method: Post,
        path: "/com/solidworks/close",
        description: "Close the active document.",
        params: &[p("save", Boolean, false, "Save before closing (default: false)")],
    },
    Endpoint {
        name: "rebuild",
        method: Post,
        path: "/com/solidworks/rebuild",
        description: "Force a full rebuild of the active document's feature tree.",
        params: &[],
    },
    // === SolidWorks sketching ===
    Endpoint {
        name: "create_sketch",
        method: Post,
        path: "/com/solidworks/sketch",
        description: "Start a new 2D sketch on a reference plane of the active part.",
        params: &[p("plane", Str, true, "Plane name: Front, Top, or Right")],
    },
    Endpoint {
        name: "sketch_circle",
        method: Post,
        path: "/com/solidworks/sketch/circle",
        description: "Draw a circle in the open sketch. Coordinates in metres.",
        params: &[
            p("x", Number, true, "Centre X in metres"),
            p("y", Number, true, "Centre Y in metres"),
            p("radius", Number, true, "Radius in metres"),
        ],
    },
    Endpoint {
        name: "sketch_rectangle",
        method: Post,
        path: "/com/solidworks/sketch/rectangle",
        description: "Draw a corner rectangle in the open sketch. Coordinates in metres.",
        params: &[
            p("x1", Number, true, "First corner X"),
            p("y1", Number, true, "First corner Y"),
            p("x2", Number, true, "Opposite corner X"),
            p("y2", Number, true, "Opposite corner Y"),
        ],
    },
    Endpoint {
        name: "sketch_line",
        method: Post,
        path: "/com/solidworks/sketch/line",
        description: "Draw a line segment in the open sketch. Coordinates in metres.",
        params: &[
            p("x1", Number, true, "Start X"),
            p("y1", Number, true, "Start Y"),
            p("x2", Number, true, "End X"),
            p("y2", Number, true, "End Y"),
        ],
    },
    Endpoint {
        name: "sketch_arc",
        method: Post,
        path: "/com/solidworks/sketch/arc",
        description: "Draw a centre-point arc in the open sketch. Angles in degrees.",
        params: &[
            p("x", Number, true, "Centre X in metres"),
            p("y", Number, true, "Centre Y in metres"),
            p("radius", Number, true, "Radius in metres"),
            p("start_angle", Number, true, "Start angle in degrees"),
            p("end_angle", Number, true, "End angle in degrees"),
        ],
    },
    Endpoint {
        name: "close_sketch",
        method: Post,
        path: "/com/solidworks/sketch/close",
        description: "Exit the open sketch, keeping its geometry.",
        params: &[],
    },
    // === SolidWorks features ===
    Endpoint {
        name: "extrude",
        method: Post,
        path: "/com/solidworks/extrude",
        description: "Extrude the last closed sketch into a boss feature.",
        params: &[
            p("depth", Number, true, "Extrusion depth in metres"),
            p("draft_angle", Number, false, "Draft angle in degrees (default: 0)"),
            p("both_directions", Boolean, false, "Extrude symmetrically (default: false)"),
        ],
    },
    Endpoint {
        name: "cut_extrude",
        method: Post,
        path: "/com/solidworks/cut-extrude",
        description: "Cut material using the last closed sketch.",
        params: &[
            p("depth", Number, false, "Cut depth in metres (ignored with through_all)"),
            p("through_all", Boolean, false, "Cut through the whole body (default: false)"),
        ],
    },
    Endpoint {
        name: "revolve",
        method: Post,
        path: "/com/solidworks/revolve",
        description: "Revolve the last closed sketch around its construction axis.",
        params: &[p("angle", Number, true, "Revolve angle in degrees")],
    },
    Endpoint {
        name: "fillet",
        method: Post,
        path: "/com/solidworks/fillet",
        description: "Apply a constant-radius fillet to the selected edges.",
        params: &[p("radius", Number, true, "Fillet radius in metres")],
    },
    Endpoint {
        name: "chamfer",
        method: Post,
        path: "/com/solidworks/chamfer",
        description: "Apply an equal-distance chamfer to the selected edges.",
        params: &[p("distance", Number, true, "Chamfer distance in metres")],
    },
    Endpoint {
        name: "shell",
        method: Post,
        path: "/com/solidworks/shell",
        description: "Shell the active body, removing the selected faces.",
        params: &[p("thickness", Number, true, "Wall thickness in metres")],
    },
    Endpoint {
        name: "hole",
        method: Post,
        path: "/com/solidworks/hole",
        description: "Place a simple drilled hole at sketch coordinates on the active face.",
        params: &[
            p("diameter", Number, true, "Hole diameter in metres"),
            p("x", Number, true, "Centre X in metres"),
            p("y", Number, true, "Centre Y in metres"),
            p("depth", Number, false, "Hole depth in metres (default: through)"),
        ],
    },
    Endpoint {
        name: "linear_pattern",
        method: Post,
        path: "/com/solidworks/pattern/linear",
        description: "Pattern the last feature along the X axis.",
        params: &[
            p("count", Integer, true, "Number of instances including the seed"),
            p("spacing", Number, true, "Instance spacing in metres"),
        ],
    },
    Endpoint {
        name: "circular_pattern",
        method: Post,
        path: "/com/solidworks/pattern/circular",
        description: "Pattern the last feature around the part origin.",
        params: &[
            p("count", Integer, true, "Number of instances including the seed"),
            p("angle", Number, true, "Total sweep angle in degrees"),
        ],
    },
    // === SolidWorks output ===
    Endpoint {
        name: "mass_properties",
        method: Get,
        path: "/com/solidworks/mass-properties",
        description: "Read mass, volume, and centre of mass of the active part.",
        params: &[],
    },
    Endpoint {
        name: "export_step",
        method: Post,
        path: "/com/solidworks/export/step",
        description: "Export the active document as STEP.",
        params: &[p("filepath", Str, true, "Output .step path")],
    },
    Endpoint {
        name: "export_pdf",
        method: Post,
        path: "/com/solidworks/export/pdf",
        description: "Export the active drawing as PDF.",
        params: &[p("filepath", Str, true, "Output .pdf path")],
    },
    Endpoint {
        name: "screenshot",
        method: Post,
        path: "/com/solidworks/screenshot",
        description: "Capture the active viewport as an image on the desktop server.",
        params: &[p("view", Str, false, "Named view to activate first (default: current)")],
    },
    // === Inventor (same operations, different COM backend) ===
    Endpoint {
        name: "inventor_open_document",
        method: Post,
        path: "/com/inventor/open",
        description: "Open a document in Autodesk Inventor.",
        params: &[p("filepath", Str, true, "Absolute path to the document")],
    },
    Endpoint {
        name: "inventor_extrude",
        method: Post,
        path: "/com/inventor/extrude",
        description: "Extrude the active Inventor sketch.",
        params: &[p("depth", Number, true, "Extrusion depth in metres")],
    },
    // === ACHE engineering calculations ===
    Endpoint {
        name: "calculate_thermal",
        method: Post,
        path: "/ache/calculate/thermal",
        description: "Run the air-cooled heat exchanger thermal rating calculation.",
        params: &[
            p("duty", Number, true, "Heat duty in kW"),
            p("inlet_temp", Number, true, "Process inlet temperature in degrees C"),
            p("outlet_temp", Number, true, "Process outlet temperature in degrees C"),
        ],
    },
    Endpoint {
        name: "calculate_pressure_drop",
        method: Post,
        path: "/ache/calculate/pressure",
        description: "Calculate tube-side pressure drop for the current bundle layout.",
        params: &[
            p("flow_rate", Number, true, "Mass flow rate in kg/s"),
            p("tube_diameter", Number, true, "Tube inner diameter in metres"),
        ],
    },
    Endpoint {
        name: "calculate_nozzle_loads",
        method: Post,
        path: "/ache/calculate/nozzle-loads",
        description: "Check nozzle loads against allowables for a flange rating.",
        params: &[
            p("nozzle_size", Number, true, "Nominal nozzle size in inches"),
            p("flange_rating", Str, false, "Flange class, e.g. '150', '300' (default: 150)"),
        ],
    },
    Endpoint {
        name: "ache_job_summary",
        method: Get,
        path: "/ache/jobs/{job_id}/summary",
        description: "Fetch the stored summary of a completed ACHE calculation job.",
        params: &[p("job_id", Str, true, "Job identifier returned by a calculate call")],
    },
    // === Drawing validation ===
    Endpoint {
        name: "check_holes",
        method: Post,
        path: "/phase25/check-holes",
        description: "Validate hole callouts on a drawing against the model.",
        params: &[p("drawing", Str, true, "Drawing file path or part number")],
    },
    Endpoint {
        name: "check_welds",
        method: Post,
        path: "/phase25/check-welds",
        description: "Validate weld symbols and weldment callouts on a drawing.",
        params: &[p("drawing", Str, true, "Drawing file path or part number")],
    },
    Endpoint {
        name: "check_gdt",
        method: Post,
        path: "/phase25/check-gdt",
        description: "Validate GD&T frames, datums, and tolerances on a drawing.",
        params: &[p("drawing", Str, true, "Drawing file path or part number")],
    },
    Endpoint {
        name: "check_materials",
        method: Post,
        path: "/phase25/check-materials",
        description: "Validate material and specification callouts on a drawing.",
        params: &[p("drawing", Str, true, "Drawing file path or part number")],
    },
    Endpoint {
        name: "check_drawing",
        method: Post,
        path: "/phase25/check-drawing",
        description: "Run the generic whole-drawing check (title block, borders, views).",
        params: &[p("drawing", Str, true, "Drawing file path or part number")],
    },
    Endpoint {
        name: "validate_comprehensive",
        method: Post,
        path: "/phase25/validate",
        description: "Run the full validation suite on a drawing.",
        params: &[
            p("drawing", Str, true, "Drawing file path or part number"),
            p("categories", Array, false, "Restrict to these check categories (default: all)"),
        ],
    },
    Endpoint {
        name: "recent_validations",
        method: Get,
        path: "/phase25/validations/recent",
        description: "List recently completed validation runs.",
        params: &[],
    },
    Endpoint {
        name: "validation_report",
        method: Get,
        path: "/phase25/validations/{validation_id}",
        description: "Fetch the full report of one validation run.",
        params: &[p("validation_id", Str, true, "Validation run identifier")],
    },
    // === Memory search ===
    Endpoint {
        name: "search_trades",
        method: Post,
        path: "/memory/search/trades",
        description: "Search the trade journal.",
        params: &[
            p("query", Str, true, "Free-text search query"),
            p("limit", Integer, false, "Maximum results (default: 10)"),
        ],
    },
    Endpoint {
        name: "search_parts",
        method: Post,
        path: "/memory/search/parts",
        description: "Search the part library index.",
        params: &[
            p("query", Str, true, "Free-text search query"),
            p("limit", Integer, false, "Maximum results (default: 10)"),
        ],
    },
    Endpoint {
        name: "get_trade",
        method: Get,
        path: "/memory/trades/{trade_id}",
        description: "Fetch one trade journal entry by id.",
        params: &[p("trade_id", Str, true, "Trade identifier")],
    },
    Endpoint {
        name: "save_note",
        method: Post,
        path: "/memory/notes",
        description: "Save a free-text note to memory.",
        params: &[
            p("text", Str, true, "Note body"),
            p("tags", Array, false, "Optional tags"),
        ],
    },
];

/// Name-indexed view of the catalog, preserving declaration order.
static CATALOG: LazyLock<IndexMap<&'static str, &'static Endpoint>> =
    LazyLock::new(|| ENDPOINTS.iter().map(|e| (e.name, e)).collect());

/// Returns all catalog entries in declaration order.
pub fn endpoints() -> impl Iterator<Item = &'static Endpoint> {
    CATALOG.values().copied()
}

/// Looks up a tool by name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Endpoint> {
    CATALOG.get(name).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_known_tool() {
        let ep = lookup("extrude").unwrap();
        assert_eq!(ep.method, HttpMethod::Post);
        assert_eq!(ep.path, "/com/solidworks/extrude");
    }

    #[test]
    fn lookup_unknown_tool() {
        assert!(lookup("carve_runes").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert!(lookup("Extrude").is_none());
    }

    #[test]
    fn names_are_unique() {
        // IndexMap::collect keeps the last duplicate, so compare counts.
        assert_eq!(CATALOG.len(), ENDPOINTS.len());
    }

    #[test]
    fn placeholders_are_parsed() {
        let ep = lookup("ache_job_summary").unwrap();
        assert_eq!(ep.path_placeholders(), vec!["job_id"]);

        let ep = lookup("get_desktop_health").unwrap();
        assert!(ep.path_placeholders().is_empty());
    }

    #[test]
    fn placeholders_have_matching_required_params() {
        for ep in endpoints() {
            for placeholder in ep.path_placeholders() {
                let param = ep.params.iter().find(|p| p.name == placeholder);
                assert!(
                    param.is_some_and(|p| p.required),
                    "tool '{}' placeholder '{placeholder}' needs a required param",
                    ep.name
                );
            }
        }
    }

    #[test]
    fn schemas_are_well_formed() {
        for ep in endpoints() {
            let schema = ep.input_schema();
            assert_eq!(schema["type"], "object", "tool '{}'", ep.name);
            let properties = schema["properties"].as_object().unwrap();
            for required in schema["required"].as_array().unwrap() {
                assert!(
                    properties.contains_key(required.as_str().unwrap()),
                    "tool '{}' requires a property it does not declare",
                    ep.name
                );
            }
        }
    }

    #[test]
    fn get_endpoints_only_take_path_params() {
        for ep in endpoints() {
            if ep.method == HttpMethod::Get {
                let placeholders = ep.path_placeholders();
                for param in ep.params {
                    assert!(
                        placeholders.contains(&param.name),
                        "GET tool '{}' has non-path param '{}'",
                        ep.name,
                        param.name
                    );
                }
            }
        }
    }
}
