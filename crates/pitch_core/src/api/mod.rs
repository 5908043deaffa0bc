pub mod script_json;

pub use script_json::{
    event_schema_json, simulate_script, simulate_script_json, PlayerSpec, ScriptRequest,
    ScriptResponse, StepSpec, TeamSpec,
};
