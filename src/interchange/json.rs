//! JSON output.

use super::{InterchangeError, TableFormat};
use crate::semantic::SymbolTable;

/// Pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct Json;

impl TableFormat for Json {
    fn name(&self) -> &'static str {
        "json"
    }

    fn write(&self, table: &SymbolTable) -> Result<Vec<u8>, InterchangeError> {
        serde_json::to_vec_pretty(table).map_err(|e| InterchangeError::json(e.to_string()))
    }
}

/// Render a table as a pretty JSON string
pub fn to_json(table: &SymbolTable) -> Result<String, InterchangeError> {
    serde_json::to_string_pretty(table).map_err(|e| InterchangeError::json(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "
        #include <stdio.h>
        typedef struct { int x; int y; } Point;
        enum Direction { NORTH, SOUTH };
        int add(int a, int b) { return a + b; }
    ";

    #[test]
    fn test_json_is_deterministic() {
        let first = to_json(&crate::extract(SOURCE).unwrap()).unwrap();
        let second = to_json(&crate::extract(SOURCE).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_json_shape() {
        let table = crate::extract(SOURCE).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&Json.write(&table).unwrap()).unwrap();

        assert!(value["typedefs"]["Point"]["anonymous_struct"].is_object());
        assert_eq!(value["enums"]["Direction"]["enumerators"][1]["value"], 1);
        assert_eq!(value["functions"]["add"][0]["has_body"], true);
        assert_eq!(value["includes"][0]["path"], "stdio.h");
        assert!(value.get("by_name").is_none());
    }
}
