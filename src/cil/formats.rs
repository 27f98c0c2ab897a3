//! Output formats for a built database
//!
//! Two renderings, both meant for inspection and test fixtures rather than
//! for machine consumption:
//!
//! - a tree dump, one line per AST node, nesting encoded as two spaces of
//!   indentation, each line `<keyword> <label>` with the label omitted for
//!   statements that have no primary name
//! - a JSON dump of the whole [`Db`] via serde
//!
//! Example tree dump:
//!
//! ```text
//! block sandbox
//!   type sandbox_t
//!   allow
//! booleanif
//!   true
//!     allow foo
//! ```

use crate::cil::ast::AstNode;
use crate::cil::db::Db;

fn render_node(node: &AstNode, depth: usize, out: &mut String) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.kind_name());
    if let Some(label) = node.data.display_label() {
        out.push(' ');
        out.push_str(label);
    }
    out.push('\n');
    for child in &node.children {
        render_node(child, depth + 1, out);
    }
}

/// One line per statement, children indented under their container. The
/// synthetic root is skipped.
pub fn to_tree_str(db: &Db) -> String {
    let mut out = String::new();
    for child in &db.root.children {
        render_node(child, 0, &mut out);
    }
    out
}

/// The whole database as pretty-printed JSON.
pub fn to_json_str(db: &Db) -> serde_json::Result<String> {
    serde_json::to_string_pretty(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cil::testing::build_source;

    #[test]
    fn test_tree_dump_indents_children() {
        let db = build_source("(block a (type log) (block b (type c)))").unwrap();
        assert_eq!(
            to_tree_str(&db),
            "block a\n  type log\n  block b\n    type c\n"
        );
    }

    #[test]
    fn test_tree_dump_names_rules_by_keyword() {
        let db = build_source("(booleanif foo (true (allow a b (c (read)))))").unwrap();
        assert_eq!(to_tree_str(&db), "booleanif\n  true\n    allow\n");
    }

    #[test]
    fn test_json_round_trips_through_serde() {
        let db = build_source("(type foo)").unwrap();
        let json = to_json_str(&db).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["mls"], serde_json::Value::Bool(false));
    }
}
