//! Backend-neutral document tree.
//!
//! Builders append through `LayoutSink`; renderers read the finished
//! `DocumentTree`. Nothing in here knows about LaTeX.

pub mod node;
pub mod style;

pub use node::{
    Align, Cell, Column, Node, Row, StyledText, Table, TableWidth, TextBlock, TitleBlock,
};
pub use style::{ColorDef, Geometry, StyleSheet};

use serde::{Deserialize, Serialize};

/// The minimal set of operations a document builder needs.
pub trait LayoutSink {
    fn set_style(&mut self, style: StyleSheet);
    fn set_title(&mut self, title: TitleBlock);
    fn add_section(&mut self, heading: &str);
    fn add_table(&mut self, table: Table);
    fn add_styled_text(&mut self, block: TextBlock);
    fn add_columns(&mut self, columns: Vec<Vec<Node>>);
    fn add_spacing(&mut self, amount: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentTree {
    pub style: StyleSheet,
    pub title: Option<TitleBlock>,
    pub nodes: Vec<Node>,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tables in document order, including those nested in columns.
    pub fn tables(&self) -> Vec<&Table> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a Table>) {
            for node in nodes {
                match node {
                    Node::Table(table) => out.push(table),
                    Node::Columns(columns) => {
                        for column in columns {
                            collect(column, out);
                        }
                    }
                    _ => {}
                }
            }
        }

        let mut out = Vec::new();
        collect(&self.nodes, &mut out);
        out
    }

    /// The table whose header row starts with `first_header_cell`.
    #[allow(dead_code)]
    pub fn table_with_header(&self, first_header_cell: &str) -> Option<&Table> {
        self.tables().into_iter().find(|table| {
            table
                .header
                .as_ref()
                .and_then(|h| h.texts().into_iter().next())
                .is_some_and(|first| first == first_header_cell)
        })
    }

    #[allow(dead_code)]
    pub fn section_headings(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Section(heading) => Some(heading.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl LayoutSink for DocumentTree {
    fn set_style(&mut self, style: StyleSheet) {
        self.style = style;
    }

    fn set_title(&mut self, title: TitleBlock) {
        self.title = Some(title);
    }

    fn add_section(&mut self, heading: &str) {
        self.nodes.push(Node::Section(heading.to_string()));
    }

    fn add_table(&mut self, table: Table) {
        self.nodes.push(Node::Table(table));
    }

    fn add_styled_text(&mut self, block: TextBlock) {
        self.nodes.push(Node::Text(block));
    }

    fn add_columns(&mut self, columns: Vec<Vec<Node>>) {
        self.nodes.push(Node::Columns(columns));
    }

    fn add_spacing(&mut self, amount: &str) {
        self.nodes.push(Node::VerticalSpace(amount.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_appends_in_order() {
        let mut tree = DocumentTree::new();
        tree.add_section("ONE");
        tree.add_spacing("1cm");
        tree.add_section("TWO");

        assert_eq!(tree.section_headings(), vec!["ONE", "TWO"]);
        assert_eq!(tree.nodes[1], Node::VerticalSpace("1cm".to_string()));
    }

    #[test]
    fn test_tables_include_nested_columns() {
        let mut tree = DocumentTree::new();
        let inner = Table::new(TableWidth::Natural, vec![Column::Left, Column::Left]);
        let outer = Table::new(TableWidth::Full, vec![Column::Fill])
            .with_header(Row::new([StyledText::bold("HEAD")]));

        tree.add_columns(vec![vec![Node::Table(inner)], vec![]]);
        tree.add_table(outer);

        assert_eq!(tree.tables().len(), 2);
        assert!(tree.table_with_header("HEAD").is_some());
        assert!(tree.table_with_header("MISSING").is_none());
    }

    #[test]
    fn test_display_title_prefixes_kicker() {
        let title = TitleBlock {
            kicker: Some("CV".to_string()),
            title: "Jane Doe".to_string(),
            subtitle: "Engineer".to_string(),
        };
        assert_eq!(title.display_title(), "CV Jane Doe");
    }
}
