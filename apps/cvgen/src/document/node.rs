use serde::{Deserialize, Serialize};

/// A run of text with optional emphasis and colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledText {
    pub text: String,
    pub bold: bool,
    pub color: Option<String>,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            color: None,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            bold: true,
            ..Self::plain(text)
        }
    }

    pub fn colored(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A paragraph of styled runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextBlock {
    pub align: Align,
    pub content: Vec<StyledText>,
}

impl TextBlock {
    pub fn aligned(align: Align, text: StyledText) -> Self {
        Self {
            align,
            content: vec![text],
        }
    }
}

/// Title, subtitle and an optional word printed before the title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleBlock {
    pub kicker: Option<String>,
    pub title: String,
    pub subtitle: String,
}

impl TitleBlock {
    /// The title as it appears on the page, kicker included.
    pub fn display_title(&self) -> String {
        match &self.kicker {
            Some(kicker) => format!("{kicker} {}", self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Column {
    Left,
    Center,
    Right,
    /// Takes the remaining width of a full-width table.
    Fill,
    /// Left aligned on the stylesheet's label background.
    Label,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableWidth {
    Natural,
    Full,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Text(StyledText),
    Span {
        columns: usize,
        align: Align,
        content: StyledText,
    },
    Items(Vec<String>),
}

impl From<StyledText> for Cell {
    fn from(text: StyledText) -> Self {
        Cell::Text(text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::Text(StyledText::plain(text))
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::Text(StyledText::plain(text))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub background: Option<String>,
    pub rule_below: bool,
}

impl Row {
    pub fn new<I, C>(cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        Self {
            cells: cells.into_iter().map(Into::into).collect(),
            background: None,
            rule_below: false,
        }
    }

    pub fn shaded(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn ruled(mut self) -> Self {
        self.rule_below = true;
        self
    }

    /// Plain text of each cell; spans and lists are flattened.
    #[allow(dead_code)]
    pub fn texts(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|cell| match cell {
                Cell::Text(t) | Cell::Span { content: t, .. } => t.text.clone(),
                Cell::Items(items) => items.join(", "),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub width: TableWidth,
    pub columns: Vec<Column>,
    /// Draw vertical rules between columns.
    pub column_rules: bool,
    pub header: Option<Row>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(width: TableWidth, columns: Vec<Column>) -> Self {
        Self {
            width,
            columns,
            column_rules: false,
            header: None,
            rows: Vec::new(),
        }
    }

    pub fn with_column_rules(mut self) -> Self {
        self.column_rules = true;
        self
    }

    pub fn with_header(mut self, header: Row) -> Self {
        self.header = Some(header);
        self
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// One entry of the document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// Unnumbered section heading.
    Section(String),
    Table(Table),
    Text(TextBlock),
    /// Side-by-side columns; each inner list fills one column.
    Columns(Vec<Vec<Node>>),
    VerticalSpace(String),
}
