//! CV assembly. Turns an `EmployeeProfile` into a `DocumentTree`.
//!
//! Order: style → title → intro → professional experience → education.
//! Only the title block and the trainings table depend on the profile.

use std::path::PathBuf;

use tracing::debug;

use crate::cv::placeholders::*;
use crate::document::{
    Align, Cell, ColorDef, Column, DocumentTree, Geometry, LayoutSink, Node, Row, StyleSheet,
    StyledText, Table, TableWidth, TextBlock, TitleBlock,
};
use crate::models::{EmployeeProfile, TrainingRecord};

/// Builds the Cegeka CV layout. Holds template options only, never profile data,
/// so one builder can be reused for any number of profiles.
#[derive(Debug, Clone, Default)]
pub struct CvBuilder {
    header_image: Option<PathBuf>,
}

impl CvBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_header_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.header_image = Some(path.into());
        self
    }

    pub fn build(&self, profile: &EmployeeProfile) -> DocumentTree {
        let mut tree = DocumentTree::new();
        self.build_into(profile, &mut tree);
        tree
    }

    pub fn build_into<S: LayoutSink>(&self, profile: &EmployeeProfile, sink: &mut S) {
        sink.set_style(self.style());
        sink.set_title(TitleBlock {
            kicker: Some(TITLE_KICKER.to_string()),
            title: profile.full_name.clone(),
            subtitle: profile.job_title.clone(),
        });
        add_intro(sink);
        add_professional_experience(sink);
        add_education(sink, &profile.trainings);

        debug!(
            "Built CV for '{}' with {} trainings",
            profile.full_name,
            profile.trainings.len()
        );
    }

    fn style(&self) -> StyleSheet {
        StyleSheet {
            palette: PALETTE
                .iter()
                .map(|&(name, r, g, b)| ColorDef::rgb(name, r, g, b))
                .collect(),
            main_font: Some(MAIN_FONT.to_string()),
            section_color: Some(SECTION_GRAY.to_string()),
            accent_color: Some(CEGEKA_BLUE.to_string()),
            table_rule_color: Some(DARK_GRAY.to_string()),
            label_column_color: Some(LIGHT_GRAY.to_string()),
            row_stretch: ROW_STRETCH,
            zero_parindent: true,
            geometry: Some(Geometry {
                top: "4cm".to_string(),
                bottom: "2.5cm".to_string(),
                left: "2.5cm".to_string(),
                right: "2.5cm".to_string(),
                headsep: "0cm".to_string(),
            }),
            header_image: self.header_image.clone(),
        }
    }
}

fn label(text: &str) -> StyledText {
    StyledText::bold(text).colored(CEGEKA_BLUE)
}

fn header_label(text: &str) -> StyledText {
    StyledText::bold(text).colored(WHITE)
}

fn add_intro<S: LayoutSink>(sink: &mut S) {
    let mut details = Table::new(TableWidth::Natural, vec![Column::Left, Column::Left]);
    for (name, value) in PERSONAL_DETAILS {
        details.push_row(Row::new([Cell::Text(label(name)), Cell::from(*value)]));
    }

    let description = TextBlock::aligned(Align::Right, StyledText::plain(PROFILE_DESCRIPTION));

    sink.add_columns(vec![
        vec![Node::Table(details)],
        vec![Node::Text(description)],
    ]);
}

fn add_professional_experience<S: LayoutSink>(sink: &mut S) {
    sink.add_section(EXPERIENCE_HEADING);

    let mut entry = Table::new(TableWidth::Full, vec![Column::Label, Column::Fill]).with_header(
        Row::new([Cell::Span {
            columns: 2,
            align: Align::Left,
            content: header_label(EXPERIENCE_EMPLOYER),
        }])
        .shaded(CEGEKA_GREEN),
    );

    for (name, value) in EXPERIENCE_FIELDS {
        entry.push_row(
            Row::new([Cell::Text(StyledText::bold(*name)), Cell::from(*value)]).ruled(),
        );
    }

    entry.push_row(
        Row::new([
            Cell::Text(StyledText::bold(RESPONSIBILITIES_LABEL)),
            Cell::Items(RESPONSIBILITIES.iter().map(|s| s.to_string()).collect()),
        ])
        .ruled(),
    );
    entry.push_row(
        Row::new([Cell::Text(StyledText::bold(ENVIRONMENT_LABEL)), Cell::from("")]).ruled(),
    );

    sink.add_table(entry);
}

fn add_education<S: LayoutSink>(sink: &mut S, trainings: &[TrainingRecord]) {
    sink.add_section(EDUCATION_HEADING);

    sink.add_table(education_table(
        DIPLOMA_HEADER,
        DIPLOMAS.iter().map(|row| row.map(str::to_string)),
    ));
    sink.add_spacing(EDUCATION_TABLE_SPACING);

    sink.add_table(education_table(
        CERTIFICATE_HEADER,
        CERTIFICATES.iter().map(|row| row.map(str::to_string)),
    ));
    sink.add_spacing(EDUCATION_TABLE_SPACING);

    sink.add_table(education_table(
        TRAINING_HEADER,
        trainings
            .iter()
            .map(|t| [t.title.clone(), t.organisation.clone(), t.year.clone()]),
    ));
}

/// `what | institution | year` table with a green header row.
fn education_table(first_header: &str, rows: impl Iterator<Item = [String; 3]>) -> Table {
    let header = Row::new([
        header_label(first_header),
        header_label(INSTITUTION_HEADER),
        header_label(YEAR_HEADER),
    ])
    .shaded(CEGEKA_GREEN);

    let mut table = Table::new(
        TableWidth::Full,
        vec![Column::Fill, Column::Left, Column::Center],
    )
    .with_column_rules()
    .with_header(header);

    for row in rows {
        table.push_row(Row::new(row).ruled());
    }
    table
}
