//! LaTeX emitter: serialises a `DocumentTree` into a standalone `article`.
//!
//! Pure string building, no I/O. Every piece of user text goes through
//! `escape_latex`; colour names and dimensions come from the stylesheet and are
//! emitted verbatim.

use std::fmt::Write;

use crate::document::{
    Align, Cell, Column, DocumentTree, Node, Row, StyleSheet, StyledText, Table, TableWidth,
    TextBlock, TitleBlock,
};

/// Emitter switches that depend on the engine, not the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatexOptions {
    /// `fontspec` only works on LuaLaTeX and XeLaTeX.
    pub unicode_fonts: bool,
}

impl Default for LatexOptions {
    fn default() -> Self {
        Self {
            unicode_fonts: true,
        }
    }
}

/// Escapes the ten LaTeX special characters.
pub fn escape_latex(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str(r"\textbackslash{}"),
            '&' => out.push_str(r"\&"),
            '%' => out.push_str(r"\%"),
            '$' => out.push_str(r"\$"),
            '#' => out.push_str(r"\#"),
            '_' => out.push_str(r"\_"),
            '{' => out.push_str(r"\{"),
            '}' => out.push_str(r"\}"),
            '~' => out.push_str(r"\textasciitilde{}"),
            '^' => out.push_str(r"\textasciicircum{}"),
            _ => out.push(c),
        }
    }
    out
}

pub fn to_latex(document: &DocumentTree, options: LatexOptions) -> String {
    let mut out = String::new();
    write_preamble(&mut out, &document.style, document.title.as_ref(), options);

    out.push_str("\\begin{document}\n");
    if document.title.is_some() {
        out.push_str("\\maketitle\n");
        if document.style.header_image.is_some() {
            // \maketitle forces the plain style on page one
            out.push_str("\\thispagestyle{header}\n");
        }
    }
    for node in &document.nodes {
        write_node(&mut out, node);
    }
    out.push_str("\\end{document}\n");
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Preamble
// ────────────────────────────────────────────────────────────────────────────

fn write_preamble(
    out: &mut String,
    style: &StyleSheet,
    title: Option<&TitleBlock>,
    options: LatexOptions,
) {
    out.push_str("\\documentclass{article}\n");

    if let Some(geometry) = &style.geometry {
        let _ = writeln!(
            out,
            "\\usepackage[top={},bottom={},left={},right={},headsep={}]{{geometry}}",
            geometry.top, geometry.bottom, geometry.left, geometry.right, geometry.headsep
        );
    }

    out.push_str("\\usepackage{xcolor}\n");
    out.push_str("\\usepackage{colortbl}\n");
    out.push_str("\\usepackage{tabularx}\n");
    out.push_str("\\usepackage{multicol}\n");
    out.push_str("\\usepackage{titling}\n");
    out.push_str("\\usepackage{titlesec}\n");

    for color in &style.palette {
        let (r, g, b) = color.rgb;
        let _ = writeln!(out, "\\definecolor{{{}}}{{RGB}}{{{r}, {g}, {b}}}", color.name);
    }

    if let Some(shade) = &style.label_column_color {
        let _ = writeln!(out, "\\newcolumntype{{g}}{{>{{\\columncolor{{{shade}}}}}l}}");
    }

    out.push_str("\\pretitle{\\begin{flushright}\\LARGE}\n");
    let accent = style
        .accent_color
        .as_ref()
        .map(|c| format!("\\color{{{c}}}"))
        .unwrap_or_default();
    let _ = writeln!(
        out,
        "\\newcommand{{\\subtitle}}[1]{{\\posttitle{{ \\par\\end{{flushright}} \
         \\begin{{flushright}}\\large{{\\bfseries{accent} #1 }}\\end{{flushright}} \
         \\vspace{{-5ex}}}}}}"
    );

    if options.unicode_fonts {
        if let Some(font) = &style.main_font {
            out.push_str("\\usepackage{fontspec}\n");
            let _ = writeln!(out, "\\setmainfont{{{font}}}");
        }
    }

    if let Some(color) = &style.section_color {
        let _ = writeln!(
            out,
            "\\titleformat{{\\section}}{{\\color{{{color}}}\\normalfont\\Large\\bfseries}}\
             {{\\color{{{color}}}\\thesection}}{{1em}}{{}}"
        );
    }

    if let Some(color) = &style.table_rule_color {
        let _ = writeln!(out, "\\arrayrulecolor{{{color}}}");
    }

    let _ = writeln!(out, "\\def\\arraystretch{{{}}}", style.row_stretch);

    if style.zero_parindent {
        out.push_str("\\setlength{\\parindent}{0pt}\n");
    }

    if let Some(image) = &style.header_image {
        write_header_style(out, &image.to_string_lossy());
    }

    if let Some(title) = title {
        let _ = writeln!(out, "\\title{{{}}}", escape_latex(&title.display_title()));
        let _ = writeln!(out, "\\subtitle{{{}}}", escape_latex(&title.subtitle));
        out.push_str("\\date{}\n");
    }
}

/// Page style `header`: the image stretched over the header area at half opacity.
fn write_header_style(out: &mut String, image_path: &str) {
    // Backslashes in Windows paths would be read as commands
    let image_path = image_path.replace('\\', "/");

    out.push_str("\\usepackage{fancyhdr}\n");
    out.push_str("\\usepackage{tikzpagenodes}\n");
    out.push_str("\\usetikzlibrary{calc}\n");
    out.push_str("\\fancypagestyle{header}{%\n");
    out.push_str("\\renewcommand{\\headrulewidth}{0pt}%\n");
    out.push_str("\\renewcommand{\\footrulewidth}{0pt}%\n");
    out.push_str("\\fancyhf{}%\n");
    out.push_str("\\fancyhead[L]{%\n");
    out.push_str("\\begin{tikzpicture}[remember picture,overlay]%\n");
    out.push_str(
        "\\draw let \\p1=($(current page.north)-(current page header area.south)$), \
         \\n1={veclen(\\x1,\\y1)} in \
         node [opacity=0.5,inner sep=0,outer sep=0,below right] \
         at (current page.north west)",
    );
    let _ = writeln!(
        out,
        "{{\\includegraphics[width=\\paperwidth,height=\\n1]{{{image_path}}}}};%"
    );
    out.push_str("\\end{tikzpicture}}%\n");
    out.push_str("}\n");
    out.push_str("\\pagestyle{header}\n");
}

// ────────────────────────────────────────────────────────────────────────────
// Body
// ────────────────────────────────────────────────────────────────────────────

fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Section(heading) => {
            let _ = writeln!(out, "\\section*{{{}}}", escape_latex(heading));
        }
        Node::Table(table) => write_table(out, table),
        Node::Text(block) => write_text_block(out, block),
        Node::Columns(columns) => {
            let _ = writeln!(out, "\\begin{{multicols}}{{{}}}", columns.len().max(1));
            for (i, column) in columns.iter().enumerate() {
                if i > 0 {
                    out.push_str("\\columnbreak\n");
                }
                for inner in column {
                    write_node(out, inner);
                }
            }
            out.push_str("\\end{multicols}\n");
        }
        Node::VerticalSpace(amount) => {
            let _ = writeln!(out, "\n\\vspace{{{amount}}}\n");
        }
    }
}

fn write_text_block(out: &mut String, block: &TextBlock) {
    let text: String = block.content.iter().map(styled).collect();
    match block.align {
        Align::Left => {
            let _ = writeln!(out, "{text}\n");
        }
        Align::Center => {
            let _ = writeln!(out, "\\begin{{center}}\n{text}\n\\end{{center}}");
        }
        Align::Right => {
            let _ = writeln!(out, "\\begin{{flushright}}\n{text}\n\\end{{flushright}}");
        }
    }
}

fn styled(text: &StyledText) -> String {
    let mut body = escape_latex(&text.text);
    if text.bold {
        body = format!("\\textbf{{{body}}}");
    }
    if let Some(color) = &text.color {
        body = format!("\\textcolor{{{color}}}{{{body}}}");
    }
    body
}

fn column_spec(table: &Table) -> String {
    let separator = if table.column_rules { " | " } else { " " };
    table
        .columns
        .iter()
        .map(|column| match column {
            Column::Left => "l",
            Column::Center => "c",
            Column::Right => "r",
            // Only tabularx knows X; a natural-width table falls back to l
            Column::Fill if table.width == TableWidth::Full => "X",
            Column::Fill => "l",
            Column::Label => "g",
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn write_table(out: &mut String, table: &Table) {
    let spec = column_spec(table);
    let environment = match table.width {
        TableWidth::Natural => {
            let _ = writeln!(out, "\\begin{{tabular}}{{{spec}}}");
            "tabular"
        }
        TableWidth::Full => {
            let _ = writeln!(out, "\\begin{{tabularx}}{{\\textwidth}}{{{spec}}}");
            "tabularx"
        }
    };

    if let Some(header) = &table.header {
        write_row(out, header);
    }
    for row in &table.rows {
        write_row(out, row);
    }

    let _ = writeln!(out, "\\end{{{environment}}}");
}

fn write_row(out: &mut String, row: &Row) {
    if let Some(color) = &row.background {
        let _ = writeln!(out, "\\rowcolor{{{color}}}");
    }

    let cells: Vec<String> = row.cells.iter().map(cell).collect();
    let _ = writeln!(out, "{}\\\\", cells.join("&"));

    if row.rule_below {
        out.push_str("\\hline\n");
    }
}

fn cell(cell: &Cell) -> String {
    match cell {
        Cell::Text(text) => styled(text),
        Cell::Span {
            columns,
            align,
            content,
        } => {
            let align = match align {
                Align::Left => 'l',
                Align::Center => 'c',
                Align::Right => 'r',
            };
            format!("\\multicolumn{{{columns}}}{{{align}}}{{{}}}", styled(content))
        }
        Cell::Items(items) => {
            let mut list = String::from("\\begin{itemize}");
            for item in items {
                let _ = write!(list, "\\item {}", escape_latex(item));
                list.push(' ');
            }
            list.push_str("\\end{itemize}");
            list
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cv::CvBuilder;
    use crate::document::{LayoutSink, StyledText};
    use crate::models::{EmployeeProfile, TrainingRecord};

    fn jane() -> EmployeeProfile {
        EmployeeProfile {
            full_name: "Jane Doe".to_string(),
            job_title: "Engineer".to_string(),
            trainings: vec![TrainingRecord::new("Certified X", "Acme", "2020")],
        }
    }

    #[test]
    fn test_escape_latex_special_characters() {
        assert_eq!(escape_latex("R&D 100% $5 #1 a_b"), r"R\&D 100\% \$5 \#1 a\_b");
        assert_eq!(escape_latex("{x}"), r"\{x\}");
        assert_eq!(escape_latex(r"a\b"), r"a\textbackslash{}b");
        assert_eq!(escape_latex("~^"), r"\textasciitilde{}\textasciicircum{}");
        assert_eq!(escape_latex("Jörg Müller"), "Jörg Müller");
    }

    #[test]
    fn test_document_title_and_subtitle() {
        let tree = CvBuilder::new().build(&jane());
        let latex = to_latex(&tree, LatexOptions::default());

        assert!(latex.contains("\\title{CV Jane Doe}\n"));
        assert!(latex.contains("\\subtitle{Engineer}\n"));
        assert!(latex.contains("\\begin{document}\n\\maketitle\n"));
        assert!(latex.trim_end().ends_with("\\end{document}"));
    }

    #[test]
    fn test_preamble_style_directives() {
        let tree = CvBuilder::new().build(&jane());
        let latex = to_latex(&tree, LatexOptions::default());

        assert!(latex.contains(
            "\\usepackage[top=4cm,bottom=2.5cm,left=2.5cm,right=2.5cm,headsep=0cm]{geometry}"
        ));
        assert!(latex.contains("\\definecolor{cegekagreen}{RGB}{122, 178, 40}"));
        assert!(latex.contains("\\newcolumntype{g}{>{\\columncolor{lightgray}}l}"));
        assert!(latex.contains("\\setmainfont{Calibri}"));
        assert!(latex.contains("\\arrayrulecolor{darkgray}"));
        assert!(latex.contains("\\def\\arraystretch{1.5}"));
        assert!(latex.contains("\\titleformat{\\section}{\\color{sectiongray}"));
        assert!(latex.contains("\\color{cegekablue} #1 }"));
        assert!(!latex.contains("fancyhdr"));
    }

    #[test]
    fn test_pdflatex_omits_fontspec() {
        let tree = CvBuilder::new().build(&jane());
        let latex = to_latex(
            &tree,
            LatexOptions {
                unicode_fonts: false,
            },
        );
        assert!(!latex.contains("fontspec"));
        assert!(!latex.contains("\\setmainfont"));
    }

    #[test]
    fn test_training_row_is_escaped() {
        let mut profile = jane();
        profile.trainings = vec![TrainingRecord::new("C# & .NET", "Acme_Corp", "2021")];

        let latex = to_latex(&CvBuilder::new().build(&profile), LatexOptions::default());
        assert!(latex.contains("C\\# \\& .NET&Acme\\_Corp&2021\\\\\n\\hline\n"));
    }

    #[test]
    fn test_education_tables_use_ruled_columns() {
        let latex = to_latex(&CvBuilder::new().build(&jane()), LatexOptions::default());

        assert_eq!(
            latex
                .matches("\\begin{tabularx}{\\textwidth}{X | l | c}")
                .count(),
            3
        );
        assert!(latex.contains("\\begin{tabularx}{\\textwidth}{g X}"));
        assert!(latex.contains(
            "\\rowcolor{cegekagreen}\n\\multicolumn{2}{l}{\\textcolor{white}{\\textbf{CEGEKA}}}\\\\\n"
        ));
        assert!(latex.contains("\\section*{OPLEIDING}"));
        assert_eq!(latex.matches("\\vspace{1.5cm}").count(), 2);
    }

    #[test]
    fn test_intro_columns() {
        let latex = to_latex(&CvBuilder::new().build(&jane()), LatexOptions::default());

        assert!(latex.contains("\\begin{multicols}{2}\n\\begin{tabular}{l l}\n"));
        assert!(latex.contains(
            "\\textcolor{cegekablue}{\\textbf{Geboortedatum:}}&01/01/1991\\\\\n"
        ));
        assert!(latex.contains(
            "\\columnbreak\n\\begin{flushright}\n\
             Profielbeschrijving - overzicht van vakkundigheid en ervaring\n\\end{flushright}\n\\end{multicols}"
        ));
    }

    #[test]
    fn test_responsibilities_render_as_itemize() {
        let latex = to_latex(&CvBuilder::new().build(&jane()), LatexOptions::default());
        assert!(latex.contains(
            "\\textbf{Verantwoordelijkheden}&\\begin{itemize}\\item verantwoordelijkheid 1 \
             \\item verantwoordelijkheid 2 \\end{itemize}\\\\"
        ));
    }

    #[test]
    fn test_header_image_page_style() {
        let tree = CvBuilder::new()
            .with_header_image("/tmp/assets/header.png")
            .build(&jane());
        let latex = to_latex(&tree, LatexOptions::default());

        assert!(latex.contains("\\usepackage{fancyhdr}"));
        assert!(latex.contains("\\includegraphics[width=\\paperwidth,height=\\n1]{/tmp/assets/header.png}"));
        assert!(latex.contains("\\pagestyle{header}"));
        assert!(latex.contains("\\maketitle\n\\thispagestyle{header}\n"));
    }

    #[test]
    fn test_untitled_document_skips_maketitle() {
        let mut tree = crate::document::DocumentTree::new();
        tree.add_styled_text(TextBlock::aligned(Align::Left, StyledText::plain("hello")));

        let latex = to_latex(&tree, LatexOptions::default());
        assert!(!latex.contains("\\maketitle"));
        assert!(!latex.contains("\\title{"));
        assert!(latex.contains("hello\n"));
    }
}
