//! HTML document printer
//!
//! Loads a template file once, splits it into marked sections, and fills
//! those sections with data from an [`Abrechnung`] on every compose call.
//!
//! The marker strings form a small wire format between the printer and its
//! template collaborator: a split marker between sections, one keyword
//! marker at the start of each fillable section, and a placeholder marker
//! inside fillable sections.

use std::fs;
use std::path::Path;

use crate::error::{AbrechnungError, AbrechnungResult};
use crate::models::{Abrechnung, POSITION_COUNT};
use crate::printer::markup::cell;

/// Separates the template into sections
pub const SPLIT_MARKER: &str = "<!--SPLIT-->\n";

/// Marks a substitution point inside a fillable section
pub const PLACEHOLDER: &str = "<!--PLACEHOLDER-->";

const TAB: &str = "\t";

/// The four recognized kinds of fillable template sections
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SectionKind {
    UserData,
    Positions,
    Total,
    Payment,
}

impl SectionKind {
    const ALL: [SectionKind; 4] = [
        SectionKind::UserData,
        SectionKind::Positions,
        SectionKind::Total,
        SectionKind::Payment,
    ];

    /// The keyword marker that opens a section of this kind
    fn marker(&self) -> &'static str {
        match self {
            SectionKind::UserData => "<!--USERDATA-->\n",
            SectionKind::Positions => "<!--POSITIONS-->\n",
            SectionKind::Total => "<!--TOTAL-->\n",
            SectionKind::Payment => "<!--PAYMENT-->\n",
        }
    }
}

/// One template section, classified at load time
#[derive(Debug, Clone)]
struct Section {
    kind: Option<SectionKind>,
    body: String,
}

impl Section {
    fn classify(text: &str) -> Self {
        for kind in SectionKind::ALL {
            if let Some(body) = text.strip_prefix(kind.marker()) {
                return Self {
                    kind: Some(kind),
                    body: body.to_string(),
                };
            }
        }
        Self {
            kind: None,
            body: text.to_string(),
        }
    }
}

/// Fills a fixed HTML document template with settlement data
///
/// The template is loaded and sectioned once at construction and stays
/// immutable afterward, so one printer can compose any number of documents
/// from different settlements.
#[derive(Debug, Clone)]
pub struct HtmlPrinter {
    sections: Vec<Section>,
}

impl HtmlPrinter {
    /// Load and section a template file
    pub fn from_file(path: impl AsRef<Path>) -> AbrechnungResult<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| {
            AbrechnungError::Template(format!(
                "failed to read template '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self::from_template(&text))
    }

    /// Section a template given as a string
    pub fn from_template(text: &str) -> Self {
        Self {
            sections: text.split(SPLIT_MARKER).map(Section::classify).collect(),
        }
    }

    /// Compose one HTML document
    ///
    /// Marked sections are filled from the settlement (or left structurally
    /// intact without one); unmarked sections pass through verbatim.
    pub fn compose(&self, input: Option<&Abrechnung>) -> String {
        let mut out = String::new();
        for section in &self.sections {
            match section.kind {
                Some(SectionKind::UserData) => out.push_str(&fill_user(&section.body, input)),
                Some(SectionKind::Positions) => out.push_str(&fill_positions(input)),
                Some(SectionKind::Total) => out.push_str(&fill_total(&section.body, input)),
                Some(SectionKind::Payment) => out.push_str(&fill_payment(&section.body, input)),
                None => out.push_str(&section.body),
            }
        }
        out
    }
}

/// Fill the user-data section
///
/// The section body is split on the placeholder marker; the first four gaps
/// receive the volunteer name, work area, project name, and project date
/// (ISO form, empty when unset). Placeholders vanish either way.
fn fill_user(text: &str, input: Option<&Abrechnung>) -> String {
    let mut out = String::new();
    for (index, segment) in text.split(PLACEHOLDER).enumerate() {
        out.push_str(segment);
        if let Some(abrechnung) = input {
            match index {
                0 => out.push_str(abrechnung.username()),
                1 => out.push_str(abrechnung.usergroup()),
                2 => out.push_str(abrechnung.projectname()),
                3 => {
                    if let Some(date) = abrechnung.projectdate() {
                        out.push_str(&date.to_string());
                    }
                }
                _ => {}
            }
        }
    }
    out
}

/// Emit the position table rows
///
/// The section body is ignored. Every row has 8 cells: a 1-based index cell,
/// the five position cells, and two trailing empty cells. Without a
/// settlement, the index cell is followed by seven empty cells instead.
fn fill_positions(input: Option<&Abrechnung>) -> String {
    let mut output = String::new();

    for index in 0..POSITION_COUNT {
        output.push_str(&TAB.repeat(4));
        output.push_str("<tr>\n");
        output.push_str(&TAB.repeat(5));
        output.push_str(&cell(&(index + 1).to_string()));
        output.push('\n');

        match input {
            Some(abrechnung) => {
                output.push_str(&abrechnung.positions()[index].htmlcells(5));
                output.push('\n');
                output.push_str(&TAB.repeat(5));
                output.push_str(&cell("").repeat(2));
                output.push('\n');
            }
            None => {
                output.push_str(&TAB.repeat(5));
                output.push_str(&cell("").repeat(7));
                output.push('\n');
            }
        }

        output.push_str(&TAB.repeat(4));
        output.push_str("</tr>\n");
    }

    output
}

// TODO: substitute income, cost and total into the total section once the
// production template grows placeholders for them
fn fill_total(text: &str, _input: Option<&Abrechnung>) -> String {
    text.replace(PLACEHOLDER, "")
}

// TODO: substitute account holder, spaced IBAN and the mode checkboxes into
// the payment section once the production template grows placeholders for them
fn fill_payment(text: &str, _input: Option<&Abrechnung>) -> String {
    text.replace(PLACEHOLDER, "")
}
