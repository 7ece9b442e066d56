//! Typed extraction of one calendar table row.
//!
//! The upstream page is positional: nine-plus cells per data row, with the
//! score pair replaced by a score-entry form for matches not yet played.
//! `RawRow` captures the cells as data (text plus a widget discriminator) so
//! that everything past this module works on row shape, not on markup tags.

use crate::constants::calendar::{MIN_ROW_CELLS, cell};
use crate::error::AppError;
use scraper::{ElementRef, Node};

/// One cell of a calendar row: the inner text of its first child node, if
/// that child is a text node, and whether the cell holds a score-entry
/// widget instead of data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCell {
    pub text: Option<String>,
    pub has_input_widget: bool,
}

/// Ordered cells of one calendar table row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub cells: Vec<RawCell>,
}

impl RawRow {
    /// Captures a `<tr>` element into cell data.
    pub fn from_element(row: ElementRef<'_>) -> Self {
        let cells = row
            .children()
            .filter_map(ElementRef::wrap)
            .map(|cell| RawCell {
                text: first_child_text(cell),
                has_input_widget: contains_input_widget(cell),
            })
            .collect();
        RawRow { cells }
    }

    /// Inner text of the cell at `index`, or `None` when the cell or its
    /// leading text is absent. Absence is data, not an error.
    pub fn cell_text(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|c| c.text.as_deref())
    }
}

/// Text of the cell's first child node. Cells whose first child is an
/// element (links, forms) carry no directly usable text.
fn first_child_text(cell: ElementRef<'_>) -> Option<String> {
    let first = cell.children().next()?;
    match first.value() {
        Node::Text(text) => {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        _ => None,
    }
}

fn contains_input_widget(cell: ElementRef<'_>) -> bool {
    cell.descendants()
        .filter_map(ElementRef::wrap)
        .any(|el| matches!(el.value().name(), "form" | "input"))
}

/// Whether the row describes a played match or a scheduled one.
///
/// Exactly one of the two holds for a valid calendar row: either the score
/// pair is present, or the score position carries an entry widget and the
/// court may be listed instead.
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Played { score_home: i32, score_away: i32 },
    Scheduled { court: Option<String> },
}

/// Named fields of one validated calendar row.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRow {
    pub match_code: Option<String>,
    pub date_text: Option<String>,
    pub time_text: Option<String>,
    pub team_home: Option<String>,
    pub team_away: Option<String>,
    pub outcome: RowOutcome,
}

impl ParsedRow {
    /// Validates a raw row against the expected calendar shape and extracts
    /// its named fields.
    ///
    /// Missing texts within cells stay `None`; only structural mismatches
    /// (too few cells, a score position that is neither a score nor a
    /// widget) are errors.
    pub fn from_raw(raw: &RawRow) -> Result<Self, AppError> {
        let cells = raw.cells.len();
        if cells < MIN_ROW_CELLS {
            return Err(AppError::row_shape(
                cells,
                "fewer cells than a calendar row",
            ));
        }

        let outcome = if raw.cells[cell::SCORE_HOME].has_input_widget {
            RowOutcome::Scheduled {
                court: raw.cell_text(cell::COURT).map(str::to_string),
            }
        } else {
            let score_home = parse_score(raw.cell_text(cell::SCORE_HOME)).ok_or_else(|| {
                AppError::row_shape(cells, "home score cell is neither a score nor an entry widget")
            })?;
            let score_away = parse_score(raw.cell_text(cell::SCORE_AWAY))
                .ok_or_else(|| AppError::row_shape(cells, "away score cell is not a score"))?;
            RowOutcome::Played {
                score_home,
                score_away,
            }
        };

        Ok(ParsedRow {
            match_code: raw.cell_text(cell::MATCH_CODE).map(str::to_string),
            date_text: raw.cell_text(cell::DATE).map(str::to_string),
            time_text: raw.cell_text(cell::TIME).map(str::to_string),
            team_home: raw.cell_text(cell::TEAM_HOME).map(str::to_string),
            team_away: raw.cell_text(cell::TEAM_AWAY).map(str::to_string),
            outcome,
        })
    }
}

fn parse_score(text: Option<&str>) -> Option<i32> {
    text?.trim().parse().ok()
}
