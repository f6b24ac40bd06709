//! Input form state for the TUI.
//!
//! Kept free of terminal types so the editing rules can be unit tested. Every
//! change leaves `input` inside its accepted range: stepped and typed values
//! are clamped, and the returned status says when that happened.

use crate::domain::{EstimationInput, TAX_RATE_RANGE, YEAR_RANGE};
use crate::report::fmt_quantity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Year,
    Length,
    Width,
    Thickness,
    TaxRate,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Year,
        Field::Length,
        Field::Width,
        Field::Thickness,
        Field::TaxRate,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::Year => "Year",
            Field::Length => "Length (m)",
            Field::Width => "Width (m)",
            Field::Thickness => "Thickness (m)",
            Field::TaxRate => "Tax (%)",
        }
    }

    /// Increment used by ←/→.
    fn step(self) -> f64 {
        match self {
            Field::Year => 1.0,
            Field::Length => 10.0,
            Field::Width => 0.5,
            Field::Thickness => 0.01,
            Field::TaxRate => 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Form {
    pub input: EstimationInput,
    selected: usize,
    /// Text typed so far while editing the selected field.
    editing: Option<String>,
}

impl Form {
    pub fn new(input: EstimationInput) -> Self {
        Self {
            input: input.clamped(),
            selected: 0,
            editing: None,
        }
    }

    pub fn selected(&self) -> Field {
        Field::ALL[self.selected]
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < Field::ALL.len() {
            self.selected += 1;
        }
    }

    /// Current value of a field as shown in the form.
    pub fn value_text(&self, field: Field) -> String {
        match field {
            Field::Year => self.input.year.to_string(),
            Field::Length => fmt_quantity(self.input.length),
            Field::Width => fmt_quantity(self.input.width),
            Field::Thickness => fmt_quantity(self.input.thickness),
            Field::TaxRate => self.input.tax_rate_percent.to_string(),
        }
    }

    /// Step the selected field by `direction` (`-1` or `1`) steps.
    pub fn adjust(&mut self, direction: i32) -> String {
        let field = self.selected();
        let delta = field.step() * f64::from(direction.signum());
        match field {
            Field::Year => {
                self.input.year = (self.input.year + direction.signum())
                    .clamp(*YEAR_RANGE.start(), *YEAR_RANGE.end());
            }
            Field::Length => self.input.length = step_dimension(self.input.length, delta, field.step()),
            Field::Width => self.input.width = step_dimension(self.input.width, delta, field.step()),
            Field::Thickness => {
                self.input.thickness = step_dimension(self.input.thickness, delta, field.step())
            }
            Field::TaxRate => {
                let next = i32::from(self.input.tax_rate_percent) + direction.signum();
                self.input.tax_rate_percent = clamp_tax(i64::from(next));
            }
        }
        format!("{}: {}", field.label(), self.value_text(field))
    }

    /// Start typing a value for the selected field.
    pub fn begin_edit(&mut self) {
        self.editing = Some(String::new());
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = &mut self.editing {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                text.push(c);
            }
        }
    }

    pub fn backspace(&mut self) {
        if let Some(text) = &mut self.editing {
            text.pop();
        }
    }

    /// Apply the typed value.
    ///
    /// `Ok(status)` when the field changed (possibly clamped), `Err(status)` when
    /// the text was not a number; the field keeps its value in that case.
    pub fn commit_edit(&mut self) -> Result<String, String> {
        let Some(text) = self.editing.take() else {
            return Err("Not editing.".to_string());
        };
        let text = text.trim();
        let field = self.selected();
        if text.is_empty() {
            return Err(format!("{}: unchanged", field.label()));
        }

        let clamped = match field {
            Field::Year | Field::TaxRate => {
                let v: i64 = text
                    .parse()
                    .map_err(|_| format!("Invalid {} '{text}'", field.label()))?;
                if field == Field::Year {
                    let year = v.clamp(i64::from(*YEAR_RANGE.start()), i64::from(*YEAR_RANGE.end()));
                    self.input.year = year as i32;
                    year != v
                } else {
                    self.input.tax_rate_percent = clamp_tax(v);
                    i64::from(self.input.tax_rate_percent) != v
                }
            }
            Field::Length | Field::Width | Field::Thickness => {
                let v: f64 = text
                    .parse()
                    .map_err(|_| format!("Invalid {} '{text}'", field.label()))?;
                if !v.is_finite() {
                    return Err(format!("Invalid {} '{text}'", field.label()));
                }
                let slot = match field {
                    Field::Length => &mut self.input.length,
                    Field::Width => &mut self.input.width,
                    _ => &mut self.input.thickness,
                };
                *slot = v.max(0.0);
                v < 0.0
            }
        };

        let value = self.value_text(field);
        if clamped {
            Ok(format!("{} clamped to {value}", field.label()))
        } else {
            Ok(format!("{}: {value}", field.label()))
        }
    }
}

fn clamp_tax(v: i64) -> u8 {
    v.clamp(i64::from(*TAX_RATE_RANGE.start()), i64::from(*TAX_RATE_RANGE.end())) as u8
}

/// Step a dimension and snap it to the step grid so repeated presses do not
/// accumulate floating-point drift.
fn step_dimension(current: f64, delta: f64, step: f64) -> f64 {
    let next = ((current + delta) / step).round() * step;
    next.max(0.0)
}
