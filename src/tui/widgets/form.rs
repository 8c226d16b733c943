//! Reusable form widget for text input screens.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{ContactForm, Field};

/// Prefix drawn before every field error so error lines are distinguishable.
pub const ERROR_MARKER: &str = "✗ ";

/// Height of one field: a bordered input plus one line for its error.
const ROW_HEIGHT: u16 = 4;

/// A single field within a [`Form`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Display label shown in the input border.
    pub label: String,
    /// Current text value.
    pub value: String,
    /// Validation error message, if any.
    pub error: Option<String>,
}

impl FormField {
    /// Creates a new empty form field.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            error: None,
        }
    }
}

/// A multi-field text form with focus management.
///
/// Holds a view of a [`ContactForm`]: values and errors are copied in by
/// [`Form::sync`], the form itself only owns focus.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Default for Form {
    fn default() -> Self {
        Self::for_contact_form()
    }
}

impl Form {
    /// Creates a new form with the given fields. Focus starts on the first field.
    pub fn new(fields: Vec<FormField>) -> Self {
        Self { fields, focus: 0 }
    }

    /// One field per [`Field`], labelled and ordered for display.
    pub fn for_contact_form() -> Self {
        Self::new(
            Field::ALL
                .iter()
                .map(|f| FormField::new(f.label()))
                .collect(),
        )
    }

    /// Returns the index of the currently focused field.
    pub fn focus(&self) -> usize {
        self.focus
    }

    /// The focused contact form field, if the index maps to one.
    pub fn focused_field(&self) -> Option<Field> {
        Field::from_index(self.focus)
    }

    /// Moves focus to the next field, wrapping around.
    pub fn focus_next(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + 1) % self.fields.len();
    }

    /// Moves focus to the previous field, wrapping around.
    pub fn focus_prev(&mut self) {
        if self.fields.is_empty() {
            return;
        }
        self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
    }

    /// Moves focus back to the first field.
    pub fn reset_focus(&mut self) {
        self.focus = 0;
    }

    /// Copies current values and errors out of `form`.
    pub fn sync(&mut self, form: &ContactForm) {
        for field in Field::ALL {
            if let Some(view) = self.fields.get_mut(field.index()) {
                view.value = form.values().get(field).to_string();
                view.error = form.validation().error(field).map(ToString::to_string);
            }
        }
    }

    /// Returns the number of fields with an error set.
    pub fn error_count(&self) -> usize {
        self.fields.iter().filter(|f| f.error.is_some()).count()
    }

    /// Returns a reference to the fields.
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    /// Rows needed to draw every field.
    pub fn height(&self) -> u16 {
        ROW_HEIGHT * self.fields.len() as u16
    }
}

/// Renders a form within the given area.
#[cfg_attr(coverage_nightly, coverage(off))]
#[mutants::skip]
pub fn draw_form(form: &Form, frame: &mut Frame, area: Rect) {
    let constraints: Vec<Constraint> = form
        .fields()
        .iter()
        .map(|_| Constraint::Length(ROW_HEIGHT))
        .collect();

    let rows = Layout::vertical(constraints).split(area);

    for (i, field) in form.fields().iter().enumerate() {
        let is_focused = i == form.focus();

        let border_color = if field.error.is_some() {
            Color::Red
        } else if is_focused {
            Color::Yellow
        } else {
            Color::DarkGray
        };

        let [input_area, error_area] =
            Layout::vertical([Constraint::Length(3), Constraint::Length(1)]).areas(rows[i]);

        let block = Block::default()
            .title(field.label.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color));

        let mut spans = vec![Span::raw(field.value.as_str())];
        if is_focused {
            spans.push(Span::styled(
                "\u{2588}",
                Style::default().add_modifier(Modifier::SLOW_BLINK),
            ));
        }

        frame.render_widget(Paragraph::new(Line::from(spans)).block(block), input_area);

        if let Some(ref err) = field.error {
            let error_line = Paragraph::new(Line::from(vec![
                Span::styled(ERROR_MARKER, Style::default().fg(Color::Red)),
                Span::styled(err.as_str(), Style::default().fg(Color::Red)),
            ]));
            frame.render_widget(error_line, error_area);
        }
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    use super::*;
    use crate::model::FormEvent;

    fn render(form: &Form) -> String {
        let backend = TestBackend::new(60, form.height());
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| draw_form(form, frame, frame.area()))
            .unwrap();
        let buf = terminal.backend().buffer();
        let mut s = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
            }
            s.push('\n');
        }
        s
    }

    // --- Focus management ---

    #[test]
    fn focus_starts_at_zero() {
        let form = Form::for_contact_form();
        assert_eq!(form.focus(), 0);
        assert_eq!(form.focused_field(), Some(Field::FirstName));
    }

    #[test]
    fn focus_next_advances_and_wraps() {
        let mut form = Form::for_contact_form();
        form.focus_next();
        assert_eq!(form.focused_field(), Some(Field::LastName));
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focused_field(), Some(Field::Message));
        form.focus_next();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn focus_prev_wraps() {
        let mut form = Form::for_contact_form();
        form.focus_prev();
        assert_eq!(form.focused_field(), Some(Field::Message));
    }

    #[test]
    fn focus_on_empty_form_is_noop() {
        let mut form = Form::new(vec![]);
        form.focus_next();
        form.focus_prev();
        assert_eq!(form.focus(), 0);
    }

    #[test]
    fn reset_focus_returns_to_first() {
        let mut form = Form::for_contact_form();
        form.focus_next();
        form.reset_focus();
        assert_eq!(form.focus(), 0);
    }

    // --- Sync ---

    #[test]
    fn sync_copies_values_and_errors() {
        let controller = ContactForm::default()
            .reduce(FormEvent::Changed(Field::FirstName, "Bob".into()))
            .reduce(FormEvent::Changed(Field::Email, "bob@bob.com".into()));
        let mut form = Form::for_contact_form();
        form.sync(&controller);
        assert_eq!(form.fields()[0].value, "Bob");
        assert_eq!(form.fields()[2].value, "bob@bob.com");
        assert_eq!(form.error_count(), 1);
        assert_eq!(
            form.fields()[0].error.as_deref(),
            Some("firstName must have at least 5 characters")
        );
    }

    #[test]
    fn sync_clears_stale_errors() {
        let mut controller = ContactForm::default();
        controller.on_submit();
        let mut form = Form::for_contact_form();
        form.sync(&controller);
        assert_eq!(form.error_count(), 3);
        controller.on_field_change(Field::LastName, "Jenkins!");
        form.sync(&controller);
        assert_eq!(form.error_count(), 2);
    }

    #[test]
    fn fields_have_expected_labels() {
        let form = Form::for_contact_form();
        let labels: Vec<&str> = form.fields().iter().map(|f| f.label.as_str()).collect();
        assert_eq!(labels, vec!["First Name*", "Last Name*", "Email*", "Message"]);
    }

    // --- Rendering ---

    #[test]
    fn renders_labels() {
        let output = render(&Form::for_contact_form());
        for label in ["First Name*", "Last Name*", "Email*", "Message"] {
            assert!(output.contains(label), "missing {label}");
        }
    }

    #[test]
    fn renders_one_marker_per_error() {
        let mut controller = ContactForm::default();
        controller.on_field_change(Field::LastName, "Jenkins!");
        controller.on_submit();
        let mut form = Form::for_contact_form();
        form.sync(&controller);
        let output = render(&form);
        assert_eq!(output.matches('✗').count(), 2);
        assert!(output.contains("firstName must have at least 5 characters"));
        assert!(output.contains("email is a required field"));
        assert!(output.contains("Jenkins!"));
    }

    #[test]
    fn clean_form_has_no_markers() {
        let output = render(&Form::for_contact_form());
        assert_eq!(output.matches('✗').count(), 0);
    }
}
