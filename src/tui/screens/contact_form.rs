//! Contact form screen — input fields, inline errors and the submitted summary.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::model::{ContactForm, FormEvent, RuleSet};
use crate::tui::action::{Action, ScreenState};
use crate::tui::widgets::form::{Form, draw_form};

/// Width of the input column while the summary is shown beside it.
const FORM_WIDTH: u16 = 48;

/// State for the contact form screen.
#[derive(Debug, Clone)]
pub struct ContactFormState {
    controller: ContactForm,
    form: Form,
}

impl Default for ContactFormState {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl ContactFormState {
    /// Creates an empty contact form validated by `rules`.
    pub fn new(rules: RuleSet) -> Self {
        Self {
            controller: ContactForm::new(rules),
            form: Form::for_contact_form(),
        }
    }

    /// Returns the underlying controller.
    pub fn controller(&self) -> &ContactForm {
        &self.controller
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Feeds `event` to the controller and refreshes the form view.
    pub fn dispatch(&mut self, event: FormEvent) {
        match event {
            FormEvent::Submit => {
                if self.controller.on_submit() {
                    self.form.reset_focus();
                }
            }
            event => self.controller.apply(event),
        }
        self.form.sync(&self.controller);
    }

    fn edit_focused(&mut self, edit: impl FnOnce(&mut String) -> bool) {
        let Some(field) = self.form.focused_field() else {
            return;
        };
        let mut value = self.controller.values().get(field).to_string();
        if edit(&mut value) {
            self.dispatch(FormEvent::Changed(field, value));
        }
    }
}

impl ScreenState for ContactFormState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.form.focus_prev();
                Action::None
            }
            // AltGr arrives as CONTROL | ALT.
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.edit_focused(|value| {
                    value.push(ch);
                    true
                });
                Action::None
            }
            KeyCode::Backspace => {
                self.edit_focused(|value| value.pop().is_some());
                Action::None
            }
            KeyCode::Enter => {
                self.dispatch(FormEvent::Submit);
                Action::None
            }
            KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

fn summary_lines(controller: &ContactForm) -> Vec<Line<'_>> {
    let label_style = Style::default().fg(Color::Cyan);
    controller
        .summary()
        .into_iter()
        .map(|line| {
            Line::from(vec![
                Span::styled(format!("{}: ", line.label), label_style),
                Span::raw(line.value),
            ])
        })
        .collect()
}

/// Renders the contact form screen.
///
/// The submitted summary sits beside the inputs so the form keeps its full
/// height on a 24-row terminal.
#[mutants::skip]
pub fn draw_contact_form(state: &ContactFormState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Contact Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, body_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(state.form().height() + 1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "Contact Form",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, header_area);

    let summary = summary_lines(state.controller());
    let (input_area, summary_area) = if summary.is_empty() {
        (body_area, None)
    } else {
        let [left, right] =
            Layout::horizontal([Constraint::Length(FORM_WIDTH), Constraint::Min(0)])
                .areas(body_area);
        (left, Some(right))
    };

    let [form_area, submit_area] = Layout::vertical([
        Constraint::Length(state.form().height()),
        Constraint::Length(1),
    ])
    .areas(input_area);

    draw_form(state.form(), frame, form_area);

    let submit = Paragraph::new(Line::from(Span::styled(
        "[ Submit ]",
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )));
    frame.render_widget(submit, submit_area);

    if let Some(summary_area) = summary_area {
        let summary_block = Block::default()
            .title(" You Submitted: ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green));
        let paragraph = Paragraph::new(summary)
            .block(summary_block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, summary_area);
    }

    let footer = Paragraph::new(Line::from(
        "Tab/Shift+Tab: next/prev  Enter: submit  F1: help  Esc: quit",
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
