use crate::domain::types::{FetchResult, Inputs};

/// Which form field receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    Owner,
    Repo,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Owner => Field::Repo,
            Field::Repo => Field::Owner,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Owner => "owner?",
            Field::Repo => "repo?",
        }
    }
}

/// Form state: inputs, in-flight flag and the last completed fetch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub inputs: Inputs,
    pub fetching: bool,
    pub result: Option<FetchResult>,
}

/// The main application
#[derive(Debug, Default)]
pub struct App {
    /// Form state, only changed through the transitions below
    state: FormState,
    /// Focused input
    pub focus: Field,
    /// Scroll offset for the result view
    pub scroll_offset: u16,
    /// Should quit
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create app with both fields filled in
    pub fn with_inputs(inputs: Inputs) -> Self {
        let mut app = Self::new();
        app.set_inputs(inputs);
        app
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn set_inputs(&mut self, inputs: Inputs) {
        self.state.inputs = inputs;
    }

    pub fn set_fetching(&mut self, fetching: bool) {
        self.state.fetching = fetching;
    }

    pub fn set_result(&mut self, result: FetchResult) {
        self.state.result = Some(result);
        self.scroll_offset = 0;
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Owner => &self.state.inputs.owner,
            Field::Repo => &self.state.inputs.repo,
        }
    }

    /// Replace one field; the sibling keeps its current value
    pub fn set_field(&mut self, field: Field, value: String) {
        let current = &self.state.inputs;
        let inputs = match field {
            Field::Owner => Inputs {
                owner: value,
                repo: current.repo.clone(),
            },
            Field::Repo => Inputs {
                owner: current.owner.clone(),
                repo: value,
            },
        };
        self.set_inputs(inputs);
    }

    /// Append a character to the focused field
    pub fn insert_char(&mut self, c: char) {
        let mut value = self.field(self.focus).to_string();
        value.push(c);
        self.set_field(self.focus, value);
    }

    /// Delete the last character of the focused field
    pub fn delete_char(&mut self) {
        let mut value = self.field(self.focus).to_string();
        if value.pop().is_some() {
            self.set_field(self.focus, value);
        }
    }

    pub fn clear_field(&mut self) {
        self.set_field(self.focus, String::new());
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Submission is admitted only when idle and both fields are filled
    pub fn can_submit(&self) -> bool {
        !self.state.fetching && self.state.inputs.is_complete()
    }

    /// Enter the submitting state; returns the inputs to fetch, or `None`
    /// when submission is not admitted
    pub fn begin_submit(&mut self) -> Option<Inputs> {
        if !self.can_submit() {
            return None;
        }
        self.set_fetching(true);
        Some(self.state.inputs.clone())
    }

    /// Store the outcome and return to idle, whatever the outcome
    pub fn finish_submit(&mut self, result: FetchResult) {
        self.set_result(result);
        self.set_fetching(false);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_offset = self.scroll_offset.saturating_sub(lines);
    }
}
