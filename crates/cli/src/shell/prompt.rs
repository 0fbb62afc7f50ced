use nu_ansi_term::Color;
use reedline::{Prompt, PromptEditMode, PromptHistorySearch};
use std::borrow::Cow;

pub struct DeclscopePrompt {
    file_name: String,
    selected: Option<String>,
}

impl DeclscopePrompt {
    pub fn new(file_name: impl Into<String>, selected: Option<String>) -> Self {
        Self {
            file_name: file_name.into(),
            selected,
        }
    }
}

impl Prompt for DeclscopePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        let prefix = Color::LightBlue.bold().paint("declscope");
        let file = Color::Yellow.paint(self.file_name.as_str());
        match &self.selected {
            Some(label) => Cow::Owned(format!(
                "{} {}#{} > ",
                prefix,
                file,
                Color::Cyan.paint(label.as_str())
            )),
            None => Cow::Owned(format!("{} {} > ", prefix, file)),
        }
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed(".. ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        _history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        Cow::Borrowed("(search) ")
    }
}
