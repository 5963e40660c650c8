//! Dialoguer implementation of the Renderer trait.

use std::collections::BTreeMap;

use dialoguer::{Input, MultiSelect, Select, theme::ColorfulTheme};
use survey_flow::{
    AnswerValue, ChoiceQuestion, Interaction, MultiLikertQuestion, OpenTextQuestion, Page,
    QuestionKind, QuestionView, Renderer, Scale, ValidationError,
};
use thiserror::Error;

/// Label of the menu item that returns to the previous question.
pub const BACK_LABEL: &str = "« Back";

/// Label of the menu item that leaves an optional question unanswered.
pub const SKIP_LABEL: &str = "(skip)";

/// Typed into a text prompt to return to the previous question.
pub const BACK_INPUT: &str = "<";

/// Error type for the Dialoguer renderer.
#[derive(Debug, Error)]
pub enum DialoguerError {
    /// User cancelled the survey (e.g., pressed Ctrl+C or Escape).
    #[error("Survey cancelled by user")]
    Cancelled,

    /// An I/O error occurred during prompting.
    #[error("Dialoguer error: {0}")]
    Dialoguer(#[from] dialoguer::Error),
}

impl DialoguerError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Helper to check if a dialoguer error is a cancellation (Ctrl+C / Escape)
fn is_cancelled(err: &dialoguer::Error) -> bool {
    matches!(err, dialoguer::Error::IO(io_err) if io_err.kind() == std::io::ErrorKind::Interrupted)
}

fn prompt_error(err: dialoguer::Error) -> DialoguerError {
    if is_cancelled(&err) {
        DialoguerError::Cancelled
    } else {
        DialoguerError::Dialoguer(err)
    }
}

/// What picking a menu item means.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Pick {
    Value(String),
    Skip,
    Back,
}

/// Labels shown in a select prompt, with the meaning of each.
#[derive(Debug, Clone, Default)]
struct Menu {
    labels: Vec<String>,
    picks: Vec<Pick>,
}

impl Menu {
    fn choices(choice: &ChoiceQuestion) -> Self {
        let mut menu = Self::default();
        for (index, option) in choice.answers.iter().enumerate() {
            menu.push(option.text.clone(), Pick::Value(option.key(index)));
        }
        menu
    }

    fn scale(scale: &Scale) -> Self {
        let mut menu = Self::default();
        for value in scale.values() {
            let label = match (&scale.labels.min, &scale.labels.max) {
                (Some(label), _) if value == scale.min => format!("{value} ({label})"),
                (_, Some(label)) if value == scale.max => format!("{value} ({label})"),
                _ => value.to_string(),
            };
            menu.push(label, Pick::Value(value.to_string()));
        }
        menu
    }

    fn push(&mut self, label: impl Into<String>, pick: Pick) {
        self.labels.push(label.into());
        self.picks.push(pick);
    }

    fn with_extras(mut self, skip: bool, back: bool) -> Self {
        if skip {
            self.push(SKIP_LABEL, Pick::Skip);
        }
        if back {
            self.push(BACK_LABEL, Pick::Back);
        }
        self
    }

    /// Position of the previously picked value, or the first item.
    fn default_index(&self, prior: Option<&str>) -> usize {
        prior
            .and_then(|prior| {
                self.picks
                    .iter()
                    .position(|pick| matches!(pick, Pick::Value(v) if v == prior))
            })
            .unwrap_or(0)
    }

    fn pick(&self, index: usize) -> Pick {
        self.picks.get(index).cloned().unwrap_or(Pick::Skip)
    }
}

/// Turn typed text into an interaction, treating [`BACK_INPUT`] as "back" when allowed.
fn text_interaction(text: String, can_go_back: bool) -> Interaction {
    if can_go_back && text.trim() == BACK_INPUT {
        Interaction::Back
    } else {
        Interaction::Answer(AnswerValue::Text(text))
    }
}

/// Dialoguer renderer for interactive CLI prompts.
///
/// Choices, scales and aspects are select menus; open text is a line prompt.
/// Going back is a menu item, or `<` typed into a text prompt.
#[derive(Debug, Default, Clone)]
pub struct DialoguerRenderer {
    /// Use colorful theme for prompts.
    colorful: bool,
}

impl DialoguerRenderer {
    /// Create a new Dialoguer renderer with default (colorful) theme.
    pub fn new() -> Self {
        Self { colorful: true }
    }

    /// Create a renderer with plain (no color) theme.
    pub fn plain() -> Self {
        Self { colorful: false }
    }

    fn select(&self, prompt: &str, menu: &Menu, default: usize) -> Result<Pick, DialoguerError> {
        let mut builder: Select;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Select::with_theme(&_theme);
        } else {
            builder = Select::new();
        }

        builder = builder
            .with_prompt(prompt)
            .items(&menu.labels)
            .default(default);

        match builder.interact_opt() {
            Ok(Some(index)) => Ok(menu.pick(index)),
            Ok(None) => Err(DialoguerError::Cancelled),
            Err(e) => Err(prompt_error(e)),
        }
    }

    fn ask_choice(
        &self,
        view: &QuestionView<'_>,
        choice: &ChoiceQuestion,
    ) -> Result<Interaction, DialoguerError> {
        let menu = Menu::choices(choice)
            .with_extras(!view.question.is_required(), view.can_go_back);
        let prior = view.prior_answer.and_then(AnswerValue::as_text);

        Ok(
            match self.select(view.question.title(), &menu, menu.default_index(prior))? {
                Pick::Value(key) => Interaction::Answer(AnswerValue::Text(key)),
                Pick::Skip => Interaction::Answer(AnswerValue::None),
                Pick::Back => Interaction::Back,
            },
        )
    }

    fn ask_multiple(
        &self,
        view: &QuestionView<'_>,
        choice: &ChoiceQuestion,
    ) -> Result<Interaction, DialoguerError> {
        let menu = Menu::choices(choice).with_extras(false, view.can_go_back);
        let prior = view.prior_answer.and_then(AnswerValue::as_selection).unwrap_or(&[]);
        let defaults: Vec<bool> = menu
            .picks
            .iter()
            .map(|pick| matches!(pick, Pick::Value(key) if prior.contains(key)))
            .collect();

        let mut builder: MultiSelect;
        let _theme;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = MultiSelect::with_theme(&_theme);
        } else {
            builder = MultiSelect::new();
        }

        builder = builder
            .with_prompt(view.question.title())
            .items(&menu.labels)
            .defaults(&defaults);

        let indices = match builder.interact_opt() {
            Ok(Some(indices)) => indices,
            Ok(None) => return Err(DialoguerError::Cancelled),
            Err(e) => return Err(prompt_error(e)),
        };

        let mut picked = Vec::new();
        for index in indices {
            match menu.pick(index) {
                Pick::Back => return Ok(Interaction::Back),
                Pick::Value(key) => picked.push(key),
                Pick::Skip => {}
            }
        }
        Ok(Interaction::Answer(AnswerValue::Selection(picked)))
    }

    fn ask_scale(
        &self,
        view: &QuestionView<'_>,
        scale: &Scale,
    ) -> Result<Interaction, DialoguerError> {
        let menu = Menu::scale(scale).with_extras(!view.question.is_required(), view.can_go_back);
        let prior = view.prior_answer.and_then(AnswerValue::as_text);

        Ok(
            match self.select(view.question.title(), &menu, menu.default_index(prior))? {
                Pick::Value(value) => Interaction::Answer(AnswerValue::Text(value)),
                Pick::Skip => Interaction::Answer(AnswerValue::None),
                Pick::Back => Interaction::Back,
            },
        )
    }

    fn ask_aspects(
        &self,
        view: &QuestionView<'_>,
        multi: &MultiLikertQuestion,
    ) -> Result<Interaction, DialoguerError> {
        println!("{}", view.question.title());
        let prior = view.prior_answer.and_then(AnswerValue::as_aspects);
        let mut values = BTreeMap::new();

        for (position, aspect) in multi.aspects.iter().enumerate() {
            // Back is only offered on the first aspect.
            let menu = Menu::scale(&multi.scale)
                .with_extras(!view.question.is_required(), view.can_go_back && position == 0);
            let previous = prior.and_then(|p| p.get(&aspect.id)).map(String::as_str);
            let prompt = format!("  {}", aspect.name);

            match self.select(&prompt, &menu, menu.default_index(previous))? {
                Pick::Value(value) => {
                    values.insert(aspect.id.clone(), value);
                }
                Pick::Skip => {}
                Pick::Back => return Ok(Interaction::Back),
            }
        }
        Ok(Interaction::Answer(AnswerValue::Aspects(values)))
    }

    fn ask_text(
        &self,
        view: &QuestionView<'_>,
        text: &OpenTextQuestion,
    ) -> Result<Interaction, DialoguerError> {
        let mut prompt = view.question.title().to_string();
        if let Some(placeholder) = &text.placeholder {
            prompt.push_str(&format!(" ({placeholder})"));
        }
        if view.can_go_back {
            prompt.push_str(&format!(" [{BACK_INPUT} to go back]"));
        }

        let mut _theme;
        let mut builder: Input<String>;
        if self.colorful {
            _theme = ColorfulTheme::default();
            builder = Input::with_theme(&_theme);
        } else {
            builder = Input::new();
        }

        builder = builder.with_prompt(prompt).allow_empty(true);
        if let Some(prior) = view.prior_answer.and_then(AnswerValue::as_text) {
            builder = builder.with_initial_text(prior);
        }

        let value = builder.interact_text().map_err(prompt_error)?;
        Ok(text_interaction(value, view.can_go_back))
    }

    fn print_page(page: &Page) {
        println!();
        println!("{}", page.title);
        if let Some(description) = &page.description {
            println!("{description}");
        }
        if let Some(url) = &page.button_url {
            let text = page.button_text.as_deref().unwrap_or("Continue");
            println!("{text}: {url}");
        }
        println!();
    }
}

impl Renderer for DialoguerRenderer {
    type Error = DialoguerError;

    fn render(&mut self, view: &QuestionView<'_>) -> Result<Interaction, Self::Error> {
        if let Some(progress) = view.progress {
            println!("Question {} of {}", progress.current, progress.total);
        }
        if let Some(description) = view.question.description() {
            println!("{description}");
        }

        match view.question.kind() {
            QuestionKind::SingleChoice(choice) | QuestionKind::YesNo(choice) => {
                self.ask_choice(view, choice)
            }
            QuestionKind::MultipleChoice(choice) => self.ask_multiple(view, choice),
            QuestionKind::LikertScale(likert) => self.ask_scale(view, &likert.scale),
            QuestionKind::MultiLikert(multi) => self.ask_aspects(view, multi),
            QuestionKind::OpenText(text) => self.ask_text(view, text),
        }
    }

    fn show_cover(&mut self, page: &Page) -> Result<(), Self::Error> {
        Self::print_page(page);
        Ok(())
    }

    fn show_thank_you(&mut self, page: &Page) -> Result<(), Self::Error> {
        Self::print_page(page);
        Ok(())
    }

    fn show_validation_error(
        &mut self,
        _view: &QuestionView<'_>,
        error: &ValidationError,
    ) -> Result<(), Self::Error> {
        println!("Error: {error}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_flow::{AnswerOption, ChoiceQuestion};

    #[test]
    fn choice_menu_uses_option_keys() {
        let choice = ChoiceQuestion::new(vec![
            AnswerOption::new("social", "Social media"),
            AnswerOption::unnamed("Other"),
        ]);
        let menu = Menu::choices(&choice).with_extras(true, true);

        assert_eq!(menu.labels, ["Social media", "Other", SKIP_LABEL, BACK_LABEL]);
        assert_eq!(menu.pick(0), Pick::Value("social".into()));
        assert_eq!(menu.pick(1), Pick::Value("1".into()));
        assert_eq!(menu.pick(2), Pick::Skip);
        assert_eq!(menu.pick(3), Pick::Back);
    }

    #[test]
    fn scale_menu_labels_the_ends() {
        let scale = Scale::new(1, 3).with_labels("Bad", "Good");
        let menu = Menu::scale(&scale).with_extras(false, false);

        assert_eq!(menu.labels, ["1 (Bad)", "2", "3 (Good)"]);
        assert_eq!(menu.pick(2), Pick::Value("3".into()));
    }

    #[test]
    fn default_index_follows_prior_answer() {
        let menu = Menu::scale(&Scale::new(1, 5)).with_extras(false, true);

        assert_eq!(menu.default_index(Some("4")), 3);
        assert_eq!(menu.default_index(Some("nope")), 0);
        assert_eq!(menu.default_index(None), 0);
    }

    #[test]
    fn back_is_only_typed_when_allowed() {
        assert_eq!(text_interaction("<".into(), true), Interaction::Back);
        assert_eq!(
            text_interaction(" < ".into(), true),
            Interaction::Back
        );
        assert_eq!(
            text_interaction("<".into(), false),
            Interaction::Answer(AnswerValue::from("<"))
        );
        assert_eq!(
            text_interaction("fine".into(), true),
            Interaction::Answer(AnswerValue::from("fine"))
        );
    }
}
