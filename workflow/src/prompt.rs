use types::{MatchResult, TurnOrder};

/// Option value presented when the catalog has no decks. Selecting it
/// re-prompts the same step without advancing the session.
pub const NO_DECKS_VALUE: &str = "none";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Result,
    MyDeck,
    OpponentDeck,
    TurnOrder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PromptOption {
    pub value: String,
    pub label: String,
}

impl PromptOption {
    fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// One enumerated choice set for the initiator. Built from catalog state
/// at the moment the step is entered and never cached across steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Prompt {
    pub step: Step,
    pub heading: String,
    pub options: Vec<PromptOption>,
}

pub fn result_prompt() -> Prompt {
    Prompt {
        step: Step::Result,
        heading: "Select the match result".to_string(),
        options: vec![
            PromptOption::new(MatchResult::Win.as_str(), "Win"),
            PromptOption::new(MatchResult::Loss.as_str(), "Loss"),
        ],
    }
}

pub fn my_deck_prompt(deck_names: &[String]) -> Prompt {
    Prompt {
        step: Step::MyDeck,
        heading: "Select your deck".to_string(),
        options: deck_options(deck_names),
    }
}

pub fn opponent_deck_prompt(deck_names: &[String]) -> Prompt {
    Prompt {
        step: Step::OpponentDeck,
        heading: "Select the opponent's deck".to_string(),
        options: deck_options(deck_names),
    }
}

pub fn turn_order_prompt() -> Prompt {
    Prompt {
        step: Step::TurnOrder,
        heading: "Did you go first or second?".to_string(),
        options: vec![
            PromptOption::new(TurnOrder::First.as_str(), "First"),
            PromptOption::new(TurnOrder::Second.as_str(), "Second"),
        ],
    }
}

fn deck_options(deck_names: &[String]) -> Vec<PromptOption> {
    if deck_names.is_empty() {
        return vec![PromptOption::new(NO_DECKS_VALUE, "No decks found")];
    }
    deck_names
        .iter()
        .map(|name| PromptOption::new(name, name))
        .collect()
}
