use quiz_core::RankInfo;
use quiz_core::model::Question;
use serde::Serialize;

/// How a single option should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionState {
    /// Unanswered question, option can be picked.
    Selectable,
    /// Highlighted by the front end but not confirmed yet.
    SelectedPending,
    /// Answer revealed and this is the correct option.
    RevealedCorrect,
    /// Answer revealed and this is the wrong option that was picked.
    RevealedIncorrect,
    /// Answer revealed, option was neither picked nor correct.
    Locked,
}

/// One option paired with its display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OptionView<'a> {
    pub index: usize,
    pub text: &'a str,
    pub state: OptionState,
}

/// Presentation-agnostic snapshot of the question on screen.
///
/// Holds no pre-formatted strings; `number` is 1-based. `explanation` and
/// `source_label` are only filled in once the answer is revealed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView<'a> {
    pub number: usize,
    pub total: usize,
    pub prompt: &'a str,
    pub options: Vec<OptionView<'a>>,
    pub is_answered: bool,
    pub is_last: bool,
    pub explanation: Option<&'a str>,
    pub source_label: Option<&'a str>,
}

impl<'a> QuestionView<'a> {
    pub(crate) fn build(
        question: &'a Question,
        index: usize,
        total: usize,
        selected: Option<usize>,
        pending: Option<usize>,
    ) -> Self {
        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(i, text)| OptionView {
                index: i,
                text: text.as_str(),
                state: option_state(question, i, selected, pending),
            })
            .collect();

        let revealed = selected.is_some();
        Self {
            number: index + 1,
            total,
            prompt: question.prompt(),
            options,
            is_answered: revealed,
            is_last: index + 1 == total,
            explanation: revealed.then(|| question.explanation()),
            source_label: if revealed { question.source_label() } else { None },
        }
    }
}

fn option_state(
    question: &Question,
    option: usize,
    selected: Option<usize>,
    pending: Option<usize>,
) -> OptionState {
    match selected {
        Some(_) if question.is_correct(option) => OptionState::RevealedCorrect,
        Some(picked) if picked == option => OptionState::RevealedIncorrect,
        Some(_) => OptionState::Locked,
        None if pending == Some(option) => OptionState::SelectedPending,
        None => OptionState::Selectable,
    }
}

/// Final score with its rank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub rank: RankInfo,
}
