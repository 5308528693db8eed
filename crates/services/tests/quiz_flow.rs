use std::sync::Arc;

use quiz_core::catalog::{self, fixture_quiz};
use quiz_core::{RankTable, RankTier};
use services::{
    OptionState, QuizSession, ReselectPolicy, Session, SessionConfig, SessionError, Stage,
};

fn play(session: &mut QuizSession, answers: &[usize]) {
    session.start();
    for &answer in answers {
        session.select_option(answer).unwrap();
        session.advance().unwrap();
    }
}

#[test]
fn newsletter_week_scores_four_of_five() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[1, 2, 2, 1, 3])));
    play(&mut session, &[1, 0, 2, 1, 3]);

    assert_eq!(session.stage(), Stage::Finished);
    let result = session.result().unwrap();
    assert_eq!(result.score, 4);
    assert_eq!(result.total, 5);
    assert_eq!(result.rank.tier, RankTier::OnChainObserver);
    assert_eq!(result.rank.label, "On-Chain Observer");
}

#[test]
fn final_score_counts_matching_answers() {
    let correct = [1, 2, 2, 1, 3];
    let answers = [1, 2, 0, 0, 3];
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&correct)));
    play(&mut session, &answers);

    let matching = session
        .selected_answers()
        .iter()
        .zip(correct)
        .filter(|(picked, right)| **picked == Some(*right))
        .count();
    assert_eq!(session.score(), matching);
    assert_eq!(session.score(), 3);
}

#[test]
fn reselecting_after_a_miss_does_not_score() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[1, 2, 2, 1, 3])));
    session.start();

    session.select_option(0).unwrap();
    let second = session.select_option(1).unwrap();

    assert!(second.rerecorded);
    assert!(!second.scored);
    assert_eq!(session.selected_answers()[0], Some(1));
    assert_eq!(session.score(), 0);

    session.advance().unwrap();
    assert_eq!(session.stage(), Stage::Answering(1));
}

#[test]
fn hammering_the_same_question_scores_at_most_once() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[2, 0])));
    session.start();
    for option in [2, 2, 0, 2, 3, 2] {
        session.select_option(option).unwrap();
    }
    assert_eq!(session.score(), 1);
}

#[test]
fn progress_fraction_tracks_position() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[0, 0, 0, 0, 0])));
    session.start();

    for i in 0..5 {
        let progress = session.progress().unwrap();
        assert_eq!(progress.position, i + 1);
        assert_eq!(progress.total, 5);
        assert!((progress.fraction() - (i + 1) as f64 / 5.0).abs() < f64::EPSILON);

        session.select_option(0).unwrap();
        assert_eq!(session.progress().unwrap().position, i + 1);
        session.advance().unwrap();
    }
    assert!(session.progress().is_none());
}

#[test]
fn restart_matches_a_fresh_session() {
    let quiz = Arc::new(fixture_quiz(&[1, 2, 2, 1, 3]));
    let mut session = QuizSession::new(Arc::clone(&quiz));
    play(&mut session, &[1, 2, 2, 1, 3]);
    assert_eq!(session.score(), 5);

    session.restart();
    let fresh = QuizSession::new(quiz);
    assert_eq!(session.session(), fresh.session());
    assert_eq!(session.session(), &Session::fresh(5));
    assert_eq!(session.stage(), Stage::Welcome);
    assert_eq!(session.score(), 0);
    assert!(session.selected_answers().iter().all(Option::is_none));
}

#[test]
fn advance_on_welcome_is_invalid_and_changes_nothing() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[1, 2, 2, 1, 3])));
    let before = session.session().clone();

    let err = session.advance().unwrap_err();
    assert!(matches!(err, SessionError::InvalidState { stage: Stage::Welcome, .. }));
    assert_eq!(session.session(), &before);
    assert_eq!(session.stage(), Stage::Welcome);
}

#[test]
fn option_four_is_invalid_and_changes_nothing() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[1, 2, 2, 1, 3])));
    session.start();
    let before = session.session().clone();

    let err = session.select_option(4).unwrap_err();
    assert_eq!(err, SessionError::InvalidArgument { option: 4, options: 4 });
    assert_eq!(session.session(), &before);
}

#[test]
fn rank_bands_for_five_questions() {
    let cases = [
        (0, "Skimmer"),
        (2, "Nutshell Regular"),
        (4, "On-Chain Observer"),
        (5, "Nutshell Diehard"),
    ];
    let correct = [0, 0, 0, 0, 0];

    for ranks in [RankTable::newsletter(), RankTable::proportional()] {
        for (score, label) in cases {
            let answers: Vec<usize> = (0..5).map(|i| if i < score { 0 } else { 1 }).collect();
            let config = SessionConfig::default().with_ranks(ranks);
            let mut session = QuizSession::with_config(Arc::new(fixture_quiz(&correct)), config);
            play(&mut session, &answers);

            let result = session.result().unwrap();
            assert_eq!(result.score, score);
            assert_eq!(result.rank.label, label);
        }
    }
}

#[test]
fn strict_policy_keeps_first_answer() {
    let config = SessionConfig::default().with_reselect(ReselectPolicy::Reject);
    let mut session = QuizSession::with_config(Arc::new(fixture_quiz(&[1, 2])), config);
    session.start();

    session.select_option(1).unwrap();
    assert!(session.select_option(0).is_err());
    assert_eq!(session.selected_answers()[0], Some(1));
    assert_eq!(session.score(), 1);
}

#[test]
fn question_view_follows_the_stage() {
    let mut session = QuizSession::new(Arc::new(catalog::current().unwrap()));
    assert!(session.question_view(None).is_none());

    session.start();
    let view = session.question_view(Some(0)).unwrap();
    assert_eq!(view.number, 1);
    assert_eq!(view.options[0].state, OptionState::SelectedPending);
    assert_eq!(view.explanation, None);

    session.select_option(0).unwrap();
    let view = session.question_view(Some(0)).unwrap();
    assert_eq!(view.options[0].state, OptionState::RevealedIncorrect);
    assert_eq!(view.options[1].state, OptionState::RevealedCorrect);
    assert_eq!(view.source_label, Some("#753 – Is it over?"));
}

#[test]
fn result_serializes_for_front_ends() {
    let mut session = QuizSession::new(Arc::new(fixture_quiz(&[3])));
    play(&mut session, &[3]);

    let json = serde_json::to_value(session.result().unwrap()).unwrap();
    assert_eq!(json["score"], 1);
    assert_eq!(json["rank"]["tier"], "Skimmer");
}
