use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use drill_core::model::{Badge, Difficulty, FeedbackKind, Question, Topic};
use drill_core::time::fixed_clock;
use provider::{FetchError, QuestionSource, ScriptedQuestionSource};
use services::QuizController;

fn build_question(topic: Topic, answer: &str, points: i64) -> Question {
    Question::new(
        format!("{topic} prompt"),
        Some(answer.to_owned()),
        topic,
        Difficulty::Medium,
        points,
    )
    .unwrap()
}

fn controller_over(outcomes: Vec<Result<Question, FetchError>>) -> QuizController {
    QuizController::new(Arc::new(ScriptedQuestionSource::new(outcomes)))
        .with_clock(fixed_clock())
        .with_advance_delay(Duration::from_millis(5))
}

#[tokio::test]
async fn answer_grade_advance_loop_smoke() {
    let mut controller = controller_over(vec![
        Ok(build_question(Topic::Arithmetic, "4", 1)),
        Ok(build_question(Topic::Algebra, "x = 2", 2)),
    ]);

    let first = controller.load_next_question().await.unwrap().unwrap();
    assert_eq!(first.topic(), Topic::Arithmetic);

    let submission = controller.submit_answer("4").unwrap();
    assert_eq!(submission.feedback.kind, FeedbackKind::Correct);
    assert_eq!(submission.feedback.text, "Correct! You earned 1 points.");
    assert!(controller.advance_armed());

    let second = controller.auto_advance().await.unwrap().unwrap();
    assert_eq!(second.topic(), Topic::Algebra);

    let session = controller.session();
    assert!(session.feedback().is_none());
    assert_eq!(session.progress().question_count(), 2);
    assert_eq!(session.progress().total_score(), 1);
}

#[tokio::test]
async fn crossing_one_hundred_awards_century_in_feedback() {
    let mut outcomes: Vec<_> =
        std::iter::repeat_with(|| Ok(build_question(Topic::Arithmetic, "4", 5)))
            .take(19)
            .collect();
    outcomes.push(Ok(build_question(Topic::Arithmetic, "4", 10)));
    let mut controller = controller_over(outcomes);

    controller.load_next_question().await.unwrap();
    for _ in 0..19 {
        controller.submit_answer("4").unwrap();
        controller.auto_advance().await.unwrap();
    }
    assert_eq!(controller.session().progress().total_score(), 95);

    let submission = controller.submit_answer("4").unwrap();
    assert_eq!(submission.newly_awarded, vec![Badge::Century]);
    assert_eq!(
        submission.feedback.text,
        "Correct! You earned 10 points. You earned new badge(s): Century!"
    );
    assert_eq!(controller.session().progress().total_score(), 105);
}

#[tokio::test]
async fn on_fire_awarded_once_and_streak_resets_on_miss() {
    let outcomes = (0..7)
        .map(|_| Ok(build_question(Topic::Arithmetic, "4", 1)))
        .collect();
    let mut controller = controller_over(outcomes);

    controller.load_next_question().await.unwrap();

    let mut all_awards = Vec::new();
    for _ in 0..5 {
        let submission = controller.submit_answer("4").unwrap();
        all_awards.extend(submission.newly_awarded.clone());
        controller.auto_advance().await.unwrap();
    }
    assert_eq!(all_awards, vec![Badge::OnFire]);
    assert_eq!(controller.session().progress().consecutive_correct(), 5);

    // a miss resets the streak; the badge stays
    let submission = controller.submit_answer("5").unwrap();
    assert_eq!(submission.feedback.kind, FeedbackKind::Incorrect);
    assert_eq!(controller.session().progress().consecutive_correct(), 0);
    assert!(
        controller
            .session()
            .progress()
            .badges()
            .contains(Badge::OnFire)
    );
    controller.auto_advance().await.unwrap();

    // the next correct answer restarts the streak at one
    let submission = controller.submit_answer("4").unwrap();
    assert!(submission.newly_awarded.is_empty());
    assert_eq!(controller.session().progress().consecutive_correct(), 1);
}

#[tokio::test]
async fn failed_fetch_strands_session_until_manual_retry() {
    let mut controller = controller_over(vec![
        Ok(build_question(Topic::Arithmetic, "4", 2)),
        Err(FetchError::NotFound),
        Ok(build_question(Topic::Arithmetic, "9", 1)),
    ]);

    controller.load_next_question().await.unwrap();
    controller.submit_answer("4").unwrap();

    let err = controller.auto_advance().await.unwrap_err();
    assert_eq!(err, FetchError::NotFound);
    assert!(controller.session().current_question().is_none());
    assert_eq!(controller.session().progress().total_score(), 2);

    // no retry is scheduled after a failed fetch
    assert!(!controller.advance_armed());
    assert!(controller.auto_advance().await.unwrap().is_none());

    // submitting while stranded fails without touching progress
    assert!(controller.submit_answer("9").is_err());
    assert_eq!(controller.session().progress().total_score(), 2);

    // an explicit reload recovers the session
    let question = controller.load_next_question().await.unwrap().unwrap();
    assert_eq!(question.answer(), Some("9"));
    controller.submit_answer("9").unwrap();
    assert_eq!(controller.session().progress().total_score(), 3);
}

#[tokio::test]
async fn topic_rules_apply_through_the_controller() {
    let mut controller = controller_over(vec![
        Ok(build_question(Topic::Calculus, "B", 3)),
        Ok(build_question(Topic::Geometry, "3.14", 2)),
    ]);

    controller.load_next_question().await.unwrap();
    let submission = controller.submit_answer("b").unwrap();
    assert!(submission.verdict.is_correct());
    controller.auto_advance().await.unwrap();

    let submission = controller.submit_answer("3.145").unwrap();
    assert!(submission.verdict.is_correct());
    assert_eq!(controller.session().progress().total_score(), 5);
}

#[tokio::test]
async fn numeric_garbage_leaves_question_answerable() {
    let mut controller =
        controller_over(vec![Ok(build_question(Topic::Trigonometry, "0.5", 2))]);
    controller.load_next_question().await.unwrap();

    assert!(controller.submit_answer("abc").is_err());
    assert!(!controller.advance_armed());
    assert!(controller.session().current_question().is_some());

    let submission = controller.submit_answer("0.5").unwrap();
    assert!(submission.verdict.is_correct());
}

struct CountingSource {
    inner: ScriptedQuestionSource,
    fetches: AtomicUsize,
}

#[async_trait]
impl QuestionSource for CountingSource {
    async fn next_question(&self) -> Result<Question, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.inner.next_question().await
    }
}

#[tokio::test]
async fn each_cycle_fetches_exactly_once() {
    let source = Arc::new(CountingSource {
        inner: ScriptedQuestionSource::with_questions(vec![
            build_question(Topic::Arithmetic, "4", 1),
            build_question(Topic::Arithmetic, "4", 1),
        ]),
        fetches: AtomicUsize::new(0),
    });
    let mut controller = QuizController::new(source.clone())
        .with_clock(fixed_clock())
        .with_advance_delay(Duration::from_millis(5));

    controller.load_next_question().await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    controller.submit_answer("4").unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

    controller.auto_advance().await.unwrap();
    assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
}
