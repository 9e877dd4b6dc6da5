use chrono::{
    TimeDelta,
    TimeZone,
    Utc,
};
use quran_vocab::{
    core::FixedClock,
    persistence::FileStore,
    Clock,
    DayBoundary,
    LearnerProfile,
    Settings,
    Vocabulary,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};

#[test]
fn learner_state_survives_restarts_across_days() {
    let dir = std::env::temp_dir().join(format!("quran-vocab-flow-{}", uuid::Uuid::new_v4()));
    let mut store = FileStore::new(&dir);
    let vocabulary = Vocabulary::builtin().unwrap();

    let settings = Settings { day_boundary: DayBoundary::Utc, ..Settings::default() };
    settings.save(&mut store).unwrap();
    let settings = Settings::load(&store);
    let policy = settings.policy();

    // Day 1: learn five words
    let day_one = FixedClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 18, 0, 0).unwrap());
    let mut profile = LearnerProfile::load(&store, &policy, day_one.now());
    for id in 1..=5 {
        assert!(profile.toggle_learned(&policy, id, day_one.now()));
    }
    profile.save(&mut store).unwrap();
    assert!(profile.due_words(&policy, &vocabulary, day_one.now()).is_empty());

    // Day 2, early morning: everything is due and the quiz is a review
    let day_two = FixedClock::new(day_one.now() + TimeDelta::hours(8));
    let mut profile = LearnerProfile::load(&store, &policy, day_two.now());
    assert_eq!(profile.due_words(&policy, &vocabulary, day_two.now()).len(), 5);

    let mut session =
        profile.start_quiz(&vocabulary, &settings, day_two.now(), &mut StdRng::seed_from_u64(5)).unwrap();
    assert!(session.is_review());
    while let Some(question) = session.current_question().cloned() {
        let answer = if question.word_id == 3 {
            question.options.iter().find(|o| **o != question.correct_answer).unwrap().clone()
        } else {
            question.correct_answer.clone()
        };
        session.answer(question.word_id, &answer).unwrap();
    }
    profile.complete_quiz(&policy, &session.results().unwrap(), day_two.now());
    profile.save(&mut store).unwrap();

    // Restart: word 3 was evicted, the rest wait three days
    let reloaded = LearnerProfile::load(&store, &policy, day_two.now());
    assert_eq!(reloaded.learned_words().into_iter().collect::<Vec<_>>(), vec![1, 2, 4, 5]);
    for id in [1, 2, 4, 5] {
        let record = reloaded.srs().get(id).unwrap();
        assert_eq!(record.srs_level, 1);
        assert_eq!(
            policy.day_boundary().day_of(record.next_review_date),
            chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
        );
    }
    assert!(reloaded.due_words(&policy, &vocabulary, day_two.now()).is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}
