pub mod question;
pub mod selection;
pub mod session;

pub use question::{
    generate_questions,
    QuizQuestion,
};
pub use selection::{
    select_quiz_candidates,
    QuizRefusal,
    QuizSelection,
    SelectionLimits,
    SessionKind,
    MIN_QUIZ_WORDS,
    PRACTICE_SESSION_SIZE,
};
pub use session::{
    AnswerFeedback,
    Mistake,
    QuizError,
    QuizResults,
    QuizSession,
    QuizSummary,
    SessionState,
};
