pub mod quiz;

pub use quiz::{
    AnswerIndicator, QuizRequest, QuizResponse, RawQuestionRecord, ResolvedQuestion, Segment,
    ShuffledQuestion,
};
