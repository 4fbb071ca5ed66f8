mod auth;
pub use auth::{LoginData, LoginPayload};

mod course;
pub use course::{Course, CourseLanguage};

mod lesson;
pub use lesson::{Lesson, LessonCreatePayload, LessonUpdatePayload};

mod question;
pub use question::{Answer, AnswerPayload, Question, QuestionPayload, QuestionUpdatePayload};

mod category;
pub use category::{Category, CategoryPayload};

mod item;
pub use item::Item;

mod level_range;
pub use level_range::{LevelRange, LevelRangePayload};

mod order;
pub use order::{Order, PaymentStatus};

mod dashboard;
pub use dashboard::Revenue;
