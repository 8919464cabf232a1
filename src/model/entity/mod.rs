mod user;
pub use user::{UserEntity, UserEntityCreate};

mod lesson;
pub use lesson::{Lesson, LessonCreate};

mod module;
pub use module::{Module, ModuleCreate, PLACEHOLDER_CONTENT, TITLE_MAX_LEN};

mod user_lesson;
pub use user_lesson::{Subscription, UserLesson, UserLessonCreate};

mod user_module;
pub use user_module::{UserModule, UserModuleCreate};

mod activity_log;
pub use activity_log::{ActivityLog, ActivityLogCreate};
