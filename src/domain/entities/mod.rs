pub mod alumni;
pub mod alumni_skill;
pub mod certificate;
pub mod change_log;
pub mod post;
pub mod study;
pub mod user;
pub mod work_experience;
