pub mod user_setting_view_model;

pub use user_setting_view_model::{UserSettingState, UserSettingViewModel};
