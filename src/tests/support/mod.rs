pub mod app_state_builder;
pub mod auth_helper;
pub mod in_memory_blog_store;
pub mod in_memory_user_store;
pub mod stubs;

pub fn load_test_env() {
    dotenvy::from_filename(".env.test").ok();
}
