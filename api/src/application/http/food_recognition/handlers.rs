pub mod analyze_image;
pub mod analyze_raw;
pub mod get_knowledge_base;
pub mod home;
