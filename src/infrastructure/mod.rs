pub mod moderation_api;
