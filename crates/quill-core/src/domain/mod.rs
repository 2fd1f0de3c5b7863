//! Domain entities - the core business objects.

mod post;

pub use post::{
    CREATED_FORMAT, MAX_TEXT_LEN, MAX_TITLE_LEN, MIN_TITLE_LEN, NewPost, Post, PostChanges,
    PostDraft, created_now,
};
