//! DTOs for comments_sea adapter.

/// DTO for creating a new comment.
#[derive(Debug, Clone)]
pub struct CommentCreate {
    pub post_id: i64,
    pub author_id: i64,
    pub body: String,
    pub attachment_file_ids: Vec<i64>,
}

impl CommentCreate {
    pub fn new(post_id: i64, author_id: i64, body: impl Into<String>) -> Self {
        Self {
            post_id,
            author_id,
            body: body.into(),
            attachment_file_ids: Vec::new(),
        }
    }

    pub fn with_attachments(mut self, file_ids: Vec<i64>) -> Self {
        self.attachment_file_ids = file_ids;
        self
    }
}

/// DTO for replacing a comment body.
#[derive(Debug, Clone)]
pub struct CommentUpdate {
    pub id: i64,
    pub body: String,
}

impl CommentUpdate {
    pub fn new(id: i64, body: impl Into<String>) -> Self {
        Self {
            id,
            body: body.into(),
        }
    }
}

/// Page window for post-scoped comment listings.
#[derive(Debug, Clone, Copy)]
pub struct CommentPage {
    pub offset: u64,
    pub limit: u64,
}

impl CommentPage {
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }
}
