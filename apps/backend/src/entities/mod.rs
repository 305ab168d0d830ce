pub mod calendar_events;
pub mod comment_attachments;
pub mod comments;
pub mod confirmation_tokens;
pub mod jwt_tokens;
pub mod users;

pub use calendar_events::Entity as CalendarEvents;
pub use calendar_events::Model as CalendarEvent;
pub use comment_attachments::Entity as CommentAttachments;
pub use comment_attachments::Model as CommentAttachment;
pub use comments::Entity as Comments;
pub use comments::Model as Comment;
pub use confirmation_tokens::Entity as ConfirmationTokens;
pub use confirmation_tokens::Model as ConfirmationToken;
pub use jwt_tokens::Entity as JwtTokens;
pub use jwt_tokens::Model as JwtToken;
pub use users::Entity as Users;
pub use users::Model as User;
