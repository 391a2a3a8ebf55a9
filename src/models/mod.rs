mod book;
mod buy_record;
mod feedback;
mod page;
mod reading;
mod user;

pub use book::{Book, BookComment, BookIndex, CommentView};
pub use buy_record::{BuyRecord, NewUserBuyRecord};
pub use feedback::{FeedbackView, NewUserFeedback, UserFeedback};
pub use page::{Page, PageRequest};
pub use reading::ReadingEntryView;
pub use user::{CallerIdentity, NewUser, ProfileUpdate, UpdateUser, User, UserProfile};

/// Timestamps are rendered the way the reader site displays them.
pub(crate) fn format_time(value: &jiff_diesel::DateTime) -> String {
    value.to_jiff().strftime("%Y-%m-%d %H:%M:%S").to_string()
}
