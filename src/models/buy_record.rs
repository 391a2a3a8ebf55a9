use diesel::prelude::*;

/// A chapter purchase as requested by the reader, priced by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyRecord {
    pub book_id: i64,
    pub book_name: String,
    pub book_index_id: i64,
    pub book_index_name: String,
    /// Always the chapter's current `book_price`
    pub buy_amount: i32,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::user_buy_records)]
pub struct NewUserBuyRecord {
    pub user_id: i64,
    pub book_id: i64,
    pub book_name: String,
    pub book_index_id: i64,
    pub book_index_name: String,
    pub buy_amount: i32,
}

impl NewUserBuyRecord {
    pub fn for_user(user_id: i64, record: BuyRecord) -> Self {
        Self {
            user_id,
            book_id: record.book_id,
            book_name: record.book_name,
            book_index_id: record.book_index_id,
            book_index_name: record.book_index_name,
            buy_amount: record.buy_amount,
        }
    }
}
