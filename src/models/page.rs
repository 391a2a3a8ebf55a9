use serde::Serialize;

/// A normalized page request, `page` is 1-based and never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Rows to skip for this page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page - 1) * i64::from(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub page_num: u32,
    pub page_size: u32,
    pub total: i64,
    pub pages: i64,
    pub list: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(list: Vec<T>, request: PageRequest, total: i64) -> Self {
        let size = i64::from(request.page_size);
        Self {
            page_num: request.page,
            page_size: request.page_size,
            total,
            pages: (total.max(0) + size - 1) / size,
            list,
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page_num: self.page_num,
            page_size: self.page_size,
            total: self.total,
            pages: self.pages,
            list: self.list.into_iter().map(f).collect(),
        }
    }
}
