/*
 * Responsibility
 * - list リクエストの query parameter を正規化した ClipQuery に変換する
 * - ページング計算 (offset / next / prev) をここに閉じ込める
 * - 所有者制約と SQL 化は repo 側。ここは値の決定だけ。
 *
 * Note:
 * - sort は "createdAt" 降順のみ。並び替えの指定は受け付けない。
 */
use serde::Serialize;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 25;

/// 正規化済みの list クエリ。page / limit は常に 1 以上。
#[derive(Debug, Clone)]
pub struct ClipQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub page: i64,
    pub limit: i64,
}

impl ClipQuery {
    pub fn new(
        search: Option<String>,
        tag: Option<String>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Self {
        // 空文字は「指定なし」と同じ扱い
        let search = search.filter(|s| !s.trim().is_empty());
        let tag = tag.filter(|s| !s.trim().is_empty());

        let page = page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = limit.unwrap_or(DEFAULT_LIMIT).max(1);

        Self {
            search,
            tag,
            page,
            limit,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRef {
    pub page: i64,
    pub limit: i64,
}

/// list レスポンスに載せるページングメタ情報。
/// next / prev は独立に省略される (どちらも無ければ `{}` になる)。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<PageRef>,
}

impl Pagination {
    pub fn build(page: i64, limit: i64, total: i64) -> Self {
        let start_index = (page - 1) * limit;
        let end_index = page * limit;

        let next = (end_index < total).then_some(PageRef {
            page: page + 1,
            limit,
        });
        let prev = (start_index > 0).then_some(PageRef {
            page: page - 1,
            limit,
        });

        Self { next, prev }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_params_absent() {
        let q = ClipQuery::new(None, None, None, None);
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 25);
        assert_eq!(q.offset(), 0);
        assert!(q.search.is_none());
        assert!(q.tag.is_none());
    }

    #[test]
    fn non_positive_page_and_limit_clamp_to_one() {
        let q = ClipQuery::new(None, None, Some(0), Some(-5));
        assert_eq!(q.page, 1);
        assert_eq!(q.limit, 1);
    }

    #[test]
    fn blank_search_and_tag_are_dropped() {
        let q = ClipQuery::new(Some("  ".to_string()), Some(String::new()), None, None);
        assert!(q.search.is_none());
        assert!(q.tag.is_none());
    }

    #[test]
    fn search_and_tag_may_combine() {
        let q = ClipQuery::new(
            Some("alpha".to_string()),
            Some("work".to_string()),
            Some(2),
            Some(10),
        );
        assert_eq!(q.search.as_deref(), Some("alpha"));
        assert_eq!(q.tag.as_deref(), Some("work"));
        assert_eq!(q.offset(), 10);
    }

    #[test]
    fn first_page_has_next_but_no_prev() {
        let p = Pagination::build(1, 10, 30);
        assert_eq!(p.next, Some(PageRef { page: 2, limit: 10 }));
        assert_eq!(p.prev, None);
    }

    #[test]
    fn last_page_has_prev_but_no_next() {
        let p = Pagination::build(3, 10, 30);
        assert_eq!(p.next, None);
        assert_eq!(p.prev, Some(PageRef { page: 2, limit: 10 }));
    }

    #[test]
    fn middle_page_has_both() {
        let p = Pagination::build(2, 10, 30);
        assert_eq!(p.next, Some(PageRef { page: 3, limit: 10 }));
        assert_eq!(p.prev, Some(PageRef { page: 1, limit: 10 }));
    }

    #[test]
    fn page_past_the_end_keeps_prev_only() {
        let p = Pagination::build(4, 10, 30);
        assert_eq!(p.next, None);
        assert_eq!(p.prev, Some(PageRef { page: 3, limit: 10 }));
    }

    #[test]
    fn single_short_page_has_neither() {
        let p = Pagination::build(1, 25, 10);
        assert_eq!(p, Pagination::default());
    }

    #[test]
    fn empty_pagination_serializes_as_empty_object() {
        let p = Pagination::build(1, 25, 10);
        assert_eq!(serde_json::to_value(&p).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn full_pagination_serializes_both_refs() {
        let p = Pagination::build(2, 10, 30);
        assert_eq!(
            serde_json::to_value(&p).unwrap(),
            serde_json::json!({
                "next": {"page": 3, "limit": 10},
                "prev": {"page": 1, "limit": 10},
            })
        );
    }
}
