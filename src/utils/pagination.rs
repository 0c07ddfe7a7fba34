//! Page slicing for the list views.

use serde::{Deserialize, Serialize};

/// The `?page=` query parameter. Any value is accepted, bad ones resolve to a valid page.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// One page of a list, with what a view needs to link to its neighbours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub previous_page_number: Option<usize>,
    pub next_page_number: Option<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    pub fn new(per_page: usize) -> Self {
        Self { per_page: per_page.max(1) }
    }

    /// An empty list still has one (empty) page.
    pub fn num_pages(&self, count: usize) -> usize {
        count.div_ceil(self.per_page).max(1)
    }

    /// Resolve a requested page the lenient way: anything that is not a number gives the
    /// first page, numbers out of range give the last one.
    pub fn resolve_page_number(&self, requested: Option<&str>, count: usize) -> usize {
        let num_pages = self.num_pages(count);
        match requested.map(str::trim).map(str::parse::<i64>) {
            Some(Ok(n)) if n >= 1 && (n as usize) <= num_pages => n as usize,
            Some(Ok(_)) => num_pages,
            _ => 1,
        }
    }

    pub fn get_page<T>(&self, items: Vec<T>, requested: Option<&str>) -> Page<T> {
        let count = items.len();
        let num_pages = self.num_pages(count);
        let number = self.resolve_page_number(requested, count);

        let items: Vec<T> = items
            .into_iter()
            .skip((number - 1) * self.per_page)
            .take(self.per_page)
            .collect();

        Page {
            items,
            number,
            num_pages,
            count,
            has_previous: number > 1,
            has_next: number < num_pages,
            previous_page_number: (number > 1).then(|| number - 1),
            next_page_number: (number < num_pages).then(|| number + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_are_sliced() {
        let paginator = Paginator::new(2);
        let page = paginator.get_page(vec![1, 2, 3, 4, 5], Some("2"));
        assert_eq!(page.items, vec![3, 4]);
        assert_eq!(page.number, 2);
        assert_eq!(page.num_pages, 3);
        assert_eq!(page.count, 5);
        assert_eq!(page.previous_page_number, Some(1));
        assert_eq!(page.next_page_number, Some(3));
    }

    #[test]
    fn test_missing_or_garbage_page_is_first() {
        let paginator = Paginator::new(2);
        assert_eq!(paginator.get_page(vec![1, 2, 3], None).number, 1);
        assert_eq!(paginator.get_page(vec![1, 2, 3], Some("abc")).number, 1);
        assert_eq!(paginator.get_page(vec![1, 2, 3], Some("")).number, 1);
    }

    #[test]
    fn test_out_of_range_page_is_last() {
        let paginator = Paginator::new(2);
        let page = paginator.get_page(vec![1, 2, 3], Some("99"));
        assert_eq!(page.number, 2);
        assert_eq!(page.items, vec![3]);
        assert!(!page.has_next);
        assert_eq!(paginator.get_page(vec![1, 2, 3], Some("0")).number, 2);
        assert_eq!(paginator.get_page(vec![1, 2, 3], Some("-1")).number, 2);
    }

    #[test]
    fn test_empty_list_has_one_page() {
        let paginator = Paginator::new(5);
        let page = paginator.get_page(Vec::<i32>::new(), Some("3"));
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(page.items.is_empty());
        assert!(!page.has_previous);
        assert!(!page.has_next);
    }
}
