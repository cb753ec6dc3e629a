//! In-memory row store.
//!
//! Rows are appended into fixed-size pages held in an arena of
//! `TABLE_MAX_PAGES` slots. A page is allocated the first time a row lands in
//! it. Row `n` lives in page `n / ROWS_PER_PAGE` at byte offset
//! `(n % ROWS_PER_PAGE) * ROW_SIZE`.

use tracing::debug;

use crate::error::{Error, Result};
use crate::row::Row;
use crate::{PAGE_SIZE, ROW_SIZE, ROWS_PER_PAGE, TABLE_MAX_PAGES, TABLE_MAX_ROWS};

pub type PageId = usize;

/// A fixed `PAGE_SIZE` block of row slots.
#[derive(Debug)]
pub struct Page {
    data: Box<[u8]>,
}

impl Page {
    fn new() -> Self {
        Self {
            data: vec![0u8; PAGE_SIZE].into_boxed_slice(),
        }
    }

    fn slot(&self, slot: usize) -> &[u8] {
        let offset = slot * ROW_SIZE;
        &self.data[offset..offset + ROW_SIZE]
    }

    fn slot_mut(&mut self, slot: usize) -> &mut [u8] {
        let offset = slot * ROW_SIZE;
        &mut self.data[offset..offset + ROW_SIZE]
    }
}

#[derive(Debug)]
pub struct Table {
    num_rows: usize,
    pages: [Option<Page>; TABLE_MAX_PAGES],
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl Table {
    pub fn new() -> Self {
        Self {
            num_rows: 0,
            pages: std::array::from_fn(|_| None),
        }
    }

    pub fn len(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= TABLE_MAX_ROWS
    }

    /// Number of pages allocated so far.
    pub fn allocated_pages(&self) -> usize {
        self.pages.iter().filter(|p| p.is_some()).count()
    }

    /// Appends `row` after the last stored row.
    pub fn insert(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            debug!(rows = self.num_rows, "insert rejected, table full");
            return Err(Error::TableFull);
        }
        let row_num = self.num_rows;
        row.serialize(self.slot_mut(row_num));
        self.num_rows += 1;
        Ok(())
    }

    /// Iterates over every row in insertion order.
    pub fn scan(&self) -> Cursor<'_> {
        Cursor::table_start(self)
    }

    fn slot_mut(&mut self, row_num: usize) -> &mut [u8] {
        let page_id: PageId = row_num / ROWS_PER_PAGE;
        let page = self.pages[page_id].get_or_insert_with(|| {
            debug!(page_id, "allocating page");
            Page::new()
        });
        page.slot_mut(row_num % ROWS_PER_PAGE)
    }

    fn slot(&self, row_num: usize) -> Option<&[u8]> {
        if row_num >= self.num_rows {
            return None;
        }
        let page = self.pages[row_num / ROWS_PER_PAGE].as_ref()?;
        Some(page.slot(row_num % ROWS_PER_PAGE))
    }
}

/// Position within a table, from the first row to one past the last.
#[derive(Debug)]
pub struct Cursor<'a> {
    table: &'a Table,
    row_num: usize,
}

impl<'a> Cursor<'a> {
    pub fn table_start(table: &'a Table) -> Self {
        Self { table, row_num: 0 }
    }

    pub fn table_end(table: &'a Table) -> Self {
        Self {
            table,
            row_num: table.num_rows,
        }
    }

    pub fn end_of_table(&self) -> bool {
        self.row_num >= self.table.num_rows
    }

    /// Row under the cursor, `None` once past the last row.
    pub fn value(&self) -> Option<Row> {
        self.table.slot(self.row_num).map(Row::deserialize)
    }

    pub fn advance(&mut self) {
        if !self.end_of_table() {
            self.row_num += 1;
        }
    }
}

impl Iterator for Cursor<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let row = self.value()?;
        self.advance();
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.table.num_rows - self.row_num;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Cursor<'_> {}
