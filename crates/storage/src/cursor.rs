//! The cursor: absolute row-index positioning over a table's
//! pages, independent of any particular schema.

use common::DbResult;

use crate::Pager;

pub struct Cursor<'a> {
    pager: &'a mut Pager,
    rows_per_page: usize,
    row_size: usize,
    num_rows: usize,
    pub row_num: usize,
    pub end_of_table: bool,
}

impl<'a> Cursor<'a> {
    /// Position at the first row. `end_of_table` is already true for an
    /// empty table, so a scan loop needs no special-case.
    pub fn table_start(
        pager: &'a mut Pager,
        rows_per_page: usize,
        row_size: usize,
        num_rows: usize,
    ) -> Self {
        Self {
            pager,
            rows_per_page,
            row_size,
            num_rows,
            row_num: 0,
            end_of_table: num_rows == 0,
        }
    }

    /// Position one past the last row, the slot a new row is inserted
    /// into.
    pub fn table_end(
        pager: &'a mut Pager,
        rows_per_page: usize,
        row_size: usize,
        num_rows: usize,
    ) -> Self {
        Self {
            pager,
            rows_per_page,
            row_size,
            num_rows,
            row_num: num_rows,
            end_of_table: true,
        }
    }

    /// Position at an arbitrary row index, for the compaction pass after
    /// DELETE, which needs to address rows directly rather
    /// than only walking forward from the start.
    pub fn at(
        pager: &'a mut Pager,
        rows_per_page: usize,
        row_size: usize,
        num_rows: usize,
        row_num: usize,
    ) -> Self {
        Self {
            pager,
            rows_per_page,
            row_size,
            num_rows,
            row_num,
            end_of_table: row_num >= num_rows,
        }
    }

    pub fn advance(&mut self) {
        self.row_num += 1;
        if self.row_num >= self.num_rows {
            self.end_of_table = true;
        }
    }

    /// The row's byte slice within its page, allocating the page on first
    /// touch.
    pub fn value(&mut self) -> DbResult<&mut [u8]> {
        let page_num = self.row_num / self.rows_per_page;
        let offset = (self.row_num % self.rows_per_page) * self.row_size;
        let page = self.pager.get_page(page_num)?;
        Ok(&mut page[offset..offset + self.row_size])
    }
}
