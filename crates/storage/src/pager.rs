//! The pager: a fixed array of page slots over one table file.
//!
//! Unlike a buffer pool with eviction, every page slot is simply `None` or
//! `Some(page)` for the lifetime of the pager. `TABLE_MAX_PAGES` already
//! bounds a table's size (`rows_per_page * TABLE_MAX_PAGES` rows), so there
//! is nothing to evict: the whole working set fits by construction, and
//! pages are written back once, at [`Pager::close`].

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use common::{DbError, DbResult, PAGE_SIZE, TABLE_MAX_PAGES};

pub struct Pager {
    file: File,
    file_length: u64,
    pages: Vec<Option<Vec<u8>>>,
}

impl Pager {
    pub fn open(path: &Path) -> DbResult<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();
        Ok(Self {
            file,
            file_length,
            pages: vec![None; TABLE_MAX_PAGES],
        })
    }

    /// Length of the backing file as it was when last opened or closed.
    /// The catalog derives `num_rows` from this at load time.
    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    /// Fetch a page, reading it from disk into its slot on first access.
    /// A page past the current end of file comes back zeroed; nothing is
    /// written until `close`.
    pub fn get_page(&mut self, page_num: usize) -> DbResult<&mut [u8]> {
        if page_num >= TABLE_MAX_PAGES {
            return Err(DbError::Storage(format!(
                "page {page_num} exceeds TABLE_MAX_PAGES ({TABLE_MAX_PAGES})"
            )));
        }
        if self.pages[page_num].is_none() {
            let mut buf = vec![0u8; PAGE_SIZE];
            let page_start = page_num as u64 * PAGE_SIZE as u64;
            if page_start < self.file_length {
                self.file.seek(SeekFrom::Start(page_start))?;
                let readable = (self.file_length - page_start).min(PAGE_SIZE as u64) as usize;
                self.file.read_exact(&mut buf[..readable])?;
            }
            self.pages[page_num] = Some(buf);
        }
        Ok(self.pages[page_num].as_mut().unwrap())
    }

    fn flush_page(&mut self, page_num: usize, bytes: usize) -> DbResult<()> {
        let page = self.pages[page_num]
            .as_ref()
            .ok_or_else(|| DbError::Storage(format!("tried to flush empty page {page_num}")))?;
        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(&page[..bytes])?;
        Ok(())
    }

    /// Write every touched page back to disk and drop the in-memory slots.
    /// `num_rows` decides how many bytes of the final page are real data;
    /// the rest of that page is never written.
    pub fn close(&mut self, num_rows: usize, rows_per_page: usize, row_size: usize) -> DbResult<()> {
        let full_pages = num_rows / rows_per_page;
        for page_num in 0..full_pages {
            if self.pages[page_num].is_some() {
                self.flush_page(page_num, PAGE_SIZE)?;
            }
        }
        let remainder_rows = num_rows % rows_per_page;
        if remainder_rows > 0 && self.pages[full_pages].is_some() {
            self.flush_page(full_pages, remainder_rows * row_size)?;
        }
        self.file.flush()?;
        self.file_length = self.file.metadata()?.len();
        for slot in self.pages.iter_mut() {
            *slot = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn new_page_past_eof_is_zeroed() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(&dir.path().join("t.table")).unwrap();
        let page = pager.get_page(0).unwrap();
        assert!(page.iter().all(|&b| b == 0));
    }

    #[test]
    fn close_then_reopen_round_trips_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.table");
        let row_size = 16;
        let rows_per_page = PAGE_SIZE / row_size;

        {
            let mut pager = Pager::open(&path).unwrap();
            let page = pager.get_page(0).unwrap();
            page[0..4].copy_from_slice(&42i32.to_le_bytes());
            pager.close(1, rows_per_page, row_size).unwrap();
        }

        let mut pager = Pager::open(&path).unwrap();
        assert_eq!(pager.file_length() as usize, row_size);
        let page = pager.get_page(0).unwrap();
        assert_eq!(&page[0..4], &42i32.to_le_bytes());
    }

    #[test]
    fn page_beyond_table_max_pages_errors() {
        let dir = tempdir().unwrap();
        let mut pager = Pager::open(&dir.path().join("t.table")).unwrap();
        assert!(pager.get_page(TABLE_MAX_PAGES).is_err());
    }
}
