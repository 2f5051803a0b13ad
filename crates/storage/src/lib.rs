//! Fixed-width, paged row storage.
//!
//! A table lives in one file. The file is a flat sequence of
//! [`common::PAGE_SIZE`]-byte pages; rows never span a page boundary, so
//! `rows_per_page = PAGE_SIZE / row_size` and a row's position is
//! `(page_num, byte_offset)` derived purely from its row index. There is no
//! slotting, no free list and no on-disk header, the row count lives in the
//! catalog, not the file.

mod codec;
mod cursor;
mod pager;

pub use codec::{decode_value, deserialize_row, encode_value, serialize_row, EncodeError};
pub use cursor::Cursor;
pub use pager::Pager;
