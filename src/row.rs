use std::fmt;

use crate::error::{Error, Result};
use crate::{
    COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE, EMAIL_OFFSET, EMAIL_SIZE, ID_OFFSET, ID_SIZE,
    ROW_SIZE, USERNAME_OFFSET, USERNAME_SIZE,
};

/// A record of the single `users` table.
///
/// Rows are serialized into exactly `ROW_SIZE` bytes no matter how long the
/// strings are, so a row's position in a page depends only on its index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: u32,
    username: String,
    email: String,
}

impl Row {
    /// Builds a row, rejecting strings that would not fit their column.
    pub fn new(id: u32, username: impl Into<String>, email: impl Into<String>) -> Result<Self> {
        let username = username.into();
        let email = email.into();
        if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
            return Err(Error::StringTooLong);
        }
        Ok(Self {
            id,
            username,
            email,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Writes the row into `dst`, which must be exactly `ROW_SIZE` bytes.
    pub fn serialize(&self, dst: &mut [u8]) {
        debug_assert_eq!(dst.len(), ROW_SIZE);
        dst[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_fixed(
            &mut dst[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_fixed(&mut dst[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Reads a row back from a `ROW_SIZE` byte slot.
    pub fn deserialize(src: &[u8]) -> Self {
        debug_assert_eq!(src.len(), ROW_SIZE);
        let mut id = [0u8; ID_SIZE];
        id.copy_from_slice(&src[ID_OFFSET..ID_OFFSET + ID_SIZE]);
        Self {
            id: u32::from_le_bytes(id),
            username: read_fixed(&src[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]),
            email: read_fixed(&src[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]),
        }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

// Copies `value` into the column and zero-fills the rest of it.
fn write_fixed(column: &mut [u8], value: &str) {
    let bytes = value.as_bytes();
    column[..bytes.len()].copy_from_slice(bytes);
    column[bytes.len()..].fill(0);
}

fn read_fixed(column: &[u8]) -> String {
    let end = column.iter().position(|&b| b == 0).unwrap_or(column.len());
    String::from_utf8_lossy(&column[..end]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_size_is_fixed() {
        assert_eq!(ROW_SIZE, 291);
        assert_eq!(EMAIL_OFFSET + EMAIL_SIZE, ROW_SIZE);
    }

    #[test]
    fn test_serialize_zero_fills_unused_bytes() {
        let row = Row::new(7, "bob", "bob@example.com").unwrap();
        let mut buf = [0xffu8; ROW_SIZE];
        row.serialize(&mut buf);

        assert_eq!(&buf[..ID_SIZE], &7u32.to_le_bytes());
        assert_eq!(&buf[USERNAME_OFFSET..USERNAME_OFFSET + 3], b"bob");
        assert!(buf[USERNAME_OFFSET + 3..EMAIL_OFFSET].iter().all(|&b| b == 0));
        assert!(buf[EMAIL_OFFSET + 15..].iter().all(|&b| b == 0));
        assert_eq!(Row::deserialize(&buf), row);
    }

    #[test]
    fn test_columns_at_full_width() {
        let username = "u".repeat(USERNAME_SIZE);
        let email = "e".repeat(EMAIL_SIZE);
        let row = Row::new(u32::MAX, username.as_str(), email.as_str()).unwrap();

        let mut buf = [0u8; ROW_SIZE];
        row.serialize(&mut buf);
        let back = Row::deserialize(&buf);
        assert_eq!(back.id(), u32::MAX);
        assert_eq!(back.username(), username);
        assert_eq!(back.email(), email);
    }

    #[test]
    fn test_rejects_strings_over_column_width() {
        let long_username = "a".repeat(USERNAME_SIZE + 1);
        let long_email = "a".repeat(EMAIL_SIZE + 1);
        assert!(matches!(
            Row::new(1, long_username, "x"),
            Err(Error::StringTooLong)
        ));
        assert!(matches!(Row::new(1, "x", long_email), Err(Error::StringTooLong)));
    }

    #[test]
    fn test_empty_strings_allowed() {
        let row = Row::new(1, "", "").unwrap();
        assert_eq!(row.to_string(), "(1, , )");
    }

    #[test]
    fn test_display() {
        let row = Row::new(1, "user1", "person1@example.com").unwrap();
        assert_eq!(row.to_string(), "(1, user1, person1@example.com)");
    }
}
