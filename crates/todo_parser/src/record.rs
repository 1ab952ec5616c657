// crates/todo_parser/src/record.rs

use sha2::{Digest, Sha256};
use std::fmt;
use std::hash::{Hash, Hasher};

/// One extracted TODO/FIXME annotation.
///
/// Built only by [`crate::TodoBuilder`]; read-only afterwards.
///
/// Equality and hashing consider the ticket, the estimate and the body only,
/// so an annotation keeps its identity when the lines around it move.
#[derive(Debug, Clone)]
pub struct Todo {
    id: u64,
    start: usize,
    end: usize,
    ticket_id: String,
    estimated_minutes: u32,
    body: String,
    path: String,
    author: Option<String>,
    timestamp: Option<String>,
}

impl Todo {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        start: usize,
        end: usize,
        ticket_id: String,
        estimated_minutes: u32,
        body: String,
        path: String,
        author: Option<String>,
        timestamp: Option<String>,
    ) -> Self {
        let id = todo_id(&ticket_id, estimated_minutes, &body);
        Self {
            id,
            start,
            end,
            ticket_id,
            estimated_minutes,
            body,
            path,
            author,
            timestamp,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// First line, 1-based.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last line, 1-based and inclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Ticket id including the leading `#`.
    pub fn ticket_id(&self) -> &str {
        &self.ticket_id
    }

    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn timestamp(&self) -> Option<&str> {
        self.timestamp.as_deref()
    }
}

/// Stable identity over `(ticket, estimate, body)`: the first 8 bytes of a
/// SHA-256 digest. Line numbers and path are deliberately left out.
pub fn todo_id(ticket_id: &str, estimated_minutes: u32, body: &str) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(ticket_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(estimated_minutes.to_be_bytes());
    hasher.update(body.as_bytes());
    let digest = hasher.finalize();

    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

impl PartialEq for Todo {
    fn eq(&self, other: &Self) -> bool {
        self.ticket_id == other.ticket_id
            && self.estimated_minutes == other.estimated_minutes
            && self.body == other.body
    }
}

impl Eq for Todo {}

impl Hash for Todo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ticket_id.hash(state);
        self.estimated_minutes.hash(state);
        self.body.hash(state);
    }
}

impl fmt::Display for Todo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "TODO [Line: {}, ", self.start)?;
        } else {
            write!(f, "TODO [Lines: {}-{}, ", self.start, self.end)?;
        }
        write!(
            f,
            "TicketID: {}, Estimated Time: {}, Body: '{}', Path: '{}'",
            self.ticket_id, self.estimated_minutes, self.body, self.path
        )?;
        if let Some(author) = &self.author {
            write!(f, ", Author: '{}'", author)?;
        }
        write!(f, "]")
    }
}
