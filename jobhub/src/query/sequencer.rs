/// Identifies one issued list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct QueryTicket(u64);

impl QueryTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Switch-to-latest bookkeeping: only the most recently issued ticket may update a view, and
/// nothing may after [`QuerySequencer::close`].
#[derive(Debug, Default)]
pub struct QuerySequencer {
    latest: u64,
    closed: bool,
}

impl QuerySequencer {
    pub fn issue(&mut self) -> QueryTicket {
        self.latest += 1;
        QueryTicket(self.latest)
    }

    pub fn is_current(&self, ticket: QueryTicket) -> bool {
        !self.closed && ticket.0 == self.latest
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
