use log::debug;
use std::fmt::Display;

/// Ticket handed out by [`LoadState::begin`]. Only the latest ticket may
/// write results back; anything older is a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

/// `{data, loading, error}` container shared by every loader.
#[derive(Debug, Clone)]
pub struct LoadState<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
    generation: u64,
}

impl<T: Default> Default for LoadState<T> {
    fn default() -> Self {
        Self { data: T::default(), loading: false, error: None, generation: 0 }
    }
}

impl<T: Default> LoadState<T> {
    /// Start a new request: mark loading, clear the error, invalidate older tickets.
    pub fn begin(&mut self) -> Generation {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        Generation(self.generation)
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        ticket.0 == self.generation
    }

    /// Apply a finished request. Errors clear the data rather than keeping
    /// stale results. Returns false when the ticket was superseded.
    pub fn finish<E: Display>(&mut self, ticket: Generation, result: Result<T, E>) -> bool {
        if !self.is_current(ticket) {
            debug!("dropping stale response (generation {} < {})", ticket.0, self.generation);
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = data;
                self.error = None;
            }
            Err(e) => {
                self.data = T::default();
                self.error = Some(e.to_string());
            }
        }
        true
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}
