use crate::annotation::model::AnnotationSet;

/// A scoped editing transaction over an [`AnnotationSet`].
///
/// The session takes the exclusive borrow for its lifetime; mutation goes
/// through [`EditSession::edit`], which snapshots the pre-transaction state
/// the first time it is called. [`EditSession::commit`] keeps the
/// mutations; dropping the session without committing restores the
/// snapshot. Exactly one of the two happens on every exit path, including
/// early returns and panics, so no caller ever has to poll a liveness flag.
#[derive(Debug)]
pub struct EditSession<'a> {
    target: &'a mut AnnotationSet,
    snapshot: Option<AnnotationSet>,
    committed: bool,
}

impl<'a> EditSession<'a> {
    /// Opens a session over `target`.
    pub fn begin(target: &'a mut AnnotationSet) -> Self {
        Self {
            target,
            snapshot: None,
            committed: false,
        }
    }

    /// Read access to the set as currently mutated.
    pub fn read(&self) -> &AnnotationSet {
        self.target
    }

    /// Mutable access to the set.
    ///
    /// The first call snapshots the pre-transaction state, so rollback is
    /// free for sessions that never mutate.
    pub fn edit(&mut self) -> &mut AnnotationSet {
        if self.snapshot.is_none() {
            self.snapshot = Some(self.target.clone());
        }
        self.target
    }

    /// True iff the session has mutated the set.
    pub fn is_dirty(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Keeps every mutation made through the session.
    pub fn commit(mut self) {
        self.committed = true;
        self.snapshot = None;
    }

    /// Discards every mutation made through the session.
    ///
    /// Equivalent to dropping the session; named for call sites that want
    /// the intent spelled out.
    pub fn rollback(self) {}
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Some(snapshot) = self.snapshot.take() {
            *self.target = snapshot;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/annotation/session.rs"]
mod tests;
