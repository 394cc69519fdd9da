//! In-flight mutation tracking

use std::cell::RefCell;
use std::collections::HashMap;

/// Every server-side write the coordinator performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutation {
    Login,
    SignUp,
    UpdateProfile,
    UpdatePassword,
    DeleteAccount,
    SaveUser,
    DeleteUser,
    SaveItem,
    DeleteItem,
    RecoverPassword,
    ResetPassword,
}

/// Counts in-flight mutations per kind
#[derive(Debug, Default)]
pub(crate) struct PendingMutations {
    counts: RefCell<HashMap<Mutation, usize>>,
}

impl PendingMutations {
    pub(crate) fn begin(&self, mutation: Mutation) -> PendingGuard<'_> {
        *self.counts.borrow_mut().entry(mutation).or_default() += 1;
        PendingGuard {
            pending: self,
            mutation,
        }
    }

    pub(crate) fn is_pending(&self, mutation: Mutation) -> bool {
        self.counts
            .borrow()
            .get(&mutation)
            .is_some_and(|count| *count > 0)
    }
}

/// Marks a mutation finished when dropped, whichever way it ended
pub(crate) struct PendingGuard<'a> {
    pending: &'a PendingMutations,
    mutation: Mutation,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        let mut counts = self.pending.counts.borrow_mut();
        if let Some(count) = counts.get_mut(&self.mutation) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                counts.remove(&self.mutation);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_mutations_stay_pending_until_the_last_ends() {
        let pending = PendingMutations::default();
        let first = pending.begin(Mutation::SaveItem);
        let second = pending.begin(Mutation::SaveItem);
        assert!(pending.is_pending(Mutation::SaveItem));
        assert!(!pending.is_pending(Mutation::DeleteItem));

        drop(first);
        assert!(pending.is_pending(Mutation::SaveItem));
        drop(second);
        assert!(!pending.is_pending(Mutation::SaveItem));
    }
}
