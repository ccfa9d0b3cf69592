use crate::eval::Binding;
use std::iter::FusedIterator;

/// Truth values of combination `index` for `width` variables.
///
/// Variable `j` takes bit `j` of `index`, so the first variable toggles fastest.
pub fn assignment(index: usize, width: usize) -> impl Iterator<Item = bool> {
    (0..width).map(move |j| (index >> j) & 1 == 1)
}

/// Enumerates all `2^n` bindings of `n` variables in counting order.
///
/// For `n = 0` a single empty binding is produced.
#[derive(Debug, Clone)]
pub struct Combinations<'a, S> {
    vars: &'a [S],
    index: usize,
    total: usize,
}

impl<'a, S: AsRef<str>> Combinations<'a, S> {
    /// # Panics
    ///
    /// Panics when `vars` has `usize::BITS` or more entries.
    pub fn new(vars: &'a [S]) -> Self {
        let total = u32::try_from(vars.len())
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .expect("too many variables to enumerate");

        Self {
            vars,
            index: 0,
            total,
        }
    }
}

impl<'a, S: AsRef<str>> Iterator for Combinations<'a, S> {
    type Item = Binding;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.total {
            return None;
        }

        let binding = self
            .vars
            .iter()
            .map(|v| v.as_ref())
            .zip(assignment(self.index, self.vars.len()))
            .collect();
        self.index += 1;

        Some(binding)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a, S: AsRef<str>> ExactSizeIterator for Combinations<'a, S> {}

impl<'a, S: AsRef<str>> FusedIterator for Combinations<'a, S> {}

/// All bindings of `vars`; the names must be distinct.
///
/// # Panics
///
/// Panics when `vars` has `usize::BITS` or more entries, as the `2^n` bindings cannot be
/// counted, let alone stored. [`TruthTable`] checks this limit and returns an error instead.
///
/// [`TruthTable`]: crate::TruthTable
pub fn generate_combinations<S: AsRef<str>>(vars: &[S]) -> Vec<Binding> {
    Combinations::new(vars).collect()
}
