use core::ops::RangeInclusive;

use crate::errors::ShellError;

/// Exactly `N` whitespace separated integer arguments
pub(crate) struct Args<const N: usize>([i64; N]);

impl<const N: usize> Args<N> {
    pub fn parse(input: &str) -> Result<Self, ShellError> {
        let mut values = [0; N];
        let mut count = 0;

        for (position, word) in input.split_whitespace().enumerate() {
            if let Some(value) = values.get_mut(position) {
                *value = word.parse().map_err(|_| ShellError::NotAnInteger(position))?;
            }
            count += 1;
        }

        if count != N {
            return Err(ShellError::ArgumentCount {
                expected: N,
                actual: count,
            });
        }

        Ok(Self(values))
    }

    /// Argument at `position`, which must lie within `range`
    pub fn get(&self, position: usize, range: RangeInclusive<i64>) -> Result<i64, ShellError> {
        self.0
            .get(position)
            .copied()
            .filter(|value| range.contains(value))
            .ok_or(ShellError::OutOfRange(position))
    }
}
