use std::sync::Arc;

use crate::DatasetIterator;

/// The dataset trait defines a basic collection of items with a predefined size.
pub trait Dataset<I>: Send + Sync {
    /// Gets the item at the given index.
    fn get(&self, index: usize) -> Option<I>;

    /// Gets the number of items in the dataset.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the item at a signed index.
    ///
    /// Negative indices count from the end: `-1` is the last item, `-len` the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use mesh_dataset::{Dataset, InMemDataset};
    /// let dataset = InMemDataset::new(vec![1, 2, 3]);
    ///
    /// assert_eq!(dataset.get_signed(-1), Some(3));
    /// assert_eq!(dataset.get_signed(-3), dataset.get(0));
    /// assert_eq!(dataset.get_signed(-4), None);
    /// ```
    fn get_signed(&self, index: isize) -> Option<I> {
        let index = resolve_index(index, self.len())?;
        self.get(index)
    }

    /// Returns an iterator over the dataset.
    fn iter(&self) -> DatasetIterator<'_, I>
    where
        Self: Sized,
    {
        DatasetIterator::new(self)
    }
}

/// Resolve a signed index against a dataset length.
///
/// Returns `None` when the index falls outside `-len..len`.
pub fn resolve_index(index: isize, len: usize) -> Option<usize> {
    if index >= 0 {
        let index = index as usize;
        (index < len).then_some(index)
    } else {
        len.checked_sub(index.unsigned_abs())
    }
}

impl<D, I> Dataset<I> for Arc<D>
where
    D: Dataset<I>,
{
    fn get(&self, index: usize) -> Option<I> {
        self.as_ref().get(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<I> Dataset<I> for Arc<dyn Dataset<I>> {
    fn get(&self, index: usize) -> Option<I> {
        self.as_ref().get(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<D, I> Dataset<I> for Box<D>
where
    D: Dataset<I>,
{
    fn get(&self, index: usize) -> Option<I> {
        self.as_ref().get(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

impl<I> Dataset<I> for Box<dyn Dataset<I>> {
    fn get(&self, index: usize) -> Option<I> {
        self.as_ref().get(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}
