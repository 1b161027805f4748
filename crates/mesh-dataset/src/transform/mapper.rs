use crate::Dataset;
use std::marker::PhantomData;

/// Basic mapper trait to be used with the [mapper dataset](MapperDataset).
pub trait Mapper<I, O>: Send + Sync {
    /// Maps an item of type I to an item of type O.
    fn map(&self, item: &I) -> O;
}

/// Dataset mapping each element in an inner dataset to another element type lazily.
pub struct MapperDataset<D, M, I> {
    dataset: D,
    mapper: M,
    input: PhantomData<I>,
}

impl<D, M, I> MapperDataset<D, M, I>
where
    D: Dataset<I>,
{
    /// Creates a new mapper dataset.
    pub fn new(dataset: D, mapper: M) -> Self {
        Self {
            dataset,
            mapper,
            input: PhantomData,
        }
    }

    /// The wrapped dataset.
    pub fn inner(&self) -> &D {
        &self.dataset
    }

    /// The mapper applied to each item.
    pub fn mapper(&self) -> &M {
        &self.mapper
    }
}

impl<D, M, I, O> Dataset<O> for MapperDataset<D, M, I>
where
    D: Dataset<I>,
    M: Mapper<I, O> + Send + Sync,
    I: Send + Sync,
    O: Send + Sync,
{
    fn get(&self, index: usize) -> Option<O> {
        let item = self.dataset.get(index);
        item.map(|item| self.mapper.map(&item))
    }

    fn len(&self) -> usize {
        self.dataset.len()
    }
}
