use std::ops::{Index, IndexMut};

use super::Processor;

/// The processors produced by a partitioning pass, in creation order.
#[derive(Debug, Default)]
pub struct Partition {
    processors: Vec<Processor>,
}

/// Implementing `Index` allows accessing the processor at a given position.
impl Index<usize> for Partition {
    type Output = Processor;

    fn index(&self, index: usize) -> &Self::Output {
        &self.processors[index]
    }
}

impl IndexMut<usize> for Partition {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.processors[index]
    }
}

impl Partition {
    pub fn new() -> Self {
        Self { processors: Vec::new() }
    }

    /// Opens a new, empty processor and returns it. Ids are 1-based in
    /// creation order.
    pub fn open_processor(&mut self) -> &mut Processor {
        let id = self.processors.len() as u32 + 1;
        self.processors.push(Processor::new(id));
        let last = self.processors.len() - 1;
        &mut self.processors[last]
    }

    /// Returns the number of processors in the partition.
    pub fn processor_number(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Processor> {
        self.processors.iter()
    }

    /// Task ids per processor, in assignment order.
    pub fn assignment(&self) -> Vec<Vec<String>> {
        self.processors
            .iter()
            .map(|p| p.task_set().iter().map(|t| t.id().to_string()).collect())
            .collect()
    }

    pub fn into_processors(self) -> Vec<Processor> {
        self.processors
    }
}
