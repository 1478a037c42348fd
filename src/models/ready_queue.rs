use super::Job;

/// Jobs waiting for a processor, kept sorted by [`Job::dispatch_order`] at
/// every mutation so the head is always the next job to run.
#[derive(Debug, Default, Clone)]
pub struct ReadyQueue {
    jobs: Vec<Job>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Inserts after every job that is not ordered after `job`.
    pub fn push(&mut self, job: Job) {
        let index = self
            .jobs
            .partition_point(|queued| queued.dispatch_order(&job).is_le());
        self.jobs.insert(index, job);
    }

    pub fn peek(&self) -> Option<&Job> {
        self.jobs.first()
    }

    pub fn pop(&mut self) -> Option<Job> {
        if self.jobs.is_empty() {
            return None;
        }
        Some(self.jobs.remove(0))
    }

    pub fn contains(&self, job: &Job) -> bool {
        self.jobs.iter().any(|queued| queued.same_instance(job))
    }

    pub fn find_mut(&mut self, task_id: &str, instance: usize) -> Option<&mut Job> {
        self.jobs
            .iter_mut()
            .find(|job| job.task_id() == task_id && job.instance() == instance)
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Job> {
        self.jobs.iter()
    }
}
