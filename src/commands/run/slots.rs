use std::sync::{Condvar, Mutex, MutexGuard};

/// Counting semaphore bounding the number of solver processes alive at once.
#[derive(Debug)]
pub struct SolverSlots {
    free: Mutex<usize>,
    released: Condvar,
}

impl SolverSlots {
    pub fn new(slots: usize) -> Self {
        Self {
            free: Mutex::new(slots),
            released: Condvar::new(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, usize> {
        // The counter stays consistent even if a holder panicked.
        self.free.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Block until a slot is free. The slot is returned when the permit is dropped.
    pub fn acquire(&self) -> SlotPermit<'_> {
        let mut free = self.lock();
        while *free == 0 {
            free = self
                .released
                .wait(free)
                .unwrap_or_else(|e| e.into_inner());
        }
        *free -= 1;
        SlotPermit { slots: self }
    }
}

pub struct SlotPermit<'a> {
    slots: &'a SolverSlots,
}

impl Drop for SlotPermit<'_> {
    fn drop(&mut self) {
        *self.slots.lock() += 1;
        self.slots.released.notify_one();
    }
}
